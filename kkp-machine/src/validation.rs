//! Checks run on node deployments before they are converted
use kkp_core::{KubernetesVersion, NodeDeployment, RequiredFields};
use tracing::debug;

use crate::{Error, Result};

/// Taint effects kubernetes accepts, sorted
pub const TAINT_EFFECTS: [&str; 3] = ["NoExecute", "NoSchedule", "PreferNoSchedule"];

/// Decides whether a kubelet may join a control plane
pub trait VersionCompatibility {
    /// Whether `kubelet` is supported next to `control_plane`
    fn is_compatible(&self, kubelet: &KubernetesVersion, control_plane: &KubernetesVersion) -> bool;
}

/// The upstream version skew policy
///
/// A kubelet must share the control plane's major version, must not be newer, and may be
/// at most `max_minor_skew` minor versions older.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KubeletSkewPolicy {
    /// How many minor versions the kubelet may lag behind
    pub max_minor_skew: u64,
}

impl Default for KubeletSkewPolicy {
    fn default() -> Self {
        Self { max_minor_skew: 2 }
    }
}

impl VersionCompatibility for KubeletSkewPolicy {
    fn is_compatible(&self, kubelet: &KubernetesVersion, control_plane: &KubernetesVersion) -> bool {
        kubelet.major() == control_plane.major()
            && kubelet.minor() <= control_plane.minor()
            && control_plane.minor() - kubelet.minor() <= self.max_minor_skew
    }
}

/// Validates a node deployment against the default [`KubeletSkewPolicy`]
pub fn validate(nd: NodeDeployment, control_plane: &KubernetesVersion) -> Result<NodeDeployment> {
    validate_with(nd, control_plane, &KubeletSkewPolicy::default())
}

/// Validates a node deployment and resolves its kubelet version
///
/// An empty kubelet version is defaulted to the control plane version, which is written
/// back into the returned deployment.
pub fn validate_with(
    mut nd: NodeDeployment,
    control_plane: &KubernetesVersion,
    compatibility: &impl VersionCompatibility,
) -> Result<NodeDeployment> {
    let template = &mut nd.spec.template;
    let cloud = template.cloud.as_ref().ok_or(Error::MissingCloudProvider)?;
    cloud.check_required_fields()?;
    if template.operating_system.is_none() {
        return Err(Error::MissingOperatingSystem);
    }

    let kubelet = if template.versions.kubelet.trim().is_empty() {
        debug!(%control_plane, "defaulting kubelet version to control plane");
        control_plane.clone()
    } else {
        let kubelet =
            KubernetesVersion::parse(&template.versions.kubelet).map_err(|source| Error::InvalidKubeletVersion {
                version: template.versions.kubelet.clone(),
                source,
            })?;
        if !compatibility.is_compatible(&kubelet, control_plane) {
            return Err(Error::IncompatibleKubeletVersion {
                kubelet,
                control_plane: control_plane.clone(),
            });
        }
        kubelet
    };

    if nd.spec.dynamic_config == Some(true) && kubelet.at_least(1, 24) {
        return Err(Error::DynamicConfigUnsupported(kubelet));
    }

    for taint in &template.taints {
        if taint.key.is_empty() {
            return Err(Error::MissingTaintKey);
        }
        if taint.value.is_empty() {
            return Err(Error::MissingTaintValue(taint.key.clone()));
        }
        if !TAINT_EFFECTS.contains(&taint.effect.as_str()) {
            return Err(Error::InvalidTaintEffect {
                effect: taint.effect.clone(),
                allowed: TAINT_EFFECTS.to_vec(),
            });
        }
    }

    template.versions.kubelet = kubelet.to_string();
    Ok(nd)
}
