//! Conversion between the public [`NodeDeployment`] and the [`MachineDeployment`] consumed
//! by the machine controller.
use std::collections::BTreeMap;

use k8s_openapi::{api::core::v1::Taint, apimachinery::pkg::apis::meta::v1::LabelSelector};
use kkp_core::{
    api::{ApiObjectMeta, NodeDeploymentSpec, NodeVersionInfo, TaintSpec},
    machine::{
        ConfigMapNodeConfigSource, MachineDeploymentSpec, MachineSpec, MachineTemplateSpec, MachineVersionInfo,
        NodeConfigSource,
    },
    metadata::ObjectMeta,
    Cluster, Datacenter, KubernetesVersion, MachineDeployment, NodeDeployment, NodeSpec, OperatingSystemSpec,
    ProviderConfig, ResourceExt, TypeMeta, UserSshKey,
};
use rand::Rng;
use tracing::debug;

use crate::{
    operatingsystem::{api_spec_from_os_config, os_config_from_api},
    provider::{cloud_provider_spec_from_node, node_cloud_spec_from_provider_config},
    Builder, Error, Result,
};

/// Namespace machine deployments live in
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// Annotation selecting the operating system profile of the machines
pub const OPERATING_SYSTEM_PROFILE_ANNOTATION: &str = "k8c.io/operating-system-profile";

/// Annotation deferring machine creation until the named initializers ran
pub const INITIALIZERS_ANNOTATION: &str = "machine-controller.kubermatic.io/initializers";

/// Label matching machines to their deployment
pub const SELECTOR_LABEL: &str = "machine";

/// Label naming the cluster on every machine
pub const CLUSTER_LABEL: &str = "system/cluster";

/// Label naming the project on every machine
pub const PROJECT_LABEL: &str = "system/project";

const FOREGROUND_DELETION_FINALIZER: &str = "foregroundDeletion";
const KUBELET_CONFIG_KEY: &str = "kubelet";
const NAME_SUFFIX_ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";
const NAME_SUFFIX_LENGTH: usize = 10;

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..NAME_SUFFIX_LENGTH)
        .map(|_| char::from(NAME_SUFFIX_ALPHABET[rng.random_range(0..NAME_SUFFIX_ALPHABET.len())]))
        .collect()
}

/// Name of the ConfigMap holding the kubelet configuration for a minor release
pub fn kubelet_config_map_name(version: &KubernetesVersion) -> String {
    format!("kubelet-config-{}", version.major_minor())
}

/// Converts a node deployment into a machine deployment for `cluster`
///
/// The datacenter must carry settings for the node's provider. The cloud and operating
/// system settings are completed from the cluster and datacenter, and the resulting
/// provider config is embedded into the machine template.
pub fn deployment(
    cluster: &Cluster,
    nd: &NodeDeployment,
    datacenter: &Datacenter,
    keys: &[UserSshKey],
) -> Result<MachineDeployment> {
    let template = &nd.spec.template;
    let cloud = template.cloud.as_ref().ok_or(Error::MissingCloudProvider)?;
    let provider = cloud.provider_type();
    if !datacenter.spec.offers(provider) {
        return Err(kkp_core::Error::UnknownCloudProvider(provider.to_string()).into());
    }
    let os_spec = template
        .operating_system
        .as_ref()
        .ok_or(Error::MissingOperatingSystem)?;
    let os = os_spec.operating_system();
    let cluster_name = cluster.name_any();

    let mut metadata = ObjectMeta {
        namespace: Some(SYSTEM_NAMESPACE.into()),
        finalizers: Some(vec![FOREGROUND_DELETION_FINALIZER.into()]),
        ..Default::default()
    };
    if nd.metadata.name.is_empty() {
        metadata.generate_name = Some(format!("{cluster_name}-worker-"));
    } else {
        metadata.name = Some(nd.metadata.name.clone());
    }
    let mut annotations = nd.metadata.annotations.clone();
    if let Some(profile) = datacenter.spec.default_operating_system_profiles.get(&os) {
        annotations
            .entry(OPERATING_SYSTEM_PROFILE_ANNOTATION.into())
            .or_insert_with(|| profile.clone());
    }
    if !cluster.spec.machine_networks.is_empty() {
        annotations.insert(INITIALIZERS_ANNOTATION.into(), "ipam".into());
    }
    metadata.annotations = Some(annotations).filter(|a| !a.is_empty());

    let selector = BTreeMap::from([(
        SELECTOR_LABEL.to_string(),
        format!("md-{cluster_name}-{}", random_suffix()),
    )]);
    let mut node_labels = template.labels.clone();
    node_labels.insert(CLUSTER_LABEL.into(), cluster_name.clone());
    if let Some(project) = cluster.project_id() {
        node_labels.insert(PROJECT_LABEL.into(), project.into());
    }

    let config_source = match nd.spec.dynamic_config {
        Some(true) => Some(kubelet_config_source(&template.versions.kubelet)?),
        _ => None,
    };

    let provider_spec = Builder::new()
        .cluster(cluster)
        .datacenter(datacenter)
        .cloud_provider(provider)
        .cloud_provider_spec(cloud_provider_spec_from_node(cloud, Some(cluster)))
        .operating_system_spec(os_config_from_api(os_spec, provider))
        .ssh_keys(keys)
        .build_provider_spec()?;

    debug!(
        name = ?metadata.name,
        generate_name = ?metadata.generate_name,
        selector = ?selector.get(SELECTOR_LABEL),
        %provider,
        %os,
        "converted node deployment"
    );
    Ok(MachineDeployment {
        types: Some(TypeMeta::resource::<MachineDeployment>()),
        metadata,
        spec: MachineDeploymentSpec {
            replicas: Some(nd.spec.replicas),
            selector: LabelSelector {
                match_labels: Some(selector.clone()),
                ..Default::default()
            },
            template: MachineTemplateSpec {
                metadata: ObjectMeta {
                    labels: Some(selector),
                    ..Default::default()
                },
                spec: MachineSpec {
                    metadata: ObjectMeta {
                        labels: Some(node_labels),
                        ..Default::default()
                    },
                    taints: template.taints.iter().map(taint).collect(),
                    provider_spec,
                    versions: MachineVersionInfo {
                        kubelet: template.versions.kubelet.clone(),
                    },
                    config_source,
                },
            },
            paused: nd.spec.paused.unwrap_or_default(),
        },
    })
}

/// Points the kubelet at the ConfigMap of its minor release
fn kubelet_config_source(kubelet: &str) -> Result<NodeConfigSource> {
    let version = KubernetesVersion::parse(kubelet).map_err(|source| Error::InvalidKubeletVersion {
        version: kubelet.into(),
        source,
    })?;
    if version.at_least(1, 24) {
        return Err(Error::DynamicConfigUnsupported(version));
    }
    Ok(NodeConfigSource {
        config_map: Some(ConfigMapNodeConfigSource {
            namespace: SYSTEM_NAMESPACE.into(),
            name: kubelet_config_map_name(&version),
            kubelet_config_key: KUBELET_CONFIG_KEY.into(),
        }),
    })
}

fn taint(spec: &TaintSpec) -> Taint {
    Taint {
        key: spec.key.clone(),
        value: Some(spec.value.clone()).filter(|v| !v.is_empty()),
        effect: spec.effect.clone(),
        time_added: None,
    }
}

/// Operating system settings of an envelope in the API shape
pub fn operating_system_spec_from_provider_config(config: &ProviderConfig) -> Result<OperatingSystemSpec> {
    Ok(api_spec_from_os_config(&config.operating_system_spec()?))
}

/// Converts a machine deployment back into the public node deployment shape
///
/// The provider settings are decoded from the embedded envelope, so completed values such
/// as platform tags show up in the result.
pub fn node_deployment(md: &MachineDeployment) -> Result<NodeDeployment> {
    let machine = &md.spec.template.spec;
    let config = ProviderConfig::from_provider_spec(&machine.provider_spec)?;
    let name = md.metadata.name.clone().unwrap_or_default();
    Ok(NodeDeployment {
        metadata: ApiObjectMeta {
            id: name.clone(),
            name,
            annotations: md.annotations().clone(),
            creation_timestamp: md.metadata.creation_timestamp.clone(),
            deletion_timestamp: md.metadata.deletion_timestamp.clone(),
        },
        spec: NodeDeploymentSpec {
            replicas: md.spec.replicas.unwrap_or_default(),
            template: NodeSpec {
                cloud: Some(node_cloud_spec_from_provider_config(&config)?),
                operating_system: Some(operating_system_spec_from_provider_config(&config)?),
                ssh_user_name: String::new(),
                versions: NodeVersionInfo {
                    kubelet: machine.versions.kubelet.clone(),
                },
                labels: machine.metadata.labels.clone().unwrap_or_default(),
                taints: machine
                    .taints
                    .iter()
                    .map(|t| TaintSpec {
                        key: t.key.clone(),
                        value: t.value.clone().unwrap_or_default(),
                        effect: t.effect.clone(),
                    })
                    .collect(),
            },
            paused: Some(md.spec.paused),
            dynamic_config: Some(machine.config_source.is_some()),
        },
    })
}
