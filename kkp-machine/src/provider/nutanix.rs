//! Nutanix virtual machines
use kkp_core::{
    api::NutanixNodeSpec, cloudprovider::nutanix::RawConfig, kubermatic::NutanixDatacenterSpec, Cluster,
    OperatingSystem,
};

use super::{cluster_name, project_id};
use crate::Result;

/// Nutanix project every account has, never set explicitly
const DEFAULT_PROJECT: &str = "default";

/// Maps the user owned settings
pub fn raw_config(spec: &NutanixNodeSpec) -> RawConfig {
    RawConfig {
        subnet_name: spec.subnet_name.clone().into(),
        image_name: spec.image_name.clone().into(),
        categories: spec.categories.clone(),
        cpus: spec.cpus,
        cpu_cores: spec.cpu_cores,
        cpu_passthrough: spec.cpu_passthrough,
        memory_mb: spec.memory_mb,
        disk_size: spec.disk_size,
        ..Default::default()
    }
}

/// Fills the Prism cluster, project, image and the platform categories
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &NutanixDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    if let Some(nutanix) = cluster.and_then(|c| c.spec.cloud.nutanix.as_ref()) {
        config.cluster_name.set_if_empty(nutanix.cluster_name.as_str());
        let project = nutanix.project_name.as_str();
        if config.project_name.is_none() && !project.is_empty() && project != DEFAULT_PROJECT {
            config.project_name = Some(project.into());
        }
    }
    config.allow_insecure.set_if_empty(dc.allow_insecure);
    if let Some(image) = dc.images.get(&os) {
        config.image_name.set_if_empty(image.as_str());
    }

    if let Some(name) = cluster_name(cluster) {
        config.categories.insert("KKPCluster".into(), format!("kubernetes-{name}"));
    }
    if let Some(project) = project_id(cluster) {
        config.categories.insert("KKPProject".into(), project.into());
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> NutanixNodeSpec {
    NutanixNodeSpec {
        subnet_name: config.subnet_name.value.clone(),
        image_name: config.image_name.value.clone(),
        categories: config.categories.clone(),
        cpus: config.cpus,
        cpu_cores: config.cpu_cores,
        cpu_passthrough: config.cpu_passthrough,
        memory_mb: config.memory_mb,
        disk_size: config.disk_size,
    }
}
