//! Azure virtual machines
use kkp_core::{
    api::AzureNodeSpec, cloudprovider::azure::RawConfig, kubermatic::AzureDatacenterSpec, Cluster,
    OperatingSystem, ProviderType,
};

use super::{cluster_name, project_id, require};
use crate::Result;

/// Maps the user owned settings
pub fn raw_config(spec: &AzureNodeSpec) -> RawConfig {
    RawConfig {
        vm_size: spec.size.clone().into(),
        assign_public_ip: spec.assign_public_ip.into(),
        assign_availability_set: spec.assign_availability_set.then_some(true),
        tags: spec.tags.clone(),
        os_disk_size: spec.os_disk_size,
        data_disk_size: spec.data_disk_size,
        zones: spec.zones.clone(),
        image_id: spec.image_id.clone().into(),
        ..Default::default()
    }
}

/// Fills location, image and the cluster's network resources
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &AzureDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.location.set_if_empty(dc.location.as_str());
    require(ProviderType::Azure, "location", &config.location)?;
    if let Some(image) = dc.images.get(&os) {
        config.image_id.set_if_empty(image.as_str());
    }

    if let Some(azure) = cluster.and_then(|c| c.spec.cloud.azure.as_ref()) {
        config.resource_group.set_if_empty(azure.resource_group.as_str());
        config
            .vnet_resource_group
            .set_if_empty(azure.vnet_resource_group.as_str());
        config.vnet_name.set_if_empty(azure.vnet_name.as_str());
        config.subnet_name.set_if_empty(azure.subnet_name.as_str());
        config.route_table_name.set_if_empty(azure.route_table_name.as_str());
        config.availability_set.set_if_empty(azure.availability_set.as_str());
        config.security_group_name.set_if_empty(azure.security_group.as_str());
        if config.assign_availability_set.is_none() {
            config.assign_availability_set = azure.assign_availability_set;
        }
    }
    config.assign_public_ip.set_if_empty(false);

    if let Some(name) = cluster_name(cluster) {
        config.tags.insert("KubernetesCluster".into(), name.clone());
        config.tags.insert("system-cluster".into(), name);
    }
    if let Some(project) = project_id(cluster) {
        config.tags.insert("system-project".into(), project.into());
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> AzureNodeSpec {
    AzureNodeSpec {
        size: config.vm_size.value.clone(),
        assign_public_ip: config.assign_public_ip.is_true(),
        tags: config.tags.clone(),
        os_disk_size: config.os_disk_size,
        data_disk_size: config.data_disk_size,
        zones: config.zones.clone(),
        image_id: config.image_id.value.clone(),
        assign_availability_set: config.assign_availability_set.unwrap_or_default(),
    }
}
