//! VMware Cloud Director virtual machines
use kkp_core::{
    api::VmwareCloudDirectorNodeSpec, cloudprovider::vmwareclouddirector::RawConfig,
    kubermatic::VmwareCloudDirectorDatacenterSpec, Cluster, OperatingSystem,
};

use crate::Result;

/// Disks at or below this size in GB are left to the template
const MIN_DISK_SIZE_GB: i64 = 4;

/// Maps the user owned settings
///
/// Disk sizes not above the template minimum and negative IOPS are dropped.
pub fn raw_config(spec: &VmwareCloudDirectorNodeSpec) -> RawConfig {
    RawConfig {
        cpus: i64::from(spec.cpus),
        cpu_cores: i64::from(spec.cpu_cores),
        memory_mb: i64::from(spec.memory_mb),
        disk_size_gb: spec.disk_size_gb.filter(|size| *size > MIN_DISK_SIZE_GB),
        disk_iops: spec.disk_iops.filter(|iops| *iops >= 0),
        template: spec.template.clone().into(),
        catalog: spec.catalog.clone().into(),
        storage_profile: Some(spec.storage_profile.clone()).filter(|p| !p.is_empty()),
        ip_allocation_mode: spec.ip_allocation_mode.clone(),
        vapp: spec.vapp.clone().into(),
        network: spec.network.clone().into(),
        metadata: Some(spec.metadata.clone()).filter(|m| !m.is_empty()),
        ..Default::default()
    }
}

/// Fills vApp, network, catalog and storage settings
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &VmwareCloudDirectorDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    if let Some(vcd) = cluster.and_then(|c| c.spec.cloud.vmwareclouddirector.as_ref()) {
        config.vapp.set_if_empty(vcd.vapp.as_str());
        config.network.set_if_empty(vcd.ovdc_network.as_str());
    }
    config.catalog.set_if_empty(dc.default_catalog.as_str());
    if let Some(template) = dc.templates.get(&os) {
        config.template.set_if_empty(template.as_str());
    }
    if config.storage_profile.is_none() && !dc.default_storage_profile.is_empty() {
        config.storage_profile = Some(dc.default_storage_profile.clone());
    }
    config.allow_insecure.set_if_empty(dc.allow_insecure);
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> VmwareCloudDirectorNodeSpec {
    VmwareCloudDirectorNodeSpec {
        cpus: i32::try_from(config.cpus).unwrap_or(i32::MAX),
        cpu_cores: i32::try_from(config.cpu_cores).unwrap_or(i32::MAX),
        memory_mb: i32::try_from(config.memory_mb).unwrap_or(i32::MAX),
        disk_size_gb: config.disk_size_gb,
        disk_iops: config.disk_iops,
        template: config.template.value.clone(),
        catalog: config.catalog.value.clone(),
        storage_profile: config.storage_profile.clone().unwrap_or_default(),
        ip_allocation_mode: config.ip_allocation_mode.clone(),
        vapp: config.vapp.value.clone(),
        network: config.network.value.clone(),
        metadata: config.metadata.clone().unwrap_or_default(),
    }
}
