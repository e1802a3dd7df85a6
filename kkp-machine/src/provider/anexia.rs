//! Anexia Engine virtual machines
use kkp_core::{
    api::{AnexiaDiskConfig, AnexiaNodeSpec},
    cloudprovider::anexia::{RawConfig, RawDisk},
    kubermatic::AnexiaDatacenterSpec,
    Cluster, OperatingSystem, ProviderType,
};

use super::require;
use crate::Result;

/// Maps the user owned settings
///
/// An unset disk size is encoded as zero.
pub fn raw_config(spec: &AnexiaNodeSpec) -> RawConfig {
    RawConfig {
        vlan_id: spec.vlan_id.clone().into(),
        template_id: spec.template_id.clone().into(),
        cpus: spec.cpus,
        memory: spec.memory,
        disk_size: spec.disk_size.unwrap_or_default(),
        disks: spec
            .disks
            .iter()
            .map(|d| RawDisk {
                size: d.size,
                performance_type: d.performance_type.clone().unwrap_or_default().into(),
            })
            .collect(),
        ..Default::default()
    }
}

/// Fills the location
pub fn complete(
    spec: Option<RawConfig>,
    _cluster: Option<&Cluster>,
    dc: &AnexiaDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();
    config.location_id.set_if_empty(dc.location_id.as_str());
    require(ProviderType::Anexia, "location", &config.location_id)?;
    Ok(config)
}

/// Maps back the user owned settings, a zero disk size as unset
pub fn node_spec(config: &RawConfig) -> AnexiaNodeSpec {
    AnexiaNodeSpec {
        vlan_id: config.vlan_id.value.clone(),
        template_id: config.template_id.value.clone(),
        cpus: config.cpus,
        memory: config.memory,
        disk_size: (config.disk_size != 0).then_some(config.disk_size),
        disks: config
            .disks
            .iter()
            .map(|d| AnexiaDiskConfig {
                size: d.size,
                performance_type: (!d.performance_type.is_empty()).then(|| d.performance_type.value.clone()),
            })
            .collect(),
    }
}
