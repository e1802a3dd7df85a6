//! Alibaba ECS instances
use kkp_core::{
    api::AlibabaNodeSpec, cloudprovider::alibaba::RawConfig, kubermatic::AlibabaDatacenterSpec, Cluster,
    OperatingSystem, ProviderType,
};

use super::require;
use crate::Result;

/// Maps the user owned settings
pub fn raw_config(spec: &AlibabaNodeSpec) -> RawConfig {
    RawConfig {
        instance_type: spec.instance_type.clone().into(),
        disk_size: spec.disk_size.clone().into(),
        disk_type: spec.disk_type.clone().into(),
        v_switch_id: spec.v_switch_id.clone().into(),
        internet_max_bandwidth_out: spec.internet_max_bandwidth_out.clone().into(),
        labels: spec.labels.clone(),
        zone_id: spec.zone_id.clone().into(),
        ..Default::default()
    }
}

/// Fills the region
pub fn complete(
    spec: Option<RawConfig>,
    _cluster: Option<&Cluster>,
    dc: &AlibabaDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();
    config.region_id.set_if_empty(dc.region.as_str());
    require(ProviderType::Alibaba, "region", &config.region_id)?;
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> AlibabaNodeSpec {
    AlibabaNodeSpec {
        instance_type: config.instance_type.value.clone(),
        disk_size: config.disk_size.value.clone(),
        disk_type: config.disk_type.value.clone(),
        v_switch_id: config.v_switch_id.value.clone(),
        internet_max_bandwidth_out: config.internet_max_bandwidth_out.value.clone(),
        labels: config.labels.clone(),
        zone_id: config.zone_id.value.clone(),
    }
}
