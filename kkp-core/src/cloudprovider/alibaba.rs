//! Alibaba Cloud settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::ConfigVarString;

/// Settings for an ECS instance
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub instance_type: ConfigVarString,
    #[serde(rename = "regionID")]
    pub region_id: ConfigVarString,
    #[serde(rename = "vSwitchID")]
    pub v_switch_id: ConfigVarString,
    #[serde(rename = "zoneID")]
    pub zone_id: ConfigVarString,
    pub internet_max_bandwidth_out: ConfigVarString,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub disk_type: ConfigVarString,
    pub disk_size: ConfigVarString,
}
