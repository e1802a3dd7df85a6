//! Anexia Engine settings as read by the machine controller
use serde::{Deserialize, Serialize};

use crate::providerconfig::ConfigVarString;

/// Settings for an Anexia virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(rename = "vlanID")]
    pub vlan_id: ConfigVarString,
    #[serde(rename = "templateID")]
    pub template_id: ConfigVarString,
    #[serde(rename = "locationID")]
    pub location_id: ConfigVarString,
    pub cpus: i32,
    pub memory: i64,
    /// Deprecated single disk size, superseded by `disks`
    #[serde(skip_serializing_if = "is_zero")]
    pub disk_size: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<RawDisk>,
}

/// A disk attached to the virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDisk {
    pub size: i64,
    #[serde(skip_serializing_if = "ConfigVarString::is_empty")]
    pub performance_type: ConfigVarString,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}
