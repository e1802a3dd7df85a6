//! VMware Cloud Director settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for a Cloud Director virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(rename = "vapp")]
    pub vapp: ConfigVarString,
    pub template: ConfigVarString,
    pub catalog: ConfigVarString,
    pub network: ConfigVarString,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip_allocation_mode: String,
    pub cpus: i64,
    pub cpu_cores: i64,
    #[serde(rename = "memoryMB")]
    pub memory_mb: i64,
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    #[serde(rename = "diskIOPS", skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    pub allow_insecure: ConfigVarBool,
}
