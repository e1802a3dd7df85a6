//! Nutanix settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for a Nutanix virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub cluster_name: ConfigVarString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<ConfigVarString>,
    pub subnet_name: ConfigVarString,
    pub image_name: ConfigVarString,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, String>,
    pub cpus: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_passthrough: Option<bool>,
    #[serde(rename = "memoryMB")]
    pub memory_mb: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<i64>,
    pub allow_insecure: ConfigVarBool,
}
