//! vSphere settings as read by the machine controller
use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for a vSphere virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(rename = "templateVMName")]
    pub template_vm_name: ConfigVarString,
    #[serde(rename = "vmNetName")]
    pub vm_net_name: ConfigVarString,
    pub datacenter: ConfigVarString,
    pub cluster: ConfigVarString,
    pub folder: ConfigVarString,
    pub resource_pool: ConfigVarString,
    pub datastore: ConfigVarString,
    pub datastore_cluster: ConfigVarString,
    pub allow_insecure: ConfigVarBool,
    pub cpus: i32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: i64,
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// A tag attached to the virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "categoryID")]
    pub category_id: String,
}
