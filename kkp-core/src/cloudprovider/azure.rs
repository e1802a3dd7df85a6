//! Azure settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for an Azure virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub location: ConfigVarString,
    pub resource_group: ConfigVarString,
    pub vnet_resource_group: ConfigVarString,
    pub vm_size: ConfigVarString,
    pub os_disk_size: i32,
    pub data_disk_size: i32,
    pub vnet_name: ConfigVarString,
    pub subnet_name: ConfigVarString,
    pub route_table_name: ConfigVarString,
    pub availability_set: ConfigVarString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_availability_set: Option<bool>,
    pub security_group_name: ConfigVarString,
    pub zones: Vec<String>,
    #[serde(rename = "imageID")]
    pub image_id: ConfigVarString,
    #[serde(rename = "assignPublicIP")]
    pub assign_public_ip: ConfigVarBool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}
