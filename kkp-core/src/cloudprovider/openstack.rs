//! OpenStack settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for an OpenStack server
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub identity_endpoint: ConfigVarString,
    pub region: ConfigVarString,
    pub availability_zone: ConfigVarString,
    pub flavor: ConfigVarString,
    pub image: ConfigVarString,
    pub security_groups: Vec<ConfigVarString>,
    pub network: ConfigVarString,
    pub subnet: ConfigVarString,
    pub floating_ip_pool: ConfigVarString,
    pub trust_device_path: ConfigVarBool,
    #[serde(rename = "rootDiskSizeGB", skip_serializing_if = "Option::is_none")]
    pub root_disk_size_gb: Option<i32>,
    pub server_group: ConfigVarString,
    pub instance_ready_check_period: ConfigVarString,
    pub instance_ready_check_timeout: ConfigVarString,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}
