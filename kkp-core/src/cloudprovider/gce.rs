//! Google Compute Engine settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for a GCE instance
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub zone: ConfigVarString,
    pub machine_type: ConfigVarString,
    pub disk_size: i64,
    pub disk_type: ConfigVarString,
    pub network: ConfigVarString,
    pub subnetwork: ConfigVarString,
    pub preemptible: ConfigVarBool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "assignPublicIPAddress", skip_serializing_if = "Option::is_none")]
    pub assign_public_ip_address: Option<ConfigVarBool>,
    #[serde(rename = "multizone")]
    pub multi_zone: ConfigVarBool,
    pub regional: ConfigVarBool,
    pub custom_image: ConfigVarString,
}
