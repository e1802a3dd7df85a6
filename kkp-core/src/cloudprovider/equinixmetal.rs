//! Equinix Metal settings as read by the machine controller
use serde::{Deserialize, Serialize};

use crate::providerconfig::ConfigVarString;

/// Settings for a bare-metal device
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub instance_type: ConfigVarString,
    pub metro: ConfigVarString,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facilities: Vec<ConfigVarString>,
    pub billing_cycle: ConfigVarString,
    pub tags: Vec<ConfigVarString>,
}
