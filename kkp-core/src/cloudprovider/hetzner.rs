//! Hetzner Cloud settings as read by the machine controller
use serde::{Deserialize, Serialize};

use crate::providerconfig::ConfigVarString;

/// Settings for a Hetzner server
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub server_type: ConfigVarString,
    pub datacenter: ConfigVarString,
    pub image: ConfigVarString,
    pub location: ConfigVarString,
    pub networks: Vec<ConfigVarString>,
}
