//! DigitalOcean settings as read by the machine controller
use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for a droplet
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RawConfig {
    pub region: ConfigVarString,
    pub size: ConfigVarString,
    pub backups: ConfigVarBool,
    pub ipv6: ConfigVarBool,
    pub private_networking: ConfigVarBool,
    pub monitoring: ConfigVarBool,
    pub tags: Vec<ConfigVarString>,
}
