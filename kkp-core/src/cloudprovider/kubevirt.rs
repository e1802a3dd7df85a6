//! KubeVirt settings as read by the machine controller
use k8s_openapi::api::core::v1::PodDNSConfig;
use serde::{Deserialize, Serialize};

use crate::providerconfig::ConfigVarString;

/// Settings for a KubeVirt virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub virtual_machine: VirtualMachine,
    pub affinity: Affinity,
}

/// The virtual machine itself
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachine {
    pub flavor: Flavor,
    pub template: Template,
    #[serde(rename = "dnsPolicy")]
    pub dns_policy: ConfigVarString,
    #[serde(rename = "dnsConfig", skip_serializing_if = "Option::is_none")]
    pub dns_config: Option<PodDNSConfig>,
}

/// Named sizing preset
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Flavor {
    pub name: ConfigVarString,
    pub profile: ConfigVarString,
}

/// Explicit sizing and disks
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    pub cpus: ConfigVarString,
    pub memory: ConfigVarString,
    pub primary_disk: PrimaryDisk,
    pub secondary_disks: Vec<SecondaryDisk>,
}

/// The boot disk
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryDisk {
    pub size: ConfigVarString,
    pub storage_class_name: ConfigVarString,
    /// A URL or a `<namespace>/<name>` DataVolume reference
    pub os_image: ConfigVarString,
}

/// An additional disk
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondaryDisk {
    pub size: ConfigVarString,
    pub storage_class_name: ConfigVarString,
}

/// Scheduling presets
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Affinity {
    pub pod_affinity_preset: ConfigVarString,
    pub pod_anti_affinity_preset: ConfigVarString,
    pub node_affinity_preset: NodeAffinityPreset,
}

/// Node affinity preset
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NodeAffinityPreset {
    #[serde(rename = "type")]
    pub preset_type: ConfigVarString,
    pub key: ConfigVarString,
    pub values: Vec<ConfigVarString>,
}
