use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{userdata::ProvisioningUtility, OperatingSystem};

/// Operating system settings for a node, exactly one operating system per spec
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, From)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystemSpec {
    /// Ubuntu
    Ubuntu(UbuntuSpec),
    /// Amazon Linux 2
    #[serde(rename = "amzn2")]
    AmazonLinux(AmazonLinuxSpec),
    /// CentOS
    Centos(CentosSpec),
    /// Red Hat Enterprise Linux
    Rhel(RhelSpec),
    /// Flatcar Container Linux
    Flatcar(FlatcarSpec),
    /// Rocky Linux
    RockyLinux(RockyLinuxSpec),
}

variant_accessors!(OperatingSystemSpec {
    Ubuntu(UbuntuSpec) => ubuntu, into_ubuntu;
    AmazonLinux(AmazonLinuxSpec) => amazon_linux, into_amazon_linux;
    Centos(CentosSpec) => centos, into_centos;
    Rhel(RhelSpec) => rhel, into_rhel;
    Flatcar(FlatcarSpec) => flatcar, into_flatcar;
    RockyLinux(RockyLinuxSpec) => rocky_linux, into_rocky_linux;
});

impl OperatingSystemSpec {
    /// The operating system this spec is for
    pub fn operating_system(&self) -> OperatingSystem {
        match self {
            Self::Ubuntu(_) => OperatingSystem::Ubuntu,
            Self::AmazonLinux(_) => OperatingSystem::AmazonLinux2,
            Self::Centos(_) => OperatingSystem::Centos,
            Self::Rhel(_) => OperatingSystem::Rhel,
            Self::Flatcar(_) => OperatingSystem::Flatcar,
            Self::RockyLinux(_) => OperatingSystem::RockyLinux,
        }
    }
}

/// Ubuntu settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UbuntuSpec {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
}

/// Amazon Linux 2 settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AmazonLinuxSpec {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
}

/// CentOS settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CentosSpec {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
}

/// Red Hat Enterprise Linux settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RhelSpec {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
    /// Subscription manager user
    #[serde(rename = "rhelSubscriptionManagerUser", skip_serializing_if = "String::is_empty")]
    pub subscription_manager_user: String,
    /// Subscription manager password
    #[serde(
        rename = "rhelSubscriptionManagerPassword",
        skip_serializing_if = "String::is_empty"
    )]
    pub subscription_manager_password: String,
    /// Offline token used to register the system
    #[serde(rename = "rhsmOfflineToken", skip_serializing_if = "String::is_empty")]
    pub offline_token: String,
}

/// Flatcar settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatcarSpec {
    /// Disable automatic updates
    pub disable_auto_update: bool,
    /// How the node is provisioned, chosen per provider when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_utility: Option<ProvisioningUtility>,
}

/// Rocky Linux settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RockyLinuxSpec {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_keys() {
        for (json, os) in [
            (r#"{"ubuntu":{}}"#, OperatingSystem::Ubuntu),
            (r#"{"amzn2":{}}"#, OperatingSystem::AmazonLinux2),
            (r#"{"centos":{}}"#, OperatingSystem::Centos),
            (r#"{"rhel":{}}"#, OperatingSystem::Rhel),
            (r#"{"flatcar":{}}"#, OperatingSystem::Flatcar),
            (r#"{"rockylinux":{}}"#, OperatingSystem::RockyLinux),
        ] {
            let spec: OperatingSystemSpec = serde_json::from_str(json).unwrap();
            assert_eq!(spec.operating_system(), os);
            assert_eq!(serde_json::to_value(&spec).unwrap().as_object().unwrap().len(), 1);
        }
    }

    #[test]
    fn flatcar_utility() {
        let spec: OperatingSystemSpec =
            serde_json::from_str(r#"{"flatcar":{"disableAutoUpdate":true,"provisioningUtility":"cloud-init"}}"#)
                .unwrap();
        let flatcar = spec.flatcar().unwrap();
        assert!(flatcar.disable_auto_update);
        assert_eq!(flatcar.provisioning_utility, Some(ProvisioningUtility::CloudInit));
    }
}
