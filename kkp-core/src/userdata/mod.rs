//! Operating system settings in the machine-controller dialect.
use derive_more::From;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{providerconfig::OperatingSystem, Error, Result};

/// How a Flatcar node receives its provisioning data
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProvisioningUtility {
    /// Ignition config
    #[serde(rename = "ignition")]
    Ignition,
    /// cloud-init user data
    #[serde(rename = "cloud-init")]
    CloudInit,
}

/// Settings shared by the distributions that only support boot-time upgrades
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DistUpgradeConfig {
    /// Run a distribution upgrade on first boot
    pub dist_upgrade_on_boot: bool,
}

/// Red Hat Enterprise Linux settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RhelConfig {
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
    /// Attach a subscription on registration
    pub attach_subscription: bool,
}

/// Flatcar settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatcarConfig {
    /// Disable the update engine and locksmith entirely
    pub disable_auto_update: bool,
    /// Disable only the reboot coordinator
    #[serde(rename = "disableLocksmithD")]
    pub disable_locksmithd: bool,
    /// Disable only the update engine
    pub disable_update_engine: bool,
    /// How the node receives its provisioning data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_utility: Option<ProvisioningUtility>,
}

/// The `operatingSystemSpec` of a [`ProviderConfig`](crate::ProviderConfig)
///
/// Like [`CloudProviderSpec`](crate::CloudProviderSpec) this is untagged on the wire.
#[derive(Clone, Debug, PartialEq, Eq, From)]
pub enum OperatingSystemConfig {
    /// Ubuntu
    #[from(skip)]
    Ubuntu(DistUpgradeConfig),
    /// CentOS
    #[from(skip)]
    Centos(DistUpgradeConfig),
    /// Amazon Linux 2
    #[from(skip)]
    AmazonLinux2(DistUpgradeConfig),
    /// Red Hat Enterprise Linux
    Rhel(RhelConfig),
    /// Flatcar Container Linux
    Flatcar(FlatcarConfig),
    /// Rocky Linux
    #[from(skip)]
    RockyLinux(DistUpgradeConfig),
}

variant_accessors!(OperatingSystemConfig {
    Rhel(RhelConfig) => rhel, into_rhel;
    Flatcar(FlatcarConfig) => flatcar, into_flatcar;
});

impl OperatingSystemConfig {
    /// The operating system tag to put next to this spec
    pub fn operating_system(&self) -> OperatingSystem {
        match self {
            Self::Ubuntu(_) => OperatingSystem::Ubuntu,
            Self::Centos(_) => OperatingSystem::Centos,
            Self::AmazonLinux2(_) => OperatingSystem::AmazonLinux2,
            Self::Rhel(_) => OperatingSystem::Rhel,
            Self::Flatcar(_) => OperatingSystem::Flatcar,
            Self::RockyLinux(_) => OperatingSystem::RockyLinux,
        }
    }

    /// The boot-upgrade settings of the distributions that have nothing else
    pub fn dist_upgrade(&self) -> Option<&DistUpgradeConfig> {
        match self {
            Self::Ubuntu(c) | Self::Centos(c) | Self::AmazonLinux2(c) | Self::RockyLinux(c) => Some(c),
            Self::Rhel(_) | Self::Flatcar(_) => None,
        }
    }

    /// Decodes an untagged spec for the given operating system
    pub fn from_raw(os: OperatingSystem, value: &Value) -> Result<Self> {
        let empty = Value::Object(Default::default());
        let value = if value.is_null() { &empty } else { value };
        let err = |e| Error::SerdeError(e, "operatingSystemSpec");
        Ok(match os {
            OperatingSystem::Ubuntu => Self::Ubuntu(DistUpgradeConfig::deserialize(value).map_err(err)?),
            OperatingSystem::Centos => Self::Centos(DistUpgradeConfig::deserialize(value).map_err(err)?),
            OperatingSystem::AmazonLinux2 => {
                Self::AmazonLinux2(DistUpgradeConfig::deserialize(value).map_err(err)?)
            }
            OperatingSystem::Rhel => Self::Rhel(RhelConfig::deserialize(value).map_err(err)?),
            OperatingSystem::Flatcar => Self::Flatcar(FlatcarConfig::deserialize(value).map_err(err)?),
            OperatingSystem::RockyLinux => {
                Self::RockyLinux(DistUpgradeConfig::deserialize(value).map_err(err)?)
            }
        })
    }
}

impl Serialize for OperatingSystemConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Ubuntu(c) | Self::Centos(c) | Self::AmazonLinux2(c) | Self::RockyLinux(c) => {
                c.serialize(serializer)
            }
            Self::Rhel(c) => c.serialize(serializer),
            Self::Flatcar(c) => c.serialize(serializer),
        }
    }
}
