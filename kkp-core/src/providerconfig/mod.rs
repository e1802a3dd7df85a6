//! The provider-agnostic envelope consumed by the machine controller.
//!
//! A [`ProviderConfig`] is embedded as raw JSON in
//! `MachineDeployment.spec.template.spec.providerSpec.value`. Its `cloudProviderSpec` and
//! `operatingSystemSpec` are opaque to the envelope; their shape is selected by the
//! `cloudProvider` and `operatingSystem` tags.
use std::{fmt, str::FromStr};

use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use serde::{Deserialize, Serialize};

use crate::{
    cloudprovider::CloudProviderSpec, machine::ProviderSpec, userdata::OperatingSystemConfig, Error,
    ProviderType, Result,
};

mod configvar;
pub use configvar::{ConfigVarBool, ConfigVarString, GlobalConfigMapKeySelector, GlobalSecretKeySelector};

/// Cloud provider identifiers understood by the machine controller
///
/// These differ from the platform's own [`ProviderType`] names in places
/// (`google` vs `gcp`, `equinixmetal` vs `packet`, `vmware-cloud-director` vs
/// `vmwareclouddirector`); use the `From` conversions to move between the two.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CloudProvider {
    /// `digitalocean`
    #[serde(rename = "digitalocean")]
    Digitalocean,
    /// `aws`
    #[serde(rename = "aws")]
    Aws,
    /// `azure`
    #[serde(rename = "azure")]
    Azure,
    /// `openstack`
    #[serde(rename = "openstack")]
    Openstack,
    /// `equinixmetal`, formerly `packet`
    #[serde(rename = "equinixmetal", alias = "packet")]
    EquinixMetal,
    /// `hetzner`
    #[serde(rename = "hetzner")]
    Hetzner,
    /// `vsphere`
    #[serde(rename = "vsphere")]
    Vsphere,
    /// `google`
    #[serde(rename = "google")]
    Google,
    /// `kubevirt`
    #[serde(rename = "kubevirt")]
    Kubevirt,
    /// `alibaba`
    #[serde(rename = "alibaba")]
    Alibaba,
    /// `anexia`
    #[serde(rename = "anexia")]
    Anexia,
    /// `nutanix`
    #[serde(rename = "nutanix")]
    Nutanix,
    /// `vmware-cloud-director`
    #[serde(rename = "vmware-cloud-director")]
    VmwareCloudDirector,
}

impl CloudProvider {
    /// Every supported provider
    pub const ALL: [CloudProvider; 13] = [
        CloudProvider::Digitalocean,
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::Openstack,
        CloudProvider::EquinixMetal,
        CloudProvider::Hetzner,
        CloudProvider::Vsphere,
        CloudProvider::Google,
        CloudProvider::Kubevirt,
        CloudProvider::Alibaba,
        CloudProvider::Anexia,
        CloudProvider::Nutanix,
        CloudProvider::VmwareCloudDirector,
    ];

    /// The wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Digitalocean => "digitalocean",
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Openstack => "openstack",
            CloudProvider::EquinixMetal => "equinixmetal",
            CloudProvider::Hetzner => "hetzner",
            CloudProvider::Vsphere => "vsphere",
            CloudProvider::Google => "google",
            CloudProvider::Kubevirt => "kubevirt",
            CloudProvider::Alibaba => "alibaba",
            CloudProvider::Anexia => "anexia",
            CloudProvider::Nutanix => "nutanix",
            CloudProvider::VmwareCloudDirector => "vmware-cloud-director",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "packet" {
            return Ok(CloudProvider::EquinixMetal);
        }
        CloudProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownCloudProvider(s.into()))
    }
}

impl From<ProviderType> for CloudProvider {
    fn from(provider: ProviderType) -> Self {
        match provider {
            ProviderType::Digitalocean => CloudProvider::Digitalocean,
            ProviderType::Aws => CloudProvider::Aws,
            ProviderType::Azure => CloudProvider::Azure,
            ProviderType::Openstack => CloudProvider::Openstack,
            ProviderType::Packet => CloudProvider::EquinixMetal,
            ProviderType::Hetzner => CloudProvider::Hetzner,
            ProviderType::Vsphere => CloudProvider::Vsphere,
            ProviderType::Gcp => CloudProvider::Google,
            ProviderType::Kubevirt => CloudProvider::Kubevirt,
            ProviderType::Alibaba => CloudProvider::Alibaba,
            ProviderType::Anexia => CloudProvider::Anexia,
            ProviderType::Nutanix => CloudProvider::Nutanix,
            ProviderType::VmwareCloudDirector => CloudProvider::VmwareCloudDirector,
        }
    }
}

impl From<CloudProvider> for ProviderType {
    fn from(provider: CloudProvider) -> Self {
        match provider {
            CloudProvider::Digitalocean => ProviderType::Digitalocean,
            CloudProvider::Aws => ProviderType::Aws,
            CloudProvider::Azure => ProviderType::Azure,
            CloudProvider::Openstack => ProviderType::Openstack,
            CloudProvider::EquinixMetal => ProviderType::Packet,
            CloudProvider::Hetzner => ProviderType::Hetzner,
            CloudProvider::Vsphere => ProviderType::Vsphere,
            CloudProvider::Google => ProviderType::Gcp,
            CloudProvider::Kubevirt => ProviderType::Kubevirt,
            CloudProvider::Alibaba => ProviderType::Alibaba,
            CloudProvider::Anexia => ProviderType::Anexia,
            CloudProvider::Nutanix => ProviderType::Nutanix,
            CloudProvider::VmwareCloudDirector => ProviderType::VmwareCloudDirector,
        }
    }
}

/// Operating systems understood by the machine controller
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatingSystem {
    /// `ubuntu`
    #[serde(rename = "ubuntu")]
    Ubuntu,
    /// `centos`
    #[serde(rename = "centos")]
    Centos,
    /// `amzn2`
    #[serde(rename = "amzn2")]
    AmazonLinux2,
    /// `rhel`
    #[serde(rename = "rhel")]
    Rhel,
    /// `flatcar`
    #[serde(rename = "flatcar")]
    Flatcar,
    /// `rockylinux`
    #[serde(rename = "rockylinux")]
    RockyLinux,
}

impl OperatingSystem {
    /// Every supported operating system
    pub const ALL: [OperatingSystem; 6] = [
        OperatingSystem::Ubuntu,
        OperatingSystem::Centos,
        OperatingSystem::AmazonLinux2,
        OperatingSystem::Rhel,
        OperatingSystem::Flatcar,
        OperatingSystem::RockyLinux,
    ];

    /// The wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu => "ubuntu",
            OperatingSystem::Centos => "centos",
            OperatingSystem::AmazonLinux2 => "amzn2",
            OperatingSystem::Rhel => "rhel",
            OperatingSystem::Flatcar => "flatcar",
            OperatingSystem::RockyLinux => "rockylinux",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OperatingSystem::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| Error::UnknownOperatingSystem(s.into()))
    }
}

/// IP families a machine can be provisioned with
///
/// Machines always get IPv4. Single stack IPv6 is not offered.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpFamily {
    /// IPv4 only
    #[serde(rename = "IPv4")]
    Ipv4,
    /// Dual stack, IPv4 preferred
    #[serde(rename = "IPv4+IPv6")]
    DualStack,
}

/// DNS settings of a machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DnsConfig {
    /// Nameservers
    #[serde(default)]
    pub servers: Vec<String>,
}

/// Network settings of a machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Static address in CIDR notation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cidr: String,
    /// Default gateway
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway: String,
    /// DNS settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsConfig>,
    /// IP family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_family: Option<IpFamily>,
}

impl NetworkConfig {
    /// Whether no setting is present
    pub fn is_empty(&self) -> bool {
        self == &NetworkConfig::default()
    }
}

/// The envelope handed to the machine controller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Authorized ssh keys, sorted and free of duplicates
    #[serde(default)]
    pub ssh_public_keys: Vec<String>,
    /// Which provider `cloud_provider_spec` is for
    pub cloud_provider: CloudProvider,
    /// Provider specific settings
    #[serde(default)]
    pub cloud_provider_spec: RawExtension,
    /// Which operating system `operating_system_spec` is for
    pub operating_system: OperatingSystem,
    /// Operating system specific settings
    #[serde(default)]
    pub operating_system_spec: RawExtension,
    /// Network settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfig>,
}

impl ProviderConfig {
    /// Assembles an envelope, encoding both specs under their tags
    pub fn new(
        cloud: &CloudProviderSpec,
        os: &OperatingSystemConfig,
        ssh_public_keys: Vec<String>,
        network: Option<NetworkConfig>,
    ) -> Result<Self> {
        Ok(ProviderConfig {
            ssh_public_keys,
            cloud_provider: cloud.cloud_provider(),
            cloud_provider_spec: RawExtension(
                serde_json::to_value(cloud).map_err(|e| Error::SerdeError(e, "cloudProviderSpec"))?,
            ),
            operating_system: os.operating_system(),
            operating_system_spec: RawExtension(
                serde_json::to_value(os).map_err(|e| Error::SerdeError(e, "operatingSystemSpec"))?,
            ),
            network,
        })
    }

    /// Decodes the provider specific settings according to `cloud_provider`
    pub fn cloud_provider_spec(&self) -> Result<CloudProviderSpec> {
        CloudProviderSpec::from_raw(self.cloud_provider, &self.cloud_provider_spec.0)
    }

    /// Decodes the operating system specific settings according to `operating_system`
    pub fn operating_system_spec(&self) -> Result<OperatingSystemConfig> {
        OperatingSystemConfig::from_raw(self.operating_system, &self.operating_system_spec.0)
    }

    /// Wraps the envelope for embedding into a machine template
    pub fn to_provider_spec(&self) -> Result<ProviderSpec> {
        let value = serde_json::to_value(self).map_err(|e| Error::SerdeError(e, "providerSpec"))?;
        Ok(ProviderSpec {
            value: Some(RawExtension(value)),
        })
    }

    /// Unwraps an envelope embedded in a machine template
    pub fn from_provider_spec(spec: &ProviderSpec) -> Result<Self> {
        let value = spec.value.as_ref().ok_or(Error::EmptyProviderSpec)?;
        serde_json::from_value(value.0.clone()).map_err(|e| Error::SerdeError(e, "providerSpec"))
    }
}
