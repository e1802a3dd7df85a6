//! Provider specific settings in the machine-controller dialect.
//!
//! Each submodule holds the `RawConfig` for one [`CloudProvider`]. Most fields are
//! [`ConfigVarString`](crate::providerconfig::ConfigVarString) or
//! [`ConfigVarBool`](crate::providerconfig::ConfigVarBool) so the controller can resolve
//! them from secrets at runtime; the values produced here are always inline literals.
use derive_more::From;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{providerconfig::CloudProvider, Error, Result};

pub mod alibaba;
pub mod anexia;
pub mod aws;
pub mod azure;
pub mod digitalocean;
pub mod equinixmetal;
pub mod gce;
pub mod hetzner;
pub mod kubevirt;
pub mod nutanix;
pub mod openstack;
pub mod vmwareclouddirector;
pub mod vsphere;

/// The `cloudProviderSpec` of a [`ProviderConfig`](crate::ProviderConfig)
///
/// The wire format carries no tag of its own; the provider is named by the surrounding
/// envelope, so decoding goes through [`CloudProviderSpec::from_raw`].
#[derive(Clone, Debug, PartialEq, From)]
pub enum CloudProviderSpec {
    /// DigitalOcean
    Digitalocean(digitalocean::RawConfig),
    /// AWS
    Aws(aws::RawConfig),
    /// Azure
    Azure(azure::RawConfig),
    /// OpenStack
    Openstack(openstack::RawConfig),
    /// Equinix Metal
    EquinixMetal(equinixmetal::RawConfig),
    /// Hetzner
    Hetzner(hetzner::RawConfig),
    /// vSphere
    Vsphere(vsphere::RawConfig),
    /// Google Compute Engine
    Google(gce::RawConfig),
    /// KubeVirt
    Kubevirt(kubevirt::RawConfig),
    /// Alibaba
    Alibaba(alibaba::RawConfig),
    /// Anexia
    Anexia(anexia::RawConfig),
    /// Nutanix
    Nutanix(nutanix::RawConfig),
    /// VMware Cloud Director
    VmwareCloudDirector(vmwareclouddirector::RawConfig),
}

variant_accessors!(CloudProviderSpec {
    Digitalocean(digitalocean::RawConfig) => digitalocean, into_digitalocean;
    Aws(aws::RawConfig) => aws, into_aws;
    Azure(azure::RawConfig) => azure, into_azure;
    Openstack(openstack::RawConfig) => openstack, into_openstack;
    EquinixMetal(equinixmetal::RawConfig) => equinix_metal, into_equinix_metal;
    Hetzner(hetzner::RawConfig) => hetzner, into_hetzner;
    Vsphere(vsphere::RawConfig) => vsphere, into_vsphere;
    Google(gce::RawConfig) => google, into_google;
    Kubevirt(kubevirt::RawConfig) => kubevirt, into_kubevirt;
    Alibaba(alibaba::RawConfig) => alibaba, into_alibaba;
    Anexia(anexia::RawConfig) => anexia, into_anexia;
    Nutanix(nutanix::RawConfig) => nutanix, into_nutanix;
    VmwareCloudDirector(vmwareclouddirector::RawConfig) => vmware_cloud_director, into_vmware_cloud_director;
});

impl CloudProviderSpec {
    /// The provider tag to put next to this spec
    pub fn cloud_provider(&self) -> CloudProvider {
        match self {
            Self::Digitalocean(_) => CloudProvider::Digitalocean,
            Self::Aws(_) => CloudProvider::Aws,
            Self::Azure(_) => CloudProvider::Azure,
            Self::Openstack(_) => CloudProvider::Openstack,
            Self::EquinixMetal(_) => CloudProvider::EquinixMetal,
            Self::Hetzner(_) => CloudProvider::Hetzner,
            Self::Vsphere(_) => CloudProvider::Vsphere,
            Self::Google(_) => CloudProvider::Google,
            Self::Kubevirt(_) => CloudProvider::Kubevirt,
            Self::Alibaba(_) => CloudProvider::Alibaba,
            Self::Anexia(_) => CloudProvider::Anexia,
            Self::Nutanix(_) => CloudProvider::Nutanix,
            Self::VmwareCloudDirector(_) => CloudProvider::VmwareCloudDirector,
        }
    }

    /// Decodes an untagged spec for the given provider
    pub fn from_raw(provider: CloudProvider, value: &Value) -> Result<Self> {
        fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T> {
            // An absent spec decodes to all defaults
            if value.is_null() {
                return serde_json::from_value(Value::Object(Default::default()))
                    .map_err(|e| Error::SerdeError(e, "cloudProviderSpec"));
            }
            T::deserialize(value).map_err(|e| Error::SerdeError(e, "cloudProviderSpec"))
        }

        Ok(match provider {
            CloudProvider::Digitalocean => Self::Digitalocean(decode(value)?),
            CloudProvider::Aws => Self::Aws(decode(value)?),
            CloudProvider::Azure => Self::Azure(decode(value)?),
            CloudProvider::Openstack => Self::Openstack(decode(value)?),
            CloudProvider::EquinixMetal => Self::EquinixMetal(decode(value)?),
            CloudProvider::Hetzner => Self::Hetzner(decode(value)?),
            CloudProvider::Vsphere => Self::Vsphere(decode(value)?),
            CloudProvider::Google => Self::Google(decode(value)?),
            CloudProvider::Kubevirt => Self::Kubevirt(decode(value)?),
            CloudProvider::Alibaba => Self::Alibaba(decode(value)?),
            CloudProvider::Anexia => Self::Anexia(decode(value)?),
            CloudProvider::Nutanix => Self::Nutanix(decode(value)?),
            CloudProvider::VmwareCloudDirector => Self::VmwareCloudDirector(decode(value)?),
        })
    }
}

impl Serialize for CloudProviderSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Digitalocean(c) => c.serialize(serializer),
            Self::Aws(c) => c.serialize(serializer),
            Self::Azure(c) => c.serialize(serializer),
            Self::Openstack(c) => c.serialize(serializer),
            Self::EquinixMetal(c) => c.serialize(serializer),
            Self::Hetzner(c) => c.serialize(serializer),
            Self::Vsphere(c) => c.serialize(serializer),
            Self::Google(c) => c.serialize(serializer),
            Self::Kubevirt(c) => c.serialize(serializer),
            Self::Alibaba(c) => c.serialize(serializer),
            Self::Anexia(c) => c.serialize(serializer),
            Self::Nutanix(c) => c.serialize(serializer),
            Self::VmwareCloudDirector(c) => c.serialize(serializer),
        }
    }
}
