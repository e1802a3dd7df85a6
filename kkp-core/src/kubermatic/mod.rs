//! Read-only platform context: clusters, seeds with their datacenters, and user ssh keys.
//!
//! These are the `kubermatic.k8c.io/v1` objects the machine subsystem looks things up in.
//! Only the fields that influence machine construction are modelled; credentials never are.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

mod cluster;
pub use cluster::*;

mod datacenter;
pub use datacenter::*;

mod ssh;
pub use ssh::*;

/// Cloud providers as named by the platform
///
/// See [`CloudProvider`](crate::CloudProvider) for the machine controller's names.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// DigitalOcean
    Digitalocean,
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// OpenStack
    Openstack,
    /// Equinix Metal, still called packet by the platform
    Packet,
    /// Hetzner Cloud
    Hetzner,
    /// VMware vSphere
    Vsphere,
    /// Google Cloud Platform
    Gcp,
    /// KubeVirt
    Kubevirt,
    /// Alibaba Cloud
    Alibaba,
    /// Anexia Engine
    Anexia,
    /// Nutanix
    Nutanix,
    /// VMware Cloud Director
    VmwareCloudDirector,
}

impl ProviderType {
    /// Every provider that machines can be built for
    pub const ALL: [ProviderType; 13] = [
        ProviderType::Digitalocean,
        ProviderType::Aws,
        ProviderType::Azure,
        ProviderType::Openstack,
        ProviderType::Packet,
        ProviderType::Hetzner,
        ProviderType::Vsphere,
        ProviderType::Gcp,
        ProviderType::Kubevirt,
        ProviderType::Alibaba,
        ProviderType::Anexia,
        ProviderType::Nutanix,
        ProviderType::VmwareCloudDirector,
    ];

    /// The wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Digitalocean => "digitalocean",
            ProviderType::Aws => "aws",
            ProviderType::Azure => "azure",
            ProviderType::Openstack => "openstack",
            ProviderType::Packet => "packet",
            ProviderType::Hetzner => "hetzner",
            ProviderType::Vsphere => "vsphere",
            ProviderType::Gcp => "gcp",
            ProviderType::Kubevirt => "kubevirt",
            ProviderType::Alibaba => "alibaba",
            ProviderType::Anexia => "anexia",
            ProviderType::Nutanix => "nutanix",
            ProviderType::VmwareCloudDirector => "vmwareclouddirector",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProviderType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownCloudProvider(s.into()))
    }
}
