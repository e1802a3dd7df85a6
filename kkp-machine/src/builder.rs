//! Assembly of provider config envelopes from whatever context a caller has.
//!
//! Call sites differ in what they know: the API layer has a cluster and its seed, the
//! migration path has a datacenter, tests often have nothing but a provider spec. The
//! [`Builder`] accepts any subset and reconciles it when building.
use std::collections::BTreeSet;

use kkp_core::{
    machine::ProviderSpec,
    providerconfig::{IpFamily, NetworkConfig},
    CloudProviderSpec, Cluster, Datacenter, OperatingSystemConfig, ProviderConfig, ProviderType, ResourceExt,
    Seed, UserSshKey,
};
use tracing::debug;

use crate::{
    operatingsystem::{complete_operating_system_spec, operating_system_from_spec},
    provider::complete_cloud_provider_spec,
    Error, Result,
};

/// Where the datacenter of a machine comes from
///
/// Only these combinations can name a datacenter; anything else, like a cluster without
/// its seed, has no variant.
#[derive(Clone, Copy, Debug, Default)]
pub enum DatacenterSource<'a> {
    /// A datacenter the caller already resolved
    Explicit(&'a Datacenter),
    /// The datacenter the cluster is scheduled in, looked up in its seed
    FromClusterAndSeed(&'a Cluster, &'a Seed),
    /// A datacenter looked up by name in a seed
    FromNameAndSeed(&'a str, &'a Seed),
    /// No datacenter context
    #[default]
    None,
}

impl<'a> DatacenterSource<'a> {
    /// Resolves the datacenter
    ///
    /// Fails with [`Error::DatacenterResolution`] when there is no context or the seed has no
    /// datacenter of the requested name.
    pub fn resolve(self) -> Result<&'a Datacenter> {
        let (name, seed) = match self {
            DatacenterSource::Explicit(datacenter) => return Ok(datacenter),
            DatacenterSource::FromClusterAndSeed(cluster, seed) => (cluster.spec.cloud.datacenter_name.as_str(), seed),
            DatacenterSource::FromNameAndSeed(name, seed) => (name, seed),
            DatacenterSource::None => {
                return Err(Error::DatacenterResolution(
                    "no datacenter given and no seed to look it up in".into(),
                ))
            }
        };
        if name.is_empty() {
            return Err(Error::DatacenterResolution("datacenter name is empty".into()));
        }
        seed.datacenter(name).ok_or_else(|| {
            Error::DatacenterResolution(format!("datacenter {name:?} not found in seed {:?}", seed.name_any()))
        })
    }
}

/// Accumulates context for a [`ProviderConfig`]
///
/// Every setter is optional. Cross checks between the pieces happen when building, so
/// callers only supply what they have.
///
/// ```
/// use kkp_core::{kubermatic::{DatacenterSpec, HetznerDatacenterSpec}, userdata::DistUpgradeConfig, Datacenter, OperatingSystemConfig, ProviderType};
/// use kkp_machine::Builder;
///
/// let datacenter = Datacenter {
///     spec: DatacenterSpec {
///         hetzner: Some(HetznerDatacenterSpec { datacenter: "fsn1-dc14".into(), ..Default::default() }),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let config = Builder::new()
///     .cloud_provider(ProviderType::Hetzner)
///     .datacenter(&datacenter)
///     .operating_system_spec(OperatingSystemConfig::Ubuntu(DistUpgradeConfig::default()))
///     .build_provider_config()?;
/// assert_eq!(config.cloud_provider.as_str(), "hetzner");
/// # Ok::<(), kkp_machine::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder<'a> {
    cluster: Option<&'a Cluster>,
    datacenter: DatacenterSource<'a>,
    cloud_provider: Option<ProviderType>,
    cloud_provider_spec: Option<CloudProviderSpec>,
    operating_system_spec: Option<OperatingSystemConfig>,
    network_config: Option<NetworkConfig>,
    ssh_public_keys: BTreeSet<String>,
}

impl<'a> Builder<'a> {
    /// An empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cluster the machines belong to
    #[must_use]
    pub fn cluster(mut self, cluster: &'a Cluster) -> Self {
        self.cluster = Some(cluster);
        self
    }

    /// An already resolved datacenter, taking precedence over any other datacenter source
    #[must_use]
    pub fn datacenter(mut self, datacenter: &'a Datacenter) -> Self {
        self.datacenter = DatacenterSource::Explicit(datacenter);
        self
    }

    /// Where to look up the datacenter
    ///
    /// Ignored when an explicit datacenter is already set.
    #[must_use]
    pub fn datacenter_source(mut self, source: DatacenterSource<'a>) -> Self {
        if !matches!(self.datacenter, DatacenterSource::Explicit(_)) {
            self.datacenter = source;
        }
        self
    }

    /// The provider to build for
    #[must_use]
    pub fn cloud_provider(mut self, provider: ProviderType) -> Self {
        self.cloud_provider = Some(provider);
        self
    }

    /// A partial provider spec to complete
    #[must_use]
    pub fn cloud_provider_spec(mut self, spec: impl Into<CloudProviderSpec>) -> Self {
        self.cloud_provider_spec = Some(spec.into());
        self
    }

    /// Operating system settings, which also select the operating system
    #[must_use]
    pub fn operating_system_spec(mut self, spec: impl Into<OperatingSystemConfig>) -> Self {
        self.operating_system_spec = Some(spec.into());
        self
    }

    /// Static network settings for the machines
    #[must_use]
    pub fn network_config(mut self, network: NetworkConfig) -> Self {
        self.network_config = Some(network);
        self
    }

    /// Public keys of the given user keys
    #[must_use]
    pub fn ssh_keys<'k>(self, keys: impl IntoIterator<Item = &'k UserSshKey>) -> Self {
        self.ssh_public_keys(keys.into_iter().map(|k| k.spec.public_key.clone()))
    }

    /// Public keys in authorized_keys format; blanks and duplicates are dropped
    #[must_use]
    pub fn ssh_public_keys(mut self, keys: impl IntoIterator<Item = String>) -> Self {
        self.ssh_public_keys
            .extend(keys.into_iter().filter(|k| !k.trim().is_empty()));
        self
    }

    /// Reconciles the provider named by the cluster with the explicit setting and the provider spec
    ///
    /// Returns `None` when no source names a provider.
    pub fn determine_cloud_provider(&self) -> Result<Option<ProviderType>> {
        let sources = [
            (self.cluster.and_then(|c| c.spec.cloud.provider_type()), "cluster"),
            (self.cloud_provider, "cloud provider"),
            (
                self.cloud_provider_spec.as_ref().map(|s| s.cloud_provider().into()),
                "cloud provider spec",
            ),
        ];
        let mut determined: Option<ProviderType> = None;
        for (provider, origin) in sources {
            let Some(found) = provider else { continue };
            match determined {
                Some(expected) if expected != found => {
                    return Err(Error::ProviderMismatch { expected, found, origin });
                }
                _ => determined = Some(found),
            }
        }
        debug!(provider = ?determined, "determined cloud provider");
        Ok(determined)
    }

    /// Resolves the datacenter from the configured source
    pub fn determine_datacenter(&self) -> Result<&'a Datacenter> {
        self.datacenter.resolve()
    }

    /// Completes the provider spec from the cluster and datacenter context
    pub fn build_cloud_provider_spec(&self) -> Result<CloudProviderSpec> {
        let os = operating_system_from_spec(self.operating_system_spec.as_ref())?;
        let provider = self.required_cloud_provider()?;
        let datacenter = self.determine_datacenter()?;
        complete_cloud_provider_spec(provider, self.cloud_provider_spec.clone(), self.cluster, datacenter, os)
    }

    /// Builds the full envelope
    pub fn build_provider_config(&self) -> Result<ProviderConfig> {
        let provider = self.required_cloud_provider()?;
        let os = operating_system_from_spec(self.operating_system_spec.as_ref())?;
        let datacenter = self.determine_datacenter()?;
        let cloud =
            complete_cloud_provider_spec(provider, self.cloud_provider_spec.clone(), self.cluster, datacenter, os)?;
        let os_spec = complete_operating_system_spec(self.operating_system_spec.clone(), os, provider)?;
        let network = self.complete_network_config();
        debug!(%provider, %os, keys = self.ssh_public_keys.len(), "building provider config");
        Ok(ProviderConfig::new(
            &cloud,
            &os_spec,
            self.ssh_public_keys.iter().cloned().collect(),
            network,
        )?)
    }

    /// Builds the envelope wrapped for embedding into a machine template
    pub fn build_provider_spec(&self) -> Result<ProviderSpec> {
        Ok(self.build_provider_config()?.to_provider_spec()?)
    }

    fn required_cloud_provider(&self) -> Result<ProviderType> {
        self.determine_cloud_provider()?
            .ok_or_else(|| kkp_core::Error::UnknownCloudProvider(String::new()).into())
    }

    /// Network settings with the IP family of the cluster filled in
    fn complete_network_config(&self) -> Option<NetworkConfig> {
        let mut network = self.network_config.clone().unwrap_or_default();
        if let Some(cluster) = self.cluster {
            network.ip_family.get_or_insert(if cluster.is_dual_stack() {
                IpFamily::DualStack
            } else {
                IpFamily::Ipv4
            });
        }
        Some(network).filter(|n| !n.is_empty())
    }
}
