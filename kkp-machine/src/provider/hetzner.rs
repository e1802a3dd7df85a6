//! Hetzner Cloud servers
use kkp_core::{
    api::HetznerNodeSpec, cloudprovider::hetzner::RawConfig, kubermatic::HetznerDatacenterSpec, Cluster,
    OperatingSystem, ProviderType,
};

use crate::{Error, Result};

/// Maps the user owned settings
///
/// The node network becomes the only entry of `networks`.
pub fn raw_config(spec: &HetznerNodeSpec) -> RawConfig {
    RawConfig {
        server_type: spec.server_type.clone().into(),
        networks: [spec.network.as_str()]
            .into_iter()
            .filter(|n| !n.is_empty())
            .map(Into::into)
            .collect(),
        ..Default::default()
    }
}

/// Fills placement and the private network
///
/// The network is the node's choice, then the cluster's, then the datacenter's.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &HetznerDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.datacenter.set_if_empty(dc.datacenter.as_str());
    config.location.set_if_empty(dc.location.as_str());
    if config.datacenter.is_empty() && config.location.is_empty() {
        return Err(Error::ProviderConfig {
            provider: ProviderType::Hetzner,
            reason: "datacenter or location must be specified".into(),
        });
    }

    if config.networks.iter().all(|n| n.is_empty()) {
        let network = cluster
            .and_then(|c| c.spec.cloud.hetzner.as_ref())
            .map(|h| h.network.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(dc.network.as_str());
        config.networks = [network]
            .into_iter()
            .filter(|n| !n.is_empty())
            .map(Into::into)
            .collect();
    }
    Ok(config)
}

/// Reads back the server type and the first network
pub fn node_spec(config: &RawConfig) -> HetznerNodeSpec {
    HetznerNodeSpec {
        server_type: config.server_type.value.clone(),
        network: config
            .networks
            .first()
            .map(|n| n.value.clone())
            .unwrap_or_default(),
    }
}
