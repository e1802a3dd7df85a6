//! The provider spec registry.
//!
//! Every supported provider has a submodule with three functions:
//!
//! - `raw_config` maps the API node spec onto the machine-controller `RawConfig`, carrying
//!   only the settings the user owns,
//! - `complete` fills the fields left unset from the cluster and datacenter context,
//! - `node_spec` maps a `RawConfig` back onto the API node spec.
//!
//! [`complete_cloud_provider_spec`] dispatches over all of them with one exhaustive match,
//! so a provider that is not wired here fails to compile.
use std::collections::BTreeSet;

use kkp_core::{
    providerconfig::ConfigVarString, CloudProviderSpec, Cluster, Datacenter, NodeCloudSpec, OperatingSystem,
    ProviderConfig, ProviderType, ResourceExt,
};
use tracing::debug;

use crate::{Error, Result};

pub mod alibaba;
pub mod anexia;
pub mod aws;
pub mod azure;
pub mod digitalocean;
pub mod gcp;
pub mod hetzner;
pub mod kubevirt;
pub mod nutanix;
pub mod openstack;
pub mod packet;
pub mod vmwareclouddirector;
pub mod vsphere;

/// Completes a possibly absent provider spec from the cluster and datacenter context
///
/// The given spec, the cluster and the datacenter must all be for `provider`; fields already
/// set in `spec` are never overwritten. Calling this again on its own output returns the
/// output unchanged.
pub fn complete_cloud_provider_spec(
    provider: ProviderType,
    spec: Option<CloudProviderSpec>,
    cluster: Option<&Cluster>,
    datacenter: &Datacenter,
    os: OperatingSystem,
) -> Result<CloudProviderSpec> {
    if let Some(spec) = &spec {
        let found = spec.cloud_provider().into();
        if found != provider {
            return Err(Error::ProviderMismatch {
                expected: provider,
                found,
                origin: "cloud provider spec",
            });
        }
    }
    if let Some(found) = cluster.and_then(|c| c.spec.cloud.provider_type()) {
        if found != provider {
            return Err(Error::ProviderMismatch {
                expected: provider,
                found,
                origin: "cluster",
            });
        }
    }
    debug!(%provider, %os, given = spec.is_some(), "completing cloud provider spec");

    let dc = &datacenter.spec;
    Ok(match provider {
        ProviderType::Digitalocean => digitalocean::complete(
            spec.and_then(CloudProviderSpec::into_digitalocean),
            cluster,
            datacenter_spec(dc.digitalocean.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Aws => aws::complete(
            spec.and_then(CloudProviderSpec::into_aws),
            cluster,
            datacenter_spec(dc.aws.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Azure => azure::complete(
            spec.and_then(CloudProviderSpec::into_azure),
            cluster,
            datacenter_spec(dc.azure.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Openstack => openstack::complete(
            spec.and_then(CloudProviderSpec::into_openstack),
            cluster,
            datacenter_spec(dc.openstack.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Packet => packet::complete(
            spec.and_then(CloudProviderSpec::into_equinix_metal),
            cluster,
            datacenter_spec(dc.packet.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Hetzner => hetzner::complete(
            spec.and_then(CloudProviderSpec::into_hetzner),
            cluster,
            datacenter_spec(dc.hetzner.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Vsphere => vsphere::complete(
            spec.and_then(CloudProviderSpec::into_vsphere),
            cluster,
            datacenter_spec(dc.vsphere.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Gcp => gcp::complete(
            spec.and_then(CloudProviderSpec::into_google),
            cluster,
            datacenter_spec(dc.gcp.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Kubevirt => kubevirt::complete(
            spec.and_then(CloudProviderSpec::into_kubevirt),
            cluster,
            datacenter_spec(dc.kubevirt.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Alibaba => alibaba::complete(
            spec.and_then(CloudProviderSpec::into_alibaba),
            cluster,
            datacenter_spec(dc.alibaba.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Anexia => anexia::complete(
            spec.and_then(CloudProviderSpec::into_anexia),
            cluster,
            datacenter_spec(dc.anexia.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::Nutanix => nutanix::complete(
            spec.and_then(CloudProviderSpec::into_nutanix),
            cluster,
            datacenter_spec(dc.nutanix.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
        ProviderType::VmwareCloudDirector => vmwareclouddirector::complete(
            spec.and_then(CloudProviderSpec::into_vmware_cloud_director),
            cluster,
            datacenter_spec(dc.vmwareclouddirector.as_ref(), provider, datacenter)?,
            os,
        )?
        .into(),
    })
}

/// The platform provider a spec is for
///
/// Fails with [`UnknownCloudProvider`](kkp_core::Error::UnknownCloudProvider) when no spec
/// is given.
pub fn cloud_provider_from_spec(spec: Option<&CloudProviderSpec>) -> Result<ProviderType> {
    spec.map(|s| s.cloud_provider().into())
        .ok_or_else(|| kkp_core::Error::UnknownCloudProvider(String::new()).into())
}

/// Maps the user owned settings of an API node spec into the controller dialect
///
/// The cluster is only consulted for choices the node makes among cluster resources, such
/// as attaching a floating IP from the cluster's pool.
pub fn cloud_provider_spec_from_node(spec: &NodeCloudSpec, cluster: Option<&Cluster>) -> CloudProviderSpec {
    match spec {
        NodeCloudSpec::Digitalocean(s) => digitalocean::raw_config(s).into(),
        NodeCloudSpec::Aws(s) => aws::raw_config(s).into(),
        NodeCloudSpec::Azure(s) => azure::raw_config(s).into(),
        NodeCloudSpec::Openstack(s) => openstack::raw_config(s, cluster).into(),
        NodeCloudSpec::Packet(s) => packet::raw_config(s).into(),
        NodeCloudSpec::Hetzner(s) => hetzner::raw_config(s).into(),
        NodeCloudSpec::Vsphere(s) => vsphere::raw_config(s).into(),
        NodeCloudSpec::Gcp(s) => gcp::raw_config(s).into(),
        NodeCloudSpec::Kubevirt(s) => kubevirt::raw_config(s).into(),
        NodeCloudSpec::Alibaba(s) => alibaba::raw_config(s).into(),
        NodeCloudSpec::Anexia(s) => anexia::raw_config(s).into(),
        NodeCloudSpec::Nutanix(s) => nutanix::raw_config(s).into(),
        NodeCloudSpec::VmwareCloudDirector(s) => vmwareclouddirector::raw_config(s).into(),
    }
}

/// Maps a controller provider spec back into the API node spec
pub fn node_cloud_spec_from_provider_spec(spec: &CloudProviderSpec) -> NodeCloudSpec {
    match spec {
        CloudProviderSpec::Digitalocean(c) => digitalocean::node_spec(c).into(),
        CloudProviderSpec::Aws(c) => aws::node_spec(c).into(),
        CloudProviderSpec::Azure(c) => azure::node_spec(c).into(),
        CloudProviderSpec::Openstack(c) => openstack::node_spec(c).into(),
        CloudProviderSpec::EquinixMetal(c) => packet::node_spec(c).into(),
        CloudProviderSpec::Hetzner(c) => hetzner::node_spec(c).into(),
        CloudProviderSpec::Vsphere(c) => vsphere::node_spec(c).into(),
        CloudProviderSpec::Google(c) => gcp::node_spec(c).into(),
        CloudProviderSpec::Kubevirt(c) => kubevirt::node_spec(c).into(),
        CloudProviderSpec::Alibaba(c) => alibaba::node_spec(c).into(),
        CloudProviderSpec::Anexia(c) => anexia::node_spec(c).into(),
        CloudProviderSpec::Nutanix(c) => nutanix::node_spec(c).into(),
        CloudProviderSpec::VmwareCloudDirector(c) => vmwareclouddirector::node_spec(c).into(),
    }
}

/// Decodes the provider settings of an envelope into the API node spec
pub fn node_cloud_spec_from_provider_config(config: &ProviderConfig) -> Result<NodeCloudSpec> {
    Ok(node_cloud_spec_from_provider_spec(&config.cloud_provider_spec()?))
}

/// The datacenter settings for `provider`, or why there are none
fn datacenter_spec<'a, T>(spec: Option<&'a T>, provider: ProviderType, datacenter: &Datacenter) -> Result<&'a T> {
    spec.ok_or_else(|| match datacenter.spec.provider_type() {
        Some(found) => Error::ProviderMismatch {
            expected: provider,
            found,
            origin: "datacenter",
        },
        None => Error::DatacenterResolution(format!("datacenter has no {provider} settings")),
    })
}

/// Name of the cluster, if a named cluster is given
pub(crate) fn cluster_name(cluster: Option<&Cluster>) -> Option<String> {
    cluster.map(ResourceExt::name_any).filter(|name| !name.is_empty())
}

/// Project the cluster belongs to
pub(crate) fn project_id(cluster: Option<&Cluster>) -> Option<&str> {
    cluster.and_then(Cluster::project_id)
}

/// Fails unless `value` is set, naming `field` in the error
pub(crate) fn require(provider: ProviderType, field: &str, value: &ConfigVarString) -> Result<()> {
    if value.is_empty() {
        return Err(Error::ProviderConfig {
            provider,
            reason: format!("{field} must be specified"),
        });
    }
    Ok(())
}

/// Merges `extra` into a tag list, returning a sorted list without duplicates or blanks
pub(crate) fn merge_tags(tags: &[ConfigVarString], extra: impl IntoIterator<Item = String>) -> Vec<ConfigVarString> {
    tags.iter()
        .map(|t| t.value.clone())
        .chain(extra)
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ConfigVarString::from)
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures;
