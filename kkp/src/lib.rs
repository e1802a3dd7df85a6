//! Kkp is an umbrella-crate for building machine-controller objects from Kubermatic node deployments.
//!
//! # Overview
//!
//! API callers describe worker nodes as a [`NodeDeployment`]: one cloud provider, one operating
//! system, a kubelet version and some scheduling metadata. The machine controller wants a
//! `MachineDeployment` whose template embeds an opaque provider config envelope, completed with
//! everything the platform knows about the target cluster and datacenter.
//!
//! The main modules are:
//!
//! - [`core`](crate::core) with the API, platform and wire types shared by everything else
//! - [`machine`](crate::machine) with validation, conversion, the provider config
//!   [`Builder`](crate::machine::Builder) and the legacy document migration
//!
//! # Converting a node deployment
//! ```
//! use kkp::{
//!     core::{api::{DigitaloceanNodeSpec, UbuntuSpec}, kubermatic::{DatacenterSpec, DigitaloceanDatacenterSpec}},
//!     machine::{deployment, validate},
//!     Cluster, Datacenter, KubernetesVersion, NodeDeployment,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cluster = Cluster::default();
//! cluster.metadata.name = Some("xyz".into());
//! cluster.spec.cloud.digitalocean = Some(Default::default());
//! let datacenter = Datacenter {
//!     spec: DatacenterSpec {
//!         digitalocean: Some(DigitaloceanDatacenterSpec { region: "fra1".into() }),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let mut nd = NodeDeployment::default();
//! nd.spec.replicas = 2;
//! nd.spec.template.cloud = Some(DigitaloceanNodeSpec { size: "s-1vcpu-1gb".into(), ..Default::default() }.into());
//! nd.spec.template.operating_system = Some(UbuntuSpec::default().into());
//!
//! // an empty kubelet version is resolved to the control plane version
//! let nd = validate(nd, &KubernetesVersion::new(1, 26, 3))?;
//! let md = deployment(&cluster, &nd, &datacenter, &[])?;
//! assert_eq!(md.spec.template.spec.versions.kubelet, "1.26.3");
//! assert_eq!(md.metadata.generate_name.as_deref(), Some("xyz-worker-"));
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "machine")]
#[cfg_attr(docsrs, doc(cfg(feature = "machine")))]
#[doc(inline)]
pub use kkp_machine as machine;

#[cfg(feature = "machine")]
#[cfg_attr(docsrs, doc(cfg(feature = "machine")))]
pub use kkp_machine::{Builder, Error, Result};

pub use crate::core::{
    Cluster, Datacenter, KubernetesVersion, MachineDeployment, NodeDeployment, ProviderConfig, Resource,
    ResourceExt, Seed, UserSshKey,
};
#[doc(inline)]
pub use kkp_core as core;

#[cfg(test)]
#[cfg(feature = "machine")]
mod scenario_tests;
