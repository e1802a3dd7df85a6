//! Crate with the types and traits shared by the Kubermatic machine subsystem
//!
//! This crate holds no behaviour beyond (de)serialization and field checks. It contains
//! three families of types:
//! - [`api`]: the public node deployment shape supplied by API callers
//! - [`kubermatic`]: read-only platform context (clusters, seeds, datacenters, ssh keys)
//! - [`providerconfig`], [`cloudprovider`], [`userdata`] and [`machine`]: the
//!   machine-controller wire formats produced from the above
//!
//! The same information here is always re-exported from `kkp` under `kkp::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod api;
pub use api::{NodeCloudSpec, NodeDeployment, NodeSpec, OperatingSystemSpec};

pub mod cloudprovider;
pub use cloudprovider::CloudProviderSpec;

pub mod kubermatic;
pub use kubermatic::{Cluster, Datacenter, ProviderType, Seed, UserSshKey};

pub mod machine;
pub use machine::MachineDeployment;

pub mod metadata;
pub use metadata::TypeMeta;

pub mod providerconfig;
pub use providerconfig::{CloudProvider, OperatingSystem, ProviderConfig};

mod required;
pub use required::RequiredFields;

mod resource;
pub use resource::{Resource, ResourceExt};

pub mod userdata;
pub use userdata::OperatingSystemConfig;

pub mod version;
pub use version::KubernetesVersion;

mod error;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
