//! Crate with the machine construction logic of the Kubermatic platform
//!
//! This crate turns the node deployments API callers submit into the MachineDeployments
//! the machine controller reconciles. Everything here is synchronous and side-effect free:
//! clusters, datacenters and ssh keys are passed in already fetched, and results are
//! returned for the caller to persist.
//!
//! The usual entry points are [`validate`] followed by [`deployment`]. The [`Builder`]
//! can be used directly when only a provider config envelope is needed, and
//! [`parse_node_or_machine_deployment`] upgrades documents persisted in the legacy shape.

#![deny(unsafe_code)]

pub mod builder;
pub use builder::{Builder, DatacenterSource};

pub mod convert;
pub use convert::{deployment, node_deployment};

pub mod migration;
pub use migration::{parse_node_or_machine_deployment, ParsedDeployment};

pub mod operatingsystem;

pub mod provider;

pub mod validation;
pub use validation::{validate, validate_with, KubeletSkewPolicy, VersionCompatibility};

mod error;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
