//! Upgrading stored deployment documents that may still be in the legacy shape
use kkp_core::{Cluster, Datacenter, MachineDeployment, NodeDeployment, ResourceExt};
use tracing::{debug, info};

use crate::{convert::deployment, Error, Result};

/// Outcome of [`parse_node_or_machine_deployment`]
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedDeployment {
    /// The document was empty
    Empty,
    /// The document already was a machine deployment
    Current(MachineDeployment),
    /// The document was a node deployment and has been converted
    Migrated(MachineDeployment),
}

impl ParsedDeployment {
    /// Whether the document had to be converted from the legacy shape
    pub fn is_migrated(&self) -> bool {
        matches!(self, ParsedDeployment::Migrated(_))
    }

    /// The machine deployment, if any
    pub fn into_machine_deployment(self) -> Option<MachineDeployment> {
        match self {
            ParsedDeployment::Empty => None,
            ParsedDeployment::Current(md) | ParsedDeployment::Migrated(md) => Some(md),
        }
    }
}

/// Reads a stored deployment, converting legacy node deployments on the fly
///
/// A document with a top level `metadata.name` is taken to be a machine deployment.
/// Anything else must decode as a node deployment with a name, which is then converted
/// without ssh keys.
pub fn parse_node_or_machine_deployment(
    cluster: &Cluster,
    datacenter: &Datacenter,
    document: &str,
) -> Result<ParsedDeployment> {
    if document.trim().is_empty() {
        return Ok(ParsedDeployment::Empty);
    }

    if let Ok(md) = serde_json::from_str::<MachineDeployment>(document) {
        if md.metadata.name.as_deref().is_some_and(|name| !name.is_empty()) {
            debug!(name = %md.name_any(), "document is a machine deployment");
            return Ok(ParsedDeployment::Current(md));
        }
    }

    let nd: NodeDeployment = serde_json::from_str(document).map_err(Error::DecodeNodeDeployment)?;
    if nd.metadata.name.is_empty() {
        return Err(Error::AmbiguousDocument);
    }
    let md = deployment(cluster, &nd, datacenter, &[])?;
    info!(name = %nd.metadata.name, cluster = %cluster.name_any(), "migrated node deployment");
    Ok(ParsedDeployment::Migrated(md))
}
