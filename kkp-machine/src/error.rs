use kkp_core::{version::ParseVersionError, KubernetesVersion, OperatingSystem, ProviderType};
use thiserror::Error;

/// Possible errors when building machines
#[derive(Error, Debug)]
pub enum Error {
    /// A shared type failed to decode, encode or check
    #[error(transparent)]
    Core(#[from] kkp_core::Error),

    /// Two sources disagree on the cloud provider
    #[error("cloud provider mismatch: {origin} is for {found} but {expected} was expected")]
    ProviderMismatch {
        /// The provider already determined
        expected: ProviderType,
        /// The provider the conflicting source names
        found: ProviderType,
        /// Which source conflicted
        origin: &'static str,
    },

    /// An operating system spec does not match the requested operating system
    #[error("operating system mismatch: spec is for {found} but {expected} was requested")]
    OperatingSystemMismatch {
        /// The requested operating system
        expected: OperatingSystem,
        /// The operating system of the given spec
        found: OperatingSystem,
    },

    /// No datacenter could be resolved from the given context
    #[error("failed to resolve datacenter: {0}")]
    DatacenterResolution(String),

    /// A provider spec cannot be completed
    #[error("invalid {provider} provider config: {reason}")]
    ProviderConfig {
        /// The provider being completed
        provider: ProviderType,
        /// What is missing or wrong
        reason: String,
    },

    /// A stored document fits neither deployment shape
    #[error("document is neither a valid MachineDeployment nor a valid NodeDeployment")]
    AmbiguousDocument,

    /// A stored document could not be decoded as a NodeDeployment
    #[error("failed to decode NodeDeployment: {0}")]
    DecodeNodeDeployment(#[source] serde_json::Error),

    /// The node deployment names no cloud provider
    #[error("node deployment needs to have cloud provider data")]
    MissingCloudProvider,

    /// The node deployment names no operating system
    #[error("node deployment needs to have operating system data")]
    MissingOperatingSystem,

    /// The kubelet version is not a version
    #[error("invalid kubelet version {version:?}: {source}")]
    InvalidKubeletVersion {
        /// The rejected input
        version: String,
        /// Why parsing failed
        #[source]
        source: ParseVersionError,
    },

    /// The kubelet version cannot join the control plane
    #[error("kubelet version {kubelet} is not compatible with control plane version {control_plane}")]
    IncompatibleKubeletVersion {
        /// Requested kubelet version
        kubelet: KubernetesVersion,
        /// Version of the control plane
        control_plane: KubernetesVersion,
    },

    /// Dynamic kubelet config was requested for a version that removed it
    #[error("dynamic kubelet config is not supported for Kubernetes 1.24 and newer, got {0}")]
    DynamicConfigUnsupported(KubernetesVersion),

    /// A taint has no key
    #[error("taint key must not be empty")]
    MissingTaintKey,

    /// A taint has no value
    #[error("value of taint {0:?} must not be empty")]
    MissingTaintValue(String),

    /// A taint has an effect kubernetes does not know
    #[error("taint effect {effect:?} not allowed, allowed values: {}", .allowed.join(", "))]
    InvalidTaintEffect {
        /// The rejected effect
        effect: String,
        /// Allowed effects, sorted
        allowed: Vec<&'static str>,
    },
}
