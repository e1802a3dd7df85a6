use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or checking Kubermatic types.
#[derive(Error, Debug)]
pub enum Error {
    /// A provider name or provider payload did not match any supported cloud provider.
    #[error("unknown cloud provider {0:?}")]
    UnknownCloudProvider(String),

    /// An operating system name or spec did not resolve to exactly one operating system.
    #[error("unknown operating system {0:?}")]
    UnknownOperatingSystem(String),

    /// A node spec is missing fields the provider cannot work without.
    ///
    /// Field names are listed in declaration order.
    #[error("missing or invalid required parameter(s): {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    /// Failed to read a configuration file from disk.
    #[error("failed to read {1:?}: {0}")]
    ReadConfig(#[source] std::io::Error, PathBuf),

    /// Failed to parse a YAML configuration document.
    #[error("failed to parse config: {0}")]
    ParseConfig(#[source] serde_yaml::Error),

    /// A configuration document contained no usable object.
    #[error("config document is empty")]
    EmptyConfig,

    /// A machine template carries no provider config.
    #[error("providerSpec.value is empty")]
    EmptyProviderSpec,

    /// Failed to encode or decode a JSON payload.
    #[error("failed to (de)serialize {1}: {0}")]
    SerdeError(#[source] serde_json::Error, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_comma_joined() {
        let err = Error::MissingRequiredFields(vec!["instanceType", "diskSize", "volumeType"]);
        assert_eq!(
            err.to_string(),
            "missing or invalid required parameter(s): instanceType, diskSize, volumeType"
        );
    }

    #[test]
    fn unknown_names_are_quoted() {
        assert_eq!(
            Error::UnknownCloudProvider("fake".into()).to_string(),
            r#"unknown cloud provider "fake""#
        );
    }
}
