//! Public node deployment shapes accepted from API callers.
//!
//! These mirror the JSON documents sent to (and historically persisted by) the REST layer.
//! Provider and operating system choices are tagged enums, so a spec naming two providers
//! fails to decode instead of surfacing later.
use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

mod cloud;
pub use cloud::*;

mod os;
pub use os::*;

/// Object metadata as exposed by the public API
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiObjectMeta {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Human facing name, empty when the server should generate one
    #[serde(default)]
    pub name: String,
    /// Free-form annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    /// Creation time, set by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<Time>,
    /// Deletion time, set by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<Time>,
}

/// A set of worker nodes sharing one node template
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NodeDeployment {
    /// Metadata, inlined at the top level of the document
    #[serde(flatten)]
    pub metadata: ApiObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: NodeDeploymentSpec,
}

/// Desired state of a [`NodeDeployment`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDeploymentSpec {
    /// Number of nodes
    #[serde(default)]
    pub replicas: i32,
    /// Template every node is created from
    #[serde(default)]
    pub template: NodeSpec,
    /// Pauses rollouts when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Deprecated kubelet dynamic configuration, rejected from Kubernetes 1.24 on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_config: Option<bool>,
}

/// Template for a single node
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    /// Cloud provider settings; `None` when the document named no provider
    #[serde(
        default,
        deserialize_with = "one_of",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud: Option<NodeCloudSpec>,
    /// Operating system settings; `None` when the document named no operating system
    #[serde(
        default,
        deserialize_with = "one_of",
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_system: Option<OperatingSystemSpec>,
    /// Login user for ssh, informational only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_user_name: String,
    /// Component versions
    #[serde(default)]
    pub versions: NodeVersionInfo,
    /// Labels applied to the node objects
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Taints applied to the node objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<TaintSpec>,
}

/// Versions of node components
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeVersionInfo {
    /// Kubelet version, defaulted to the control plane version when empty
    #[serde(default)]
    pub kubelet: String,
}

/// A taint placed on every node of a deployment
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaintSpec {
    /// Taint key
    #[serde(default)]
    pub key: String,
    /// Taint value
    #[serde(default)]
    pub value: String,
    /// One of `NoExecute`, `NoSchedule`, `PreferNoSchedule`
    #[serde(default)]
    pub effect: String,
}

/// Decodes a "one field of N" object into a tagged enum.
///
/// Older clients send every variant with unset ones as `null`, and an empty object
/// means nothing was chosen; both are tolerated here. More than one set variant is an error.
fn one_of<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: de::DeserializeOwned,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Value::Object(map)) => {
            let set: serde_json::Map<String, Value> =
                map.into_iter().filter(|(_, v)| !v.is_null()).collect();
            if set.is_empty() {
                return Ok(None);
            }
            if set.len() > 1 {
                let keys: Vec<&str> = set.keys().map(String::as_str).collect();
                return Err(de::Error::custom(format!(
                    "exactly one variant must be set, found: {}",
                    keys.join(", ")
                )));
            }
            Value::Object(set)
        }
        Some(other) => other,
    };
    T::deserialize(value).map(Some).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderType;

    #[test]
    fn decodes_public_node_deployment() {
        let nd: NodeDeployment = serde_json::from_str(
            r#"{
                "name": "workers",
                "annotations": {"a": "b"},
                "creationTimestamp": "2023-01-01T00:00:00Z",
                "spec": {
                    "replicas": 3,
                    "template": {
                        "cloud": {"aws": null, "digitalocean": {"size": "s-1vcpu-1gb"}},
                        "operatingSystem": {"ubuntu": {"distUpgradeOnBoot": true}},
                        "versions": {"kubelet": "1.23.5"},
                        "labels": {"tier": "backend"},
                        "taints": [{"key": "k", "value": "v", "effect": "NoSchedule"}]
                    },
                    "dynamicConfig": false
                }
            }"#,
        )
        .unwrap();
        assert_eq!(nd.metadata.name, "workers");
        assert!(nd.metadata.creation_timestamp.is_some());
        assert_eq!(nd.spec.replicas, 3);
        let cloud = nd.spec.template.cloud.as_ref().unwrap();
        assert_eq!(cloud.provider_type(), ProviderType::Digitalocean);
        assert_eq!(cloud.digitalocean().unwrap().size, "s-1vcpu-1gb");
        assert_eq!(
            nd.spec.template.operating_system,
            Some(OperatingSystemSpec::Ubuntu(UbuntuSpec {
                dist_upgrade_on_boot: true
            }))
        );
        assert_eq!(nd.spec.template.taints[0].effect, "NoSchedule");
        assert_eq!(nd.spec.dynamic_config, Some(false));
    }

    #[test]
    fn empty_unions_decode_as_none() {
        let spec: NodeSpec = serde_json::from_str(r#"{"cloud": {}, "operatingSystem": null}"#).unwrap();
        assert!(spec.cloud.is_none());
        assert!(spec.operating_system.is_none());
        let spec: NodeSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.cloud.is_none());
    }

    #[test]
    fn two_providers_are_rejected() {
        let err = serde_json::from_str::<NodeSpec>(
            r#"{"cloud": {"hetzner": {"type": "cx21"}, "digitalocean": {"size": "s"}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one variant must be set"), "{err}");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(serde_json::from_str::<NodeSpec>(r#"{"cloud": {"fake": {}}}"#).is_err());
    }
}
