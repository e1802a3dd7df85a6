//! The `cluster.k8s.io/v1alpha1` MachineDeployment consumed by the machine controller.
use k8s_openapi::{
    api::core::v1::Taint,
    apimachinery::pkg::{apis::meta::v1::LabelSelector, runtime::RawExtension},
};
use serde::{Deserialize, Serialize};

use crate::{metadata::ObjectMeta, Resource, TypeMeta};

/// A set of identically configured machines
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MachineDeployment {
    /// `apiVersion` and `kind`
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: MachineDeploymentSpec,
}

impl Resource for MachineDeployment {
    const GROUP: &'static str = "cluster.k8s.io";
    const KIND: &'static str = "MachineDeployment";
    const VERSION: &'static str = "v1alpha1";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Desired state of a [`MachineDeployment`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineDeploymentSpec {
    /// Number of machines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Selects the machines owned by this deployment
    #[serde(default)]
    pub selector: LabelSelector,
    /// Template for new machines
    #[serde(default)]
    pub template: MachineTemplateSpec,
    /// Stop rolling out changes
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,
}

/// Template for machines of a [`MachineDeployment`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MachineTemplateSpec {
    /// Metadata of the machines
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Spec of the machines
    #[serde(default)]
    pub spec: MachineSpec,
}

/// A single machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    /// Metadata propagated to the node
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Taints registered on the node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<Taint>,
    /// Provider config envelope
    #[serde(default)]
    pub provider_spec: ProviderSpec,
    /// Component versions
    #[serde(default)]
    pub versions: MachineVersionInfo,
    /// Dynamic kubelet config source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_source: Option<NodeConfigSource>,
}

/// Holds a [`ProviderConfig`](crate::ProviderConfig) as raw JSON
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProviderSpec {
    /// The encoded envelope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawExtension>,
}

/// Versions of node components
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineVersionInfo {
    /// Kubelet version, without a leading `v`
    #[serde(default)]
    pub kubelet: String,
}

/// Where the kubelet reads its dynamic configuration from
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigSource {
    /// ConfigMap holding the configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapNodeConfigSource>,
}

/// A configmap holding kubelet configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapNodeConfigSource {
    /// ConfigMap namespace
    pub namespace: String,
    /// ConfigMap name
    pub name: String,
    /// Key holding the kubelet configuration
    pub kubelet_config_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_manifest() {
        let md: MachineDeployment = serde_yaml::from_str(
            r#"
apiVersion: cluster.k8s.io/v1alpha1
kind: MachineDeployment
metadata:
  name: worker
  namespace: kube-system
spec:
  replicas: 3
  selector:
    matchLabels:
      machine: md-abc
  template:
    spec:
      providerSpec:
        value:
          cloudProvider: hetzner
      versions:
        kubelet: 1.24.2
      configSource:
        configMap:
          namespace: kube-system
          name: kubelet-config-1.24
          kubeletConfigKey: kubelet
"#,
        )
        .unwrap();
        assert_eq!(md.types, Some(TypeMeta::resource::<MachineDeployment>()));
        assert_eq!(md.spec.replicas, Some(3));
        assert_eq!(md.spec.template.spec.versions.kubelet, "1.24.2");
        let source = md.spec.template.spec.config_source.unwrap().config_map.unwrap();
        assert_eq!(source.name, "kubelet-config-1.24");
        assert_eq!(
            md.spec.template.spec.provider_spec.value.unwrap().0,
            json!({"cloudProvider": "hetzner"})
        );
    }

    #[test]
    fn paused_is_omitted_when_false() {
        let value = serde_json::to_value(MachineDeployment::default()).unwrap();
        assert!(value["spec"].get("paused").is_none());
        assert!(value.get("kind").is_none());
    }
}
