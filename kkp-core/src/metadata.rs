//! Metadata structs shared by the Kubernetes objects in this crate.
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::Resource;

/// Type information that is flattened into every kubernetes object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

impl TypeMeta {
    /// Type information for a statically known [`Resource`]
    pub fn resource<K: Resource>() -> Self {
        TypeMeta {
            api_version: K::api_version(),
            kind: K::KIND.into(),
        }
    }
}
