use serde::{Deserialize, Serialize};

use crate::{metadata::ObjectMeta, Resource, TypeMeta};

/// An ssh public key a user registered with a project
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserSshKey {
    /// `apiVersion` and `kind`
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The key
    #[serde(default)]
    pub spec: SshKeySpec,
}

impl Resource for UserSshKey {
    const GROUP: &'static str = "kubermatic.k8c.io";
    const KIND: &'static str = "UserSSHKey";
    const VERSION: &'static str = "v1";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl UserSshKey {
    /// A key with the given public key and no other settings
    pub fn new(public_key: impl Into<String>) -> Self {
        UserSshKey {
            spec: SshKeySpec {
                public_key: public_key.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Desired state of a [`UserSshKey`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SshKeySpec {
    /// Owning user
    pub owner: String,
    /// Display name
    pub name: String,
    /// MD5 fingerprint
    pub fingerprint: String,
    /// Key in authorized_keys format
    pub public_key: String,
    /// Clusters the key is deployed to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<String>,
}
