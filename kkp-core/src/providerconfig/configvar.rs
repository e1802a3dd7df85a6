//! Values that are either given inline or resolved by the machine controller from a
//! secret or configmap.
//!
//! Without a reference they travel as a bare JSON scalar, which is the only form this
//! crate produces; the object form is accepted when decoding existing envelopes.
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reference to a key within a secret in any namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalSecretKeySelector {
    /// Secret name
    #[serde(default)]
    pub name: String,
    /// Secret namespace
    #[serde(default)]
    pub namespace: String,
    /// Key within the secret
    #[serde(default)]
    pub key: String,
}

/// Reference to a key within a configmap in any namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalConfigMapKeySelector {
    /// ConfigMap name
    #[serde(default)]
    pub name: String,
    /// ConfigMap namespace
    #[serde(default)]
    pub namespace: String,
    /// Key within the configmap
    #[serde(default)]
    pub key: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de> + Default"))]
struct Referenced<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret_key_ref: Option<GlobalSecretKeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config_map_key_ref: Option<GlobalConfigMapKeySelector>,
    #[serde(default)]
    value: T,
}

#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de> + Default"))]
enum Either<T> {
    Plain(T),
    Referenced(Referenced<T>),
}

/// A string that may come from a secret or configmap
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigVarString {
    /// Inline value
    pub value: String,
    /// Secret to resolve the value from
    pub secret_key_ref: Option<GlobalSecretKeySelector>,
    /// ConfigMap to resolve the value from
    pub config_map_key_ref: Option<GlobalConfigMapKeySelector>,
}

impl ConfigVarString {
    /// Whether neither an inline value nor a reference is set
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.secret_key_ref.is_none() && self.config_map_key_ref.is_none()
    }

    /// Sets the inline value when nothing is set yet
    pub fn set_if_empty(&mut self, value: impl Into<String>) {
        if self.is_empty() {
            self.value = value.into();
        }
    }
}

impl From<&str> for ConfigVarString {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<String> for ConfigVarString {
    fn from(value: String) -> Self {
        ConfigVarString {
            value,
            ..Default::default()
        }
    }
}

impl Serialize for ConfigVarString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.secret_key_ref.is_none() && self.config_map_key_ref.is_none() {
            return serializer.serialize_str(&self.value);
        }
        Referenced {
            secret_key_ref: self.secret_key_ref.clone(),
            config_map_key_ref: self.config_map_key_ref.clone(),
            value: &self.value,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigVarString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Either<String>>::deserialize(deserializer)? {
            None => ConfigVarString::default(),
            Some(Either::Plain(value)) => value.into(),
            Some(Either::Referenced(r)) => ConfigVarString {
                value: r.value,
                secret_key_ref: r.secret_key_ref,
                config_map_key_ref: r.config_map_key_ref,
            },
        })
    }
}

/// A boolean that may come from a secret or configmap
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigVarBool {
    /// Inline value, `None` lets the machine controller decide
    pub value: Option<bool>,
    /// Secret to resolve the value from
    pub secret_key_ref: Option<GlobalSecretKeySelector>,
    /// ConfigMap to resolve the value from
    pub config_map_key_ref: Option<GlobalConfigMapKeySelector>,
}

impl ConfigVarBool {
    /// Whether neither an inline value nor a reference is set
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.secret_key_ref.is_none() && self.config_map_key_ref.is_none()
    }

    /// Sets the inline value when nothing is set yet
    pub fn set_if_empty(&mut self, value: bool) {
        if self.is_empty() {
            self.value = Some(value);
        }
    }

    /// The inline value, `false` when unset
    pub fn is_true(&self) -> bool {
        self.value.unwrap_or_default()
    }
}

impl From<bool> for ConfigVarBool {
    fn from(value: bool) -> Self {
        Some(value).into()
    }
}

impl From<Option<bool>> for ConfigVarBool {
    fn from(value: Option<bool>) -> Self {
        ConfigVarBool {
            value,
            ..Default::default()
        }
    }
}

impl Serialize for ConfigVarBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.secret_key_ref.is_none() && self.config_map_key_ref.is_none() {
            return self.value.serialize(serializer);
        }
        Referenced {
            secret_key_ref: self.secret_key_ref.clone(),
            config_map_key_ref: self.config_map_key_ref.clone(),
            value: self.value,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigVarBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Either<Option<bool>>>::deserialize(deserializer)? {
            None => ConfigVarBool::default(),
            Some(Either::Plain(value)) => value.into(),
            Some(Either::Referenced(r)) => ConfigVarBool {
                value: r.value,
                secret_key_ref: r.secret_key_ref,
                config_map_key_ref: r.config_map_key_ref,
            },
        })
    }
}
