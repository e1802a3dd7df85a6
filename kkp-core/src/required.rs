use serde::{ser, Serialize, Serializer};

use crate::Error;

/// Node specs whose provider cannot work without certain fields.
///
/// Implementors list the names of required fields that are absent or zero, in declaration
/// order. The check runs whenever a [`NodeCloudSpec`](crate::NodeCloudSpec) is serialized,
/// so a spec that is missing fields can never be handed on silently.
pub trait RequiredFields {
    /// Wire names of the required fields that are missing or zero
    fn missing_required_fields(&self) -> Vec<&'static str>;

    /// Fails with [`Error::MissingRequiredFields`] if any required field is missing
    fn check_required_fields(&self) -> Result<(), Error> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequiredFields(missing))
        }
    }
}

/// Names of the checks that failed, in the order given
pub(crate) fn missing<const N: usize>(checks: [(&'static str, bool); N]) -> Vec<&'static str> {
    checks
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect()
}

/// `serialize_with` target that refuses to serialize specs with missing required fields
pub(crate) fn serialize_checked<T, S>(spec: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: RequiredFields + Serialize,
    S: Serializer,
{
    spec.check_required_fields().map_err(ser::Error::custom)?;
    spec.serialize(serializer)
}
