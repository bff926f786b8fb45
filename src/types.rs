use serde::{Deserialize, Deserializer};

/// Tri-state field for partial updates.
///
/// JSON cannot distinguish "field omitted" from "field: null" once both land
/// in an `Option`, so update payloads use `Patch` instead:
///
/// - omitted         -> `Keep`  (leave the stored value alone)
/// - explicit `null` -> `Clear` (set the column to NULL)
/// - any other value -> `Set(value)`
///
/// `Clear` is only legal on nullable columns; payload validation rejects it
/// everywhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

// Relies on `#[serde(default)]` at the field site: serde only calls this
// deserializer when the key is present, so an absent key stays `Keep`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}
