//! Serde helpers for server payloads that may carry `null` where a value is expected.

use serde::{Deserialize, Deserializer};

/// Reads `null` as `T::default()`. Pair with `#[serde(default)]` so an absent
/// field is accepted too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
