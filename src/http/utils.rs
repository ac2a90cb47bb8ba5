//! Serde helpers for CometBFT's number encoding.
//!
//! CometBFT serializes 64-bit integers (heights, counts, gas) as JSON strings
//! so that JavaScript clients do not lose precision. These helpers accept both
//! the string form and a plain JSON number.

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

fn parse<E: de::Error>(value: StringOrNumber) -> Result<u64, E> {
    match value {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.trim().parse().map_err(E::custom),
    }
}

/// Deserializes a `u64` from `"123"` or `123`.
pub fn u64_from_str<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    parse(StringOrNumber::deserialize(deserializer)?)
}

/// Like [`u64_from_str`], but `null`, a missing field or an empty string
/// give `None`.
pub fn opt_u64_from_str<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}
