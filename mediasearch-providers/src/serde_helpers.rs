//! Lenient numeric deserializers for upstream JSON that mixes numbers and
//! numeric strings across its own API versions.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a `u64` from either a JSON number or a numeric string,
/// defaulting to `0` for anything else (missing field, null, garbage).
pub fn de_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value))
}

/// Deserialize a `u32` from either a JSON number or a numeric string,
/// defaulting to `0`.
pub fn de_u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value) as u32)
}

fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
