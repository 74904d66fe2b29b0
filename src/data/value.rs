use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a magnitude leniently: numbers and numeric strings are accepted,
/// anything else (null, booleans, garbage) counts as 0. Negative and
/// non-finite values are clamped to 0.
pub fn magnitude(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
}

/// Serde adapter for [`magnitude`].
pub(crate) fn deserialize_magnitude<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(magnitude(&Value::deserialize(deserializer)?))
}
