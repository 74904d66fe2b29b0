//! Property lookup across inconsistent feature schemas.
//!
//! Every dataset names the same semantic field differently, so each field is
//! described by one ordered list of candidate keys and read through
//! [`first_text`]. Call sites never spell key names themselves.

use serde_json::{Map, Value};

use super::{code::RegionCode, Normalizer};

/// Candidate keys for a feature's region code, in priority order.
pub const CODE_KEYS: &[&str] = &["ISO2", "CNTR_ID", "ISO_A2", "iso2", "cntr_id", "iso_a2"];

/// Candidate keys for a feature's display name, in priority order.
pub const NAME_KEYS: &[&str] = &["NAME_EN", "name", "NAME", "CNTR_NAME"];

/// Display name used when no candidate name key is present.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Get the first candidate key holding a usable value, as text.
///
/// Null, empty and whitespace-only strings are skipped; numbers are rendered.
pub fn first_text(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| value_text(props.get(*key)?))
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolve a feature's canonical code from its properties, then its `id`.
pub fn feature_code(feature: &Value, normalizer: &Normalizer) -> Option<RegionCode> {
    let from_props = feature.get("properties")
        .and_then(Value::as_object)
        .and_then(|props| first_text(props, CODE_KEYS));

    from_props
        .or_else(|| feature.get("id").and_then(value_text))
        .map(|raw| normalizer.normalize(&raw))
}

/// Resolve a display name from a property bag.
pub fn feature_name(props: &Map<String, Value>) -> String {
    first_text(props, NAME_KEYS).unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn first_present_key_wins() {
        let p = props(json!({ "iso_a2": "FR", "CNTR_ID": "DE" }));
        assert_eq!(first_text(&p, CODE_KEYS).as_deref(), Some("DE"));
    }

    #[test]
    fn null_and_empty_values_are_skipped() {
        let p = props(json!({ "ISO2": null, "CNTR_ID": "  ", "ISO_A2": "AT" }));
        assert_eq!(first_text(&p, CODE_KEYS).as_deref(), Some("AT"));
    }

    #[test]
    fn code_falls_back_to_feature_id() {
        let normalizer = Normalizer::default();
        let feature = json!({ "id": "gr", "properties": { "NAME": "Greece" } });
        assert_eq!(feature_code(&feature, &normalizer).map(|c| c.to_string()).as_deref(), Some("EL"));

        let anonymous = json!({ "properties": {} });
        assert_eq!(feature_code(&anonymous, &normalizer), None);
    }

    #[test]
    fn name_defaults_to_unknown() {
        assert_eq!(feature_name(&props(json!({ "CNTR_NAME": "Magyarország" }))), "Magyarország");
        assert_eq!(feature_name(&props(json!({ "NAME_EN": "Hungary", "name": "x" }))), "Hungary");
        assert_eq!(feature_name(&Map::new()), UNKNOWN_NAME);
    }
}
