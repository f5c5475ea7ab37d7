//! Compact share codes for field mappings.
//!
//! A mapping is cleaned of empty values, rendered as canonical JSON (sorted
//! keys) and encoded as URL-safe base64 without padding:
//!
//! ```text
//! {"port":[80,443]}  ->  eyJwb3J0IjpbODAsNDQzXX0
//! ```
//!
//! Older links used standard padded base64; [`decode_fields`] accepts both.

use crate::{NormalizedFields, QueryError, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;

/// Recursively strip nulls, empty strings and empty containers.
///
/// Returns `None` when nothing is left.
#[must_use]
pub fn clean_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(clean_value).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: serde_json::Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| clean_value(v).map(|v| (k, v)))
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        other => Some(other),
    }
}

/// Encode any JSON value as a share code.
pub fn encode_value(value: Value) -> Result<String> {
    let cleaned = clean_value(value).unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    let json = serde_json::to_string(&cleaned)?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Decode a share code into JSON, accepting URL-safe and standard forms.
pub fn decode_value(code: &str) -> Result<Value> {
    let code = code.trim();
    if code.is_empty() {
        return Err(QueryError::Decode("empty share code".into()));
    }

    let url_safe = (code.contains('-') || code.contains('_')) && !code.contains('=');
    let normalized = if url_safe {
        repad(&code.replace('-', "+").replace('_', "/"))
    } else {
        repad(code)
    };

    let bytes = STANDARD
        .decode(normalized.as_bytes())
        .map_err(|e| QueryError::Decode(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Encode a field mapping as a share code.
pub fn encode_fields(fields: &NormalizedFields) -> Result<String> {
    encode_value(fields.to_json())
}

/// Decode a share code back into a field mapping.
pub fn decode_fields(code: &str) -> Result<NormalizedFields> {
    NormalizedFields::from_json(&decode_value(code)?)
}

fn repad(code: &str) -> String {
    let mut padded = code.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use serde_json::json;

    #[test]
    fn test_clean_value_strips_empties() {
        let cleaned = clean_value(json!({
            "ip": "1.1.1.1",
            "org": "",
            "port": [80, null, ""],
            "tags": [],
            "nested": {"a": null, "b": {}},
            "flag": false
        }))
        .unwrap();
        assert_eq!(cleaned, json!({"ip": "1.1.1.1", "port": [80], "flag": false}));
        assert_eq!(clean_value(json!({"a": ""})), None);
    }

    #[test]
    fn test_roundtrip_matches_cleaned_input() {
        let fields = NormalizedFields::from_json(&json!({
            "domain": "example.com",
            "port": [80, 443],
            "org": "",
            "vuln": null,
            "expiredCert": true
        }))
        .unwrap();

        let code = encode_fields(&fields).unwrap();
        assert!(!code.contains('='));
        assert!(!code.contains('+'));
        assert!(!code.contains('/'));

        let decoded = decode_fields(&code).unwrap();
        assert_eq!(
            decoded.to_json(),
            clean_value(fields.to_json()).unwrap()
        );
        assert_eq!(decoded.values(Field::Port), vec!["80", "443"]);
    }

    #[test]
    fn test_decodes_legacy_padded_form() {
        let json = r#"{"title":"a?b>c"}"#;
        let legacy = STANDARD.encode(json);
        assert!(legacy.ends_with('='));
        let decoded = decode_fields(&legacy).unwrap();
        assert_eq!(decoded.values(Field::Title), vec!["a?b>c"]);
    }

    #[test]
    fn test_decodes_url_safe_with_special_chars() {
        // payload encodes to both + and / in standard base64
        let value = json!({"banner": ">>>???"});
        let code = encode_value(value.clone()).unwrap();
        assert!(code.contains('-') || code.contains('_'));
        assert_eq!(decode_value(&code).unwrap(), value);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode_fields("").is_err());
        assert!(decode_fields("!!!not base64!!!").is_err());
        // valid base64, but the payload is a JSON array
        let code = URL_SAFE_NO_PAD.encode("[1,2]");
        assert!(decode_fields(&code).is_err());
    }

    #[test]
    fn test_empty_mapping_encodes_to_empty_object() {
        let code = encode_fields(&NormalizedFields::new()).unwrap();
        assert_eq!(decode_value(&code).unwrap(), json!({}));
    }
}
