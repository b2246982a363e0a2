//! JSON decoding and encoding for the invocation envelope.

use crate::model::{SecretCreationResult, SecretDefinition};

/// Decodes an envelope body into an ordered batch of secret definitions.
///
/// # Errors
///
/// Returns an error if the body is not a JSON list of definition objects.
pub fn decode_batch(body: &str) -> Result<Vec<SecretDefinition>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Encodes the ordered result list as the JSON array response body.
pub fn encode_results(results: &[SecretCreationResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_preserves_order() {
        let body = r#"[
            {"name":"a","username":"u1","password":"p1"},
            {"name":"b","username":"u2","password":"p2"}
        ]"#;
        let defs = decode_batch(body).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "a");
        assert_eq!(defs[1].name, "b");
        assert_eq!(defs[1].username, "u2");
    }

    #[test]
    fn test_decode_empty_list() {
        let defs = decode_batch("[]").unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let body = r#"[{"name":"a","username":"u","password":"p","comment":"extra"}]"#;
        let defs = decode_batch(body).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "a");
    }

    #[test]
    fn test_decode_single_object_fails() {
        // A bare object instead of a list is a schema mismatch
        let body = r#"{"name":"a","username":"u","password":"p"}"#;
        assert!(decode_batch(body).is_err());
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let body = r#"[{"name":"a","username":"u"}]"#;
        assert!(decode_batch(body).is_err());
    }

    #[test]
    fn test_decode_invalid_json_fails() {
        assert!(decode_batch("not json").is_err());
    }

    #[test]
    fn test_encode_empty_results() {
        assert_eq!(encode_results(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_encode_round_trips() {
        let results = vec![SecretCreationResult {
            arn: "arn:a".to_string(),
            name: "a".to_string(),
            version_id: "v1".to_string(),
            error: String::new(),
        }];
        let body = encode_results(&results).unwrap();
        let decoded: Vec<SecretCreationResult> = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, results);
    }
}
