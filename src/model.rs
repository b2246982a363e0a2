use serde::{Deserialize, Serialize};

/// One secret to create, as supplied by the caller.
///
/// Unknown JSON fields are ignored; missing fields fail the decode.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretDefinition {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// The JSON document submitted as the secret's protected value.
///
/// Always built by serialization so usernames and passwords containing
/// quotes or backslashes produce a valid document.
#[derive(Debug, Serialize)]
pub struct CredentialPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a SecretDefinition> for CredentialPayload<'a> {
    fn from(def: &'a SecretDefinition) -> Self {
        Self {
            username: &def.username,
            password: &def.password,
        }
    }
}

/// Outcome for one definition, index-aligned with the input batch.
///
/// `error` is empty on success; on failure the other fields stay empty.
/// `version_id` goes over the wire as `versionid`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretCreationResult {
    pub arn: String,
    pub name: String,
    #[serde(rename = "versionid")]
    pub version_id: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_payload_shape() {
        let def = SecretDefinition {
            name: "s1".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let json = serde_json::to_string(&CredentialPayload::from(&def)).unwrap();
        assert_eq!(json, r#"{"username":"u","password":"p"}"#);
    }

    #[test]
    fn test_credential_payload_escapes_quotes() {
        let def = SecretDefinition {
            name: "s1".to_string(),
            username: "u".to_string(),
            password: r#"p"w\d"#.to_string(),
        };
        let json = serde_json::to_string(&CredentialPayload::from(&def)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["password"], r#"p"w\d"#);
    }

    #[test]
    fn test_result_uses_versionid_key() {
        let result = SecretCreationResult {
            arn: "arn:a".to_string(),
            name: "a".to_string(),
            version_id: "v1".to_string(),
            error: String::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"arn":"arn:a","name":"a","versionid":"v1","error":""}"#
        );
    }

    #[test]
    fn test_result_default_is_all_empty() {
        let result = SecretCreationResult::default();
        assert!(result.arn.is_empty());
        assert!(result.name.is_empty());
        assert!(result.version_id.is_empty());
        assert!(result.error.is_empty());
    }
}
