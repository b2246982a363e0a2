use dashmap::DashMap;
use uuid::Uuid;

use super::{CreatedSecret, ErrorCategory, SecretStore, StoreError};
use crate::model::{CredentialPayload, SecretDefinition};

#[derive(Debug, Clone)]
struct StoredSecret {
    arn: String,
    version_id: String,
    secret_string: String,
}

/// In-memory [`SecretStore`] backing `--in-memory` / `--dry-run` runs and
/// the test suite.
///
/// ARNs follow the LocalStack shape so tooling that parses them keeps
/// working. Duplicate names are rejected the way the real service rejects
/// them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: DashMap<String, StoredSecret>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            secrets: DashMap::new(),
        }
    }

    /// Number of secrets currently held.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Looks up a created secret by name.
    pub fn get(&self, name: &str) -> Option<CreatedSecret> {
        self.secrets.get(name).map(|s| CreatedSecret {
            arn: s.arn.clone(),
            name: name.to_string(),
            version_id: s.version_id.clone(),
        })
    }

    /// The stored secret string for `name`, if present.
    pub fn secret_string(&self, name: &str) -> Option<String> {
        self.secrets.get(name).map(|s| s.secret_string.clone())
    }
}

#[async_trait::async_trait]
impl SecretStore for MemoryStore {
    async fn create(&self, def: &SecretDefinition) -> Result<CreatedSecret, StoreError> {
        if self.secrets.contains_key(&def.name) {
            return Err(StoreError::new(
                ErrorCategory::ResourceExists,
                format!("ResourceExistsException: secret {} already exists", def.name),
            ));
        }

        let secret_string = serde_json::to_string(&CredentialPayload::from(def))
            .map_err(|e| StoreError::new(ErrorCategory::Other, e.to_string()))?;

        let version_id = Uuid::new_v4().to_string();
        let arn = format!(
            "arn:aws:secretsmanager:us-east-1:000000000000:secret:{}-{}",
            def.name,
            &Uuid::new_v4().to_string()[..6]
        );

        self.secrets.insert(
            def.name.clone(),
            StoredSecret {
                arn: arn.clone(),
                version_id: version_id.clone(),
                secret_string,
            },
        );

        Ok(CreatedSecret {
            arn,
            name: def.name.clone(),
            version_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str) -> SecretDefinition {
        SecretDefinition {
            name: name.to_string(),
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_populates_all_fields() {
        let store = MemoryStore::new();
        let created = store.create(&def("db/primary")).await.unwrap();

        assert!(created.arn.contains("db/primary"));
        assert_eq!(created.name, "db/primary");
        assert!(!created.version_id.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("db/primary").unwrap().arn, created.arn);
    }

    #[tokio::test]
    async fn test_create_stores_credential_payload() {
        let store = MemoryStore::new();
        store.create(&def("db/primary")).await.unwrap();

        assert_eq!(
            store.secret_string("db/primary").as_deref(),
            Some(r#"{"username":"admin","password":"hunter2"}"#)
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = MemoryStore::new();
        store.create(&def("db/primary")).await.unwrap();

        let err = store.create(&def("db/primary")).await.unwrap_err();
        assert_eq!(err.category, ErrorCategory::ResourceExists);
        assert!(err.to_string().contains("already exists"));
        assert_eq!(store.len(), 1);
    }
}
