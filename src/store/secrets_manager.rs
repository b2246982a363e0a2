use aws_sdk_secretsmanager::operation::create_secret::CreateSecretError;
use tracing::warn;

use super::{CreatedSecret, ErrorCategory, SecretStore, StoreError};
use crate::model::{CredentialPayload, SecretDefinition};

/// Creates secrets in AWS Secrets Manager.
///
/// Credentials and region come from the ambient AWS configuration (env vars,
/// profile, instance role) already loaded by `aws_config::load_from_env`; the
/// process needs `secretsmanager:CreateSecret` on the target names.
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_secretsmanager::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl SecretStore for SecretsManagerStore {
    /// Issues one CreateSecret call for `def`.
    ///
    /// The secret string is the serialized credential payload. Fields absent
    /// from the service response come back as empty strings.
    async fn create(&self, def: &SecretDefinition) -> Result<CreatedSecret, StoreError> {
        let secret_string = serde_json::to_string(&CredentialPayload::from(def))
            .map_err(|e| StoreError::new(ErrorCategory::Other, e.to_string()))?;

        let resp = self
            .client
            .create_secret()
            .name(&def.name)
            .secret_string(secret_string)
            .send()
            .await;

        match resp {
            Ok(out) => Ok(CreatedSecret {
                arn: out.arn().unwrap_or_default().to_string(),
                name: out.name().unwrap_or_default().to_string(),
                version_id: out.version_id().unwrap_or_default().to_string(),
            }),
            Err(err) => {
                let service_err = err.into_service_error();
                let category = classify(&service_err);
                warn!(
                    secret = %def.name,
                    code = category.as_str(),
                    error = %service_err,
                    "CreateSecret failed"
                );
                Err(StoreError::new(category, service_err.to_string()))
            }
        }
    }
}

/// Maps the service's failure codes onto [`ErrorCategory`].
fn classify(err: &CreateSecretError) -> ErrorCategory {
    match err {
        CreateSecretError::InvalidParameterException(_) => ErrorCategory::InvalidParameter,
        CreateSecretError::InvalidRequestException(_) => ErrorCategory::InvalidRequest,
        CreateSecretError::LimitExceededException(_) => ErrorCategory::LimitExceeded,
        CreateSecretError::EncryptionFailure(_) => ErrorCategory::EncryptionFailure,
        CreateSecretError::ResourceExistsException(_) => ErrorCategory::ResourceExists,
        CreateSecretError::ResourceNotFoundException(_) => ErrorCategory::ResourceNotFound,
        CreateSecretError::MalformedPolicyDocumentException(_) => ErrorCategory::MalformedPolicy,
        CreateSecretError::InternalServiceError(_) => ErrorCategory::InternalService,
        CreateSecretError::PreconditionNotMetException(_) => ErrorCategory::PreconditionNotMet,
        _ => ErrorCategory::Other,
    }
}
