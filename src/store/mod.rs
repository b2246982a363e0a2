//! Secret storage backends.
//!
//! [`SecretStore`] is the async trait for creating one managed secret.
//! [`SecretsManagerStore`] implements it against AWS Secrets Manager.
//! [`MemoryStore`] keeps secrets in process memory for local runs and tests.

mod memory;
mod secrets_manager;

pub use memory::MemoryStore;
pub use secrets_manager::SecretsManagerStore;

use crate::model::SecretDefinition;
use thiserror::Error;

/// The service's answer to a successful create call.
#[derive(Debug, Clone)]
pub struct CreatedSecret {
    pub arn: String,
    pub name: String,
    pub version_id: String,
}

/// Creates one managed secret per call.
///
/// Single attempt: a transient failure is surfaced once, and resubmitting
/// failed items is the caller's responsibility.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    async fn create(&self, def: &SecretDefinition) -> Result<CreatedSecret, StoreError>;
}

/// A failed create call.
///
/// `message` is the provider's error text, recorded verbatim on the item's
/// result. `category` feeds structured logging only and never changes
/// caller-visible behavior.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub category: ErrorCategory,
    pub message: String,
}

impl StoreError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Diagnostic classification of the provider's create-secret failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidParameter,
    InvalidRequest,
    LimitExceeded,
    EncryptionFailure,
    ResourceExists,
    ResourceNotFound,
    MalformedPolicy,
    InternalService,
    PreconditionNotMet,
    Other,
}

impl ErrorCategory {
    /// The provider's error code string, for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::InvalidParameter => "InvalidParameterException",
            ErrorCategory::InvalidRequest => "InvalidRequestException",
            ErrorCategory::LimitExceeded => "LimitExceededException",
            ErrorCategory::EncryptionFailure => "EncryptionFailure",
            ErrorCategory::ResourceExists => "ResourceExistsException",
            ErrorCategory::ResourceNotFound => "ResourceNotFoundException",
            ErrorCategory::MalformedPolicy => "MalformedPolicyDocumentException",
            ErrorCategory::InternalService => "InternalServiceError",
            ErrorCategory::PreconditionNotMet => "PreconditionNotMetException",
            ErrorCategory::Other => "Unknown",
        }
    }
}
