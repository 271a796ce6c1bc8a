//! The single failure reported at the process boundary.

use thiserror::Error;

use crate::azure::AzureOpenAiError;

/// Asking the question failed.
///
/// Covers transport failures, rejected credentials, and responses missing the
/// answer or citation payload. Callers are expected to report it and print no
/// partial answer.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct OperationFailed {
    #[from]
    source: AzureOpenAiError,
}

impl OperationFailed {
    /// Returns the underlying client error.
    pub fn cause(&self) -> &AzureOpenAiError {
        &self.source
    }
}
