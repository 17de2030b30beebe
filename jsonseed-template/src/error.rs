//! Error types for template loading and expansion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while loading or expanding a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Payload file missing or unreadable.
    #[error("failed to read payload {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload file is not valid JSON.
    #[error("payload {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: jsonseed_types::Error,
    },

    /// A token was recognized but its arguments are malformed.
    #[error("malformed token {token:?}: {reason}")]
    TokenSyntax { token: String, reason: String },
}

impl TemplateError {
    /// Whether this error came from reading or parsing the payload file.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }

    pub(crate) fn token_syntax(token: &str, reason: impl Into<String>) -> Self {
        Self::TokenSyntax {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
