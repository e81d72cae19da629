//! Unified error handling for deepblue core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for deepblue-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeepblueError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A technology tag outside the supported set reached the dispatcher.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DeepblueError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `deepblue list` to see supported technologies".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in deepblue".into(),
                "Please report it together with the command you ran".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Unsupported => ErrorCategory::Unsupported,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DeepblueResult<T> = Result<T, DeepblueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_categories_are_preserved() {
        let err: DeepblueError = DomainError::InvalidPort { value: "0".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: DeepblueError = DomainError::UnsupportedTechnology { tag: "x".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }

    #[test]
    fn configuration_error_points_at_list() {
        let err = DeepblueError::Configuration {
            message: "unsupported technology 'cobol'".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("deepblue list")));
    }
}
