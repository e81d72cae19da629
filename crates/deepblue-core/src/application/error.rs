//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A generated file would replace an existing one.
    #[error("{path} already exists")]
    ArtifactExists { path: PathBuf },

    /// A write failed after earlier files were already written.
    #[error("failed to write {failed} after writing {} file(s): {reason}", written.len())]
    PartialWrite {
        written: Vec<PathBuf>,
        failed: PathBuf,
        reason: String,
    },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ArtifactExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite it".into(),
                "Or use --dry-run to print the files instead".into(),
            ],
            Self::PartialWrite { written, .. } => {
                let mut out = vec!["These files were written before the failure:".to_string()];
                out.extend(written.iter().map(|p| format!("  {}", p.display())));
                out.push("Fix the problem and re-run with --force".into());
                out
            }
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {name}"),
                "This is likely a configuration error".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::PartialWrite { .. } => ErrorCategory::Internal,
            Self::ArtifactExists { .. } => ErrorCategory::Validation,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
        }
    }
}
