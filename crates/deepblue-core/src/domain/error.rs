// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Unknown datastore tags are deliberately absent from the generation path:
/// `UnknownDatastore` is only produced by the strict `FromStr` parser and is
/// swallowed at the configuration boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid port '{value}': must be a number between 1 and 65535")]
    InvalidPort { value: String },

    #[error("invalid version '{version}' for {technology}: {reason}")]
    InvalidVersion {
        technology: String,
        version: String,
        reason: String,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Unsupported / Unknown tags
    // ========================================================================
    #[error("unsupported technology '{tag}'")]
    UnsupportedTechnology { tag: String },

    #[error("unknown datastore '{tag}'")]
    UnknownDatastore { tag: String },

    // ========================================================================
    // Rendering
    // ========================================================================
    #[error("failed to render {document}: {reason}")]
    RenderFailed {
        document: &'static str,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPort { .. } => vec![
                "Use a port between 1 and 65535".into(),
                "Example: --port 8080".into(),
            ],
            Self::InvalidVersion {
                technology,
                version,
                ..
            } => {
                let mut out = vec![format!("'{version}' is not offered for {technology}")];
                if let Ok(tech) = technology.parse::<crate::domain::Technology>() {
                    let offered = crate::domain::capabilities::technology_def(tech).versions;
                    out.push(format!("Offered versions: {}", offered.join(", ")));
                }
                out
            }
            Self::UnsupportedTechnology { tag } => vec![
                format!("'{tag}' is not a supported technology"),
                "Try: deepblue list".into(),
            ],
            Self::UnknownDatastore { tag } => vec![
                format!("'{tag}' is not a known datastore"),
                "Supported datastores: postgres, mysql, mongodb, redis".into(),
            ],
            Self::RenderFailed { .. } => vec![
                "This is likely a bug in deepblue".into(),
                "Please report it with the command you ran".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPort { .. }
            | Self::InvalidVersion { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnsupportedTechnology { .. } | Self::UnknownDatastore { .. } => {
                ErrorCategory::Unsupported
            }
            Self::RenderFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_version_lists_offered_versions() {
        let err = DomainError::InvalidVersion {
            technology: "go".into(),
            version: "0.9".into(),
            reason: "not offered".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("1.24")));
    }

    #[test]
    fn categories() {
        assert_eq!(
            DomainError::InvalidPort { value: "0".into() }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::UnsupportedTechnology { tag: "x".into() }.category(),
            ErrorCategory::Unsupported
        );
    }
}
