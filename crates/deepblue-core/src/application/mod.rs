//! Application layer for deepblue.
//!
//! This layer contains:
//! - **Dispatcher**: technology → generator selection
//! - **Services**: Use case orchestration (GenerateService, DetectionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation logic itself. All document rules live in `crate::domain`.

pub mod dispatcher;
pub mod error;
pub mod ports;
pub mod services;

pub use dispatcher::{dispatch, dispatch_request, resolve_request};

// Re-export main services
pub use services::{
    DetectionService, GenerateService, GeneratedFile, GenerationReport, Suggestion,
    VersionOrigin, VersionSuggestion, WriteOptions,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DetectedProject, Filesystem, ProjectDetector, VersionDetector};

pub use error::ApplicationError;
