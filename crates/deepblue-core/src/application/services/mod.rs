//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate Docker files" or "detect a project".

pub mod detection_service;
pub mod generate_service;

pub use detection_service::{DetectionService, Suggestion, VersionOrigin, VersionSuggestion};
pub use generate_service::{GenerateService, GeneratedFile, GenerationReport, WriteOptions};
