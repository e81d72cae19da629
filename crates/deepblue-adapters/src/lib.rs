//! Infrastructure adapters for deepblue.
//!
//! This crate implements the ports defined in `deepblue_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod detection;
pub mod filesystem;

// Re-export commonly used adapters
pub use detection::{CommandVersionDetector, ManifestProjectDetector};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
