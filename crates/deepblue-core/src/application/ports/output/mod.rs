//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `deepblue-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::Technology;
use crate::error::DeepblueResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `deepblue_adapters::filesystem::LocalFilesystem` (production)
/// - `deepblue_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DeepblueResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> DeepblueResult<()>;

    /// Read a whole file.
    fn read_to_string(&self, path: &Path) -> DeepblueResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// What a manifest says about a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedProject {
    pub technology: Technology,
    /// Runtime version pinned by the manifest, if any.
    pub version: Option<String>,
    /// Package/module name, if the manifest declares one.
    pub name: Option<String>,
}

impl DetectedProject {
    pub fn new(technology: Technology) -> Self {
        Self {
            technology,
            version: None,
            name: None,
        }
    }
}

/// Port for manifest-based project detection.
///
/// Implemented by `deepblue_adapters::detection::ManifestProjectDetector`.
///
/// Unreadable or malformed manifests count as "not detected"; detection
/// never fails.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectDetector: Send + Sync {
    fn detect(&self, dir: &Path) -> Option<DetectedProject>;
}

/// Port for local toolchain version sniffing.
///
/// Implemented by `deepblue_adapters::detection::CommandVersionDetector`.
/// A missing toolchain is `None`, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait VersionDetector: Send + Sync {
    fn detect(&self, technology: Technology) -> Option<String>;
}
