//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `deepblue-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProjectDetector`: Manifest-based project detection
//!   - `VersionDetector`: Local toolchain version sniffing
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DetectedProject, Filesystem, ProjectDetector, VersionDetector};

#[cfg(test)]
pub use output::{MockFilesystem, MockProjectDetector, MockVersionDetector};
