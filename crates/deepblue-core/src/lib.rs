//! deepblue Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the deepblue
//! Docker file generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          deepblue-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  Dispatcher + Application Services      │
//! │ (GenerateService, DetectionService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ProjectDetector, Version)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   deepblue-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ManifestProjectDet.)  │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TemplateConfig, generators, fragments) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use deepblue_core::prelude::*;
//!
//! let config = TemplateConfig::builder()
//!     .technology(Technology::Go)
//!     .version("1.24").unwrap()
//!     .port(Port::new(8080).unwrap())
//!     .database(Some(DatabaseKind::Postgres))
//!     .build()
//!     .unwrap();
//!
//! let template = dispatch(&config).unwrap();
//! assert!(template.dockerfile.contains(r#"CMD ["./main"]"#));
//! assert!(template.docker_compose.contains("postgres_data"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DetectionService, GenerateService, GenerationReport, WriteOptions, dispatch,
        dispatch_request,
        ports::{DetectedProject, Filesystem, ProjectDetector, VersionDetector},
    };
    pub use crate::domain::{
        ConfigRequest, DatabaseKind, DockerTemplate, Port, Technology, TemplateConfig,
        VersionSource,
    };
    pub use crate::error::{DeepblueError, DeepblueResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
