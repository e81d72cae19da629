// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for deepblue.
//!
//! This module contains the template-generation engine: pure functions from
//! a validated [`TemplateConfig`] to the build recipe and orchestration
//! document. All I/O is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process or network calls
//! - **No logging**: `tracing` stays in the application layer
//! - **Deterministic**: ordered maps only, no clock, no randomness
//!
// Public API - what the world sees
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod templates;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    ComposeFile, ConfigRequest, DockerTemplate, Dockerfile, Instruction, Stage, TemplateConfig,
    TemplateConfigBuilder, VersionSource,
    artifact::{COMPOSE_FILE, DOCKERFILE, DOCKERIGNORE, NGINX_CONF},
};

pub use error::{DomainError, ErrorCategory};

pub use templates::{DatastoreFragments, StackTemplate, dockerignore, nginx_conf};

pub use value_objects::{DatabaseKind, Port, Technology};

pub use validation::DomainValidator;
