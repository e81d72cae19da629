pub mod artifact;
pub mod compose;
pub mod config;
pub mod dockerfile;

pub use artifact::DockerTemplate;
pub use compose::ComposeFile;
pub use config::{ConfigRequest, TemplateConfig, TemplateConfigBuilder, VersionSource};
pub use dockerfile::{Dockerfile, Instruction, Stage};
