//! Template dispatcher: technology → generator.
//!
//! The match in [`generator`] is exhaustive over the closed [`Technology`]
//! enum, so a technology without a generator does not compile. The tag-level
//! entry point [`dispatch_request`] is where a tag outside that enum is
//! turned into a hard `Configuration` error.

use tracing::{debug, instrument, warn};

use crate::{
    domain::{
        ConfigRequest, DockerTemplate, DomainError, StackTemplate, Technology, TemplateConfig,
        templates::{
            GoTemplate, JavaTemplate, NodeTemplate, PhpTemplate, PythonTemplate, RubyTemplate,
            RustTemplate,
        },
    },
    error::{DeepblueError, DeepblueResult},
};

/// The generator for a technology.
pub fn generator(technology: Technology) -> &'static dyn StackTemplate {
    match technology {
        Technology::Node => &NodeTemplate,
        Technology::Python => &PythonTemplate,
        Technology::Go => &GoTemplate,
        Technology::Java => &JavaTemplate,
        Technology::Php => &PhpTemplate,
        Technology::Ruby => &RubyTemplate,
        Technology::Rust => &RustTemplate,
    }
}

/// Generate both documents for a validated configuration.
#[instrument(skip_all, fields(technology = %config.technology(), database = ?config.database()))]
pub fn dispatch(config: &TemplateConfig) -> DeepblueResult<DockerTemplate> {
    let template = generator(config.technology()).generate(config)?;
    debug!(
        dockerfile_bytes = template.dockerfile.len(),
        compose_bytes = template.docker_compose.len(),
        "Generated documents"
    );
    Ok(template)
}

/// Resolve an untyped request and generate.
///
/// Fails with [`DeepblueError::Configuration`] when the technology tag is not
/// supported; nothing is generated in that case. An unrecognised datastore
/// tag is logged and dropped.
#[instrument(skip_all, fields(technology = %request.technology))]
pub fn dispatch_request(request: &ConfigRequest) -> DeepblueResult<DockerTemplate> {
    let config = resolve_request(request)?;
    dispatch(&config)
}

/// Convert a request into a configuration, applying the dispatcher's error
/// policy.
pub fn resolve_request(request: &ConfigRequest) -> DeepblueResult<TemplateConfig> {
    if let Some(tag) = request.unrecognized_database() {
        warn!(datastore = %tag, "Unrecognised datastore, generating without one");
    }

    request.resolve().map_err(|e| match e {
        DomainError::UnsupportedTechnology { tag } => DeepblueError::Configuration {
            message: format!("unsupported technology '{tag}'"),
        },
        other => DeepblueError::Domain(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn every_technology_has_its_own_generator() {
        for tech in Technology::ALL {
            assert_eq!(generator(tech).technology(), tech);
        }
    }

    #[test]
    fn unknown_technology_is_a_configuration_error() {
        let err = dispatch_request(&ConfigRequest::new("cobol")).unwrap_err();
        assert!(matches!(err, DeepblueError::Configuration { .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn invalid_port_stays_a_domain_error() {
        let err = dispatch_request(&ConfigRequest::new("go").with_port(0)).unwrap_err();
        assert!(matches!(
            err,
            DeepblueError::Domain(DomainError::InvalidPort { .. })
        ));
    }

    #[test]
    fn unknown_datastore_generates_without_db() {
        let out = dispatch_request(&ConfigRequest::new("go").with_database("cassandra")).unwrap();
        assert!(!out.docker_compose.contains("db:"));
    }

    #[test]
    fn dispatch_is_deterministic() {
        let config = ConfigRequest::new("python")
            .with_database("postgres")
            .resolve()
            .unwrap();
        assert_eq!(dispatch(&config).unwrap(), dispatch(&config).unwrap());
    }
}
