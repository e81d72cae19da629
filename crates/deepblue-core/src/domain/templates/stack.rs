//! The contract every per-stack generator fulfils.
//!
//! A stack only describes what differs between technologies: its build
//! recipe, its runtime environment and any source mounts. Assembling the
//! orchestration document (app service, datastore fragments, proxy for
//! fixed-port stacks, network) is shared and lives in the default methods.

use crate::domain::{
    DomainValidator,
    entities::{
        DockerTemplate, Dockerfile, TemplateConfig,
        compose::{APP_SERVICE, BuildSpec, ComposeFile, DB_SERVICE, Service},
    },
    error::DomainError,
    templates::{datastore::DatastoreFragments, proxy},
    value_objects::Technology,
};

/// Header line every generated build recipe starts with.
pub(crate) const GENERATED_BY: &str = "Generated by deepblue";

pub trait StackTemplate {
    fn technology(&self) -> Technology;

    /// The build recipe.
    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile;

    /// Stack variables for the app service, without the datastore's
    /// connection variable.
    fn environment(&self, config: &TemplateConfig) -> Vec<String>;

    /// Source mounts for the app service.
    fn app_volumes(&self, _config: &TemplateConfig) -> Vec<String> {
        Vec::new()
    }

    /// The typed orchestration document.
    fn compose(&self, config: &TemplateConfig) -> ComposeFile {
        let datastore = DatastoreFragments::from_config(config);

        let mut app = Service::from_build(BuildSpec::default()).port(format!(
            "${{PORT:-{}}}:{}",
            config.port(),
            config.container_port()
        ));
        for pair in self.environment(config) {
            app = app.env(pair);
        }
        if let Some(connection) = datastore.connection_env() {
            app = app.env(connection);
        }
        for mount in self.app_volumes(config) {
            app = app.volume(mount);
        }
        if let Some(dependency) = datastore.dependency() {
            app = app.depends_on(DB_SERVICE, dependency);
        }

        let mut doc = ComposeFile::new().with_service(APP_SERVICE, app);
        if config.is_fixed_port() {
            doc = doc.with_service(proxy::PROXY_SERVICE, proxy::proxy_service(config.port()));
        }
        datastore.apply(doc)
    }

    /// Render both documents.
    ///
    /// The orchestration document is checked for dangling references before
    /// it is rendered.
    fn generate(&self, config: &TemplateConfig) -> Result<DockerTemplate, DomainError> {
        let compose = self.compose(config);
        DomainValidator::validate_compose(&compose)?;
        Ok(DockerTemplate {
            dockerfile: self.dockerfile(config).render(),
            docker_compose: compose.render()?,
        })
    }
}
