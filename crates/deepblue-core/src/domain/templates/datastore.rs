//! Datastore fragment library.
//!
//! Given a datastore kind and an optional host-port override, builds three
//! independent fragments: the `db` service, its health check and its named
//! volume. An absent or unrecognised kind yields three empty fragments;
//! generation never fails on a datastore tag.

use crate::domain::{
    capabilities::{self, DatastoreDef},
    entities::{
        TemplateConfig,
        compose::{ComposeFile, DB_SERVICE, Dependency, HealthCheck, Service, VolumeDecl},
    },
    error::DomainError,
    value_objects::{DatabaseKind, Port},
};

/// The fragments contributed by one datastore, or none at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatastoreFragments {
    kind: Option<DatabaseKind>,
    service: Option<Service>,
    health_check: Option<HealthCheck>,
    volume: Option<(String, VolumeDecl)>,
}

impl DatastoreFragments {
    /// No datastore.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fragments for a known datastore.
    ///
    /// `port_override` replaces the default only on the host side of the
    /// mapping; the container side is always the canonical port.
    pub fn for_kind(kind: DatabaseKind, port_override: Option<Port>) -> Self {
        let def = capabilities::datastore_def(kind);
        let health_check = health_check_for(def);
        let volume_name = kind.volume_name();
        let host_port = port_override.map_or(def.port, Port::get);

        let mut service = Service::from_image(def.image)
            .port(format!("${{DB_PORT:-{host_port}}}:{}", def.port))
            .volume(format!("{volume_name}:{}", def.data_path))
            .healthcheck(health_check.clone());
        for pair in def.environment {
            service = service.env(*pair);
        }
        if let Some(command) = def.command {
            service = service.command(command);
        }

        Self {
            kind: Some(kind),
            service: Some(service),
            health_check,
            volume: Some((volume_name, VolumeDecl::default())),
        }
    }

    /// Fragments for a free-form tag. Unknown tags, `"none"` and the empty
    /// string all produce [`empty`](Self::empty).
    pub fn for_tag(tag: &str, port_override: Option<Port>) -> Self {
        DatabaseKind::parse_lenient(tag)
            .map_or_else(Self::empty, |kind| Self::for_kind(kind, port_override))
    }

    pub fn from_config(config: &TemplateConfig) -> Self {
        config
            .database()
            .map_or_else(Self::empty, |kind| Self::for_kind(kind, config.database_port()))
    }

    pub fn kind(&self) -> Option<DatabaseKind> {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn health_check(&self) -> Option<&HealthCheck> {
        self.health_check.as_ref()
    }

    pub fn volume(&self) -> Option<(&str, &VolumeDecl)> {
        self.volume.as_ref().map(|(name, decl)| (name.as_str(), decl))
    }

    /// How the app service should wait for the datastore.
    pub fn dependency(&self) -> Option<Dependency> {
        self.kind?;
        Some(if self.health_check.is_some() {
            Dependency::healthy()
        } else {
            Dependency::started()
        })
    }

    /// The app-side connection variable, as an unresolved reference.
    pub fn connection_env(&self) -> Option<String> {
        let def = capabilities::datastore_def(self.kind?);
        Some(format!("{0}=${{{0}}}", def.connection_env))
    }

    /// Add the `db` service and its volume to a document.
    pub fn apply(&self, mut doc: ComposeFile) -> ComposeFile {
        if let Some(service) = &self.service {
            doc = doc.with_service(DB_SERVICE, service.clone());
        }
        if let Some((name, decl)) = &self.volume {
            doc = doc.with_volume(name.clone(), decl.clone());
        }
        doc
    }

    // ── Rendered fragments ───────────────────────────────────────────────────

    /// The `db:` service entry as YAML, or `""` without a datastore.
    pub fn service_fragment(&self) -> Result<String, DomainError> {
        match &self.service {
            Some(service) => render_fragment(&[(DB_SERVICE, service)]),
            None => Ok(String::new()),
        }
    }

    /// The `healthcheck:` block as YAML, or `""` when no probe is defined.
    pub fn health_check_fragment(&self) -> Result<String, DomainError> {
        match &self.health_check {
            Some(check) => render_fragment(&[("healthcheck", check)]),
            None => Ok(String::new()),
        }
    }

    /// The named volume declaration as YAML, or `""` without a datastore.
    pub fn volume_fragment(&self) -> Result<String, DomainError> {
        match &self.volume {
            Some((name, decl)) => render_fragment(&[(name.as_str(), decl)]),
            None => Ok(String::new()),
        }
    }
}

fn health_check_for(def: &DatastoreDef) -> Option<HealthCheck> {
    def.health_probe
        .map(|p| HealthCheck::shell(p.command, p.interval, p.timeout, p.retries))
}

fn render_fragment<T: serde::Serialize>(entries: &[(&str, &T)]) -> Result<String, DomainError> {
    let map: std::collections::BTreeMap<&str, &T> = entries.iter().copied().collect();
    serde_yaml::to_string(&map).map_err(|e| DomainError::RenderFailed {
        document: "datastore fragment",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::compose::{APP_NETWORK, DependencyCondition, RESTART_POLICY};

    #[test]
    fn postgres_service_fragment() {
        let frags = DatastoreFragments::for_kind(DatabaseKind::Postgres, None);
        let svc = frags.service().unwrap();

        assert_eq!(svc.image.as_deref(), Some("postgres:17-alpine"));
        assert_eq!(svc.ports, vec!["${DB_PORT:-5432}:5432".to_string()]);
        assert_eq!(
            svc.volumes,
            vec!["postgres_data:/var/lib/postgresql/data".to_string()]
        );
        assert_eq!(svc.restart.as_deref(), Some(RESTART_POLICY));
        assert_eq!(svc.networks, vec![APP_NETWORK.to_string()]);
        assert!(svc.environment.iter().any(|e| e.starts_with("POSTGRES_PASSWORD=")));
        assert!(svc.healthcheck.is_some());
    }

    #[test]
    fn port_override_only_changes_host_side() {
        let port = Port::new(15432).unwrap();
        let frags = DatastoreFragments::for_kind(DatabaseKind::Postgres, Some(port));
        assert_eq!(
            frags.service().unwrap().ports,
            vec!["${DB_PORT:-15432}:5432".to_string()]
        );
    }

    #[test]
    fn canonical_container_ports() {
        for (kind, port) in [
            (DatabaseKind::Postgres, 5432),
            (DatabaseKind::Mysql, 3306),
            (DatabaseKind::Mongodb, 27017),
            (DatabaseKind::Redis, 6379),
        ] {
            let frags = DatastoreFragments::for_kind(kind, Some(Port::new(1).unwrap()));
            let mapping = &frags.service().unwrap().ports[0];
            assert!(mapping.ends_with(&format!(":{port}")), "{kind}: {mapping}");
        }
    }

    #[test]
    fn redis_has_no_health_check_and_plain_dependency() {
        let frags = DatastoreFragments::for_kind(DatabaseKind::Redis, None);
        assert!(frags.health_check().is_none());
        assert!(frags.service().unwrap().environment.is_empty());
        assert_eq!(frags.health_check_fragment().unwrap(), "");
        assert_eq!(
            frags.dependency().unwrap().condition,
            DependencyCondition::ServiceStarted
        );
        assert_eq!(frags.connection_env().unwrap(), "REDIS_URL=${REDIS_URL}");
    }

    #[test]
    fn probed_datastores_gate_on_health() {
        for kind in [
            DatabaseKind::Postgres,
            DatabaseKind::Mysql,
            DatabaseKind::Mongodb,
        ] {
            let frags = DatastoreFragments::for_kind(kind, None);
            let check = frags.health_check().unwrap();
            assert_eq!(check.interval, "5s");
            assert_eq!(check.timeout, "5s");
            assert_eq!(check.retries, 5);
            assert_eq!(
                frags.dependency().unwrap().condition,
                DependencyCondition::ServiceHealthy
            );
        }
    }

    #[test]
    fn unknown_and_none_tags_yield_empty_fragments() {
        for tag in ["none", "", "cassandra"] {
            let frags = DatastoreFragments::for_tag(tag, None);
            assert!(frags.is_empty());
            assert_eq!(frags.service_fragment().unwrap(), "");
            assert_eq!(frags.health_check_fragment().unwrap(), "");
            assert_eq!(frags.volume_fragment().unwrap(), "");
            assert_eq!(frags.dependency(), None);
            assert_eq!(frags.connection_env(), None);
        }
    }

    #[test]
    fn volume_fragment_declares_one_named_volume() {
        let frags = DatastoreFragments::for_tag("mongo", None);
        let yaml = frags.volume_fragment().unwrap();
        assert!(yaml.starts_with("mongodb_data:"));
        assert_eq!(yaml.lines().count(), 1);
    }

    #[test]
    fn service_fragment_is_keyed_by_db() {
        let yaml = DatastoreFragments::for_tag("mysql", None)
            .service_fragment()
            .unwrap();
        assert!(yaml.starts_with("db:"));
        assert!(yaml.contains("mysql:9-oracle"));
        assert!(yaml.contains("mysqladmin ping"));
    }

    #[test]
    fn apply_adds_service_and_volume() {
        let doc = DatastoreFragments::for_kind(DatabaseKind::Mysql, None).apply(ComposeFile::new());
        assert!(doc.services.contains_key(DB_SERVICE));
        assert!(doc.volumes.contains_key("mysql_data"));

        let untouched = DatastoreFragments::empty().apply(ComposeFile::new());
        assert_eq!(untouched, ComposeFile::new());
    }
}
