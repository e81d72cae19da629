use crate::domain::{
    entities::ComposeFile,
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    /// Check that an orchestration document has no dangling references:
    /// every `depends_on` target is a service, every network a service joins
    /// is declared, and named volumes are declared exactly when mounted.
    pub fn validate_compose(doc: &ComposeFile) -> Result<(), DomainError> {
        let dangling = |reason: String| DomainError::RenderFailed {
            document: "docker-compose.yml",
            reason,
        };

        for (name, service) in &doc.services {
            for dep in service.depends_on.keys() {
                if !doc.services.contains_key(dep) {
                    return Err(dangling(format!("{name} depends on missing service {dep}")));
                }
            }
            for net in &service.networks {
                if !doc.networks.contains_key(net) {
                    return Err(dangling(format!("{name} joins undeclared network {net}")));
                }
            }
            for mount in &service.volumes {
                if let Some(source) = named_volume(mount) {
                    if !doc.volumes.contains_key(source) {
                        return Err(dangling(format!("{name} mounts undeclared volume {source}")));
                    }
                }
            }
        }

        for volume in doc.volumes.keys() {
            let used = doc
                .services
                .values()
                .flat_map(|s| &s.volumes)
                .any(|mount| named_volume(mount) == Some(volume.as_str()));
            if !used {
                return Err(dangling(format!("volume {volume} is declared but never mounted")));
            }
        }

        Ok(())
    }
}

/// Source of a `source:target` mount when it names a volume rather than a
/// host path. Anonymous volumes (`/app/node_modules`) have no source.
fn named_volume(mount: &str) -> Option<&str> {
    let (source, _) = mount.split_once(':')?;
    let is_path = source.starts_with('.') || source.starts_with('/') || source.starts_with('~');
    (!is_path && !source.is_empty()).then_some(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::compose::{Dependency, Service, VolumeDecl};

    #[test]
    fn named_volume_ignores_bind_mounts() {
        assert_eq!(named_volume("postgres_data:/var/lib/postgresql/data"), Some("postgres_data"));
        assert_eq!(named_volume(".:/app"), None);
        assert_eq!(named_volume("./nginx.conf:/etc/nginx/conf.d/default.conf"), None);
        assert_eq!(named_volume("/app/node_modules"), None);
    }

    #[test]
    fn rejects_dependency_on_missing_service() {
        let doc = ComposeFile::new().with_service(
            "app",
            Service::from_image("x").depends_on("db", Dependency::healthy()),
        );
        assert!(DomainValidator::validate_compose(&doc).is_err());
    }

    #[test]
    fn rejects_orphaned_volume() {
        let doc = ComposeFile::new()
            .with_service("app", Service::from_image("x"))
            .with_volume("postgres_data", VolumeDecl::default());
        assert!(DomainValidator::validate_compose(&doc).is_err());
    }

    #[test]
    fn accepts_consistent_document() {
        let doc = ComposeFile::new()
            .with_service(
                "app",
                Service::from_image("x").depends_on("db", Dependency::started()),
            )
            .with_service("db", Service::from_image("redis:7-alpine").volume("redis_data:/data"))
            .with_volume("redis_data", VolumeDecl::default());
        assert!(DomainValidator::validate_compose(&doc).is_ok());
    }
}
