//! Integration tests for deepblue-core: every stack, every datastore.

use deepblue_core::{
    application::{dispatch, dispatch_request},
    domain::{
        ComposeFile, ConfigRequest, DatabaseKind, Port, Technology, TemplateConfig,
        capabilities,
        entities::compose::{DependencyCondition, APP_NETWORK},
    },
    error::DeepblueError,
};

fn config(tech: Technology, db: Option<DatabaseKind>) -> TemplateConfig {
    TemplateConfig::builder()
        .technology(tech)
        .database(db)
        .build()
        .unwrap()
}

fn all_datastores() -> Vec<Option<DatabaseKind>> {
    std::iter::once(None)
        .chain(DatabaseKind::ALL.into_iter().map(Some))
        .collect()
}

fn yaml(text: &str) -> serde_yaml::Value {
    serde_yaml::from_str(text).unwrap()
}

// ========================================================================
// Properties over the whole matrix
// ========================================================================

#[test]
fn every_combination_renders_well_formed_documents() {
    for tech in Technology::ALL {
        for db in all_datastores() {
            let out = dispatch(&config(tech, db)).unwrap();
            let label = format!("{tech} + {db:?}");

            assert!(!out.dockerfile.trim().is_empty(), "{label}");
            assert!(out.dockerfile.contains("\nFROM "), "{label}");

            let doc = yaml(&out.docker_compose);
            assert!(doc.get("services").is_some(), "{label}");
            assert!(doc.get("networks").is_some(), "{label}");
            assert!(doc.get("version").is_none(), "{label}");

            for text in [&out.dockerfile, &out.docker_compose] {
                assert!(!text.contains("{{"), "{label}: dangling placeholder");
                assert!(!text.contains("undefined"), "{label}");
            }
        }
    }
}

#[test]
fn generation_is_idempotent() {
    for tech in Technology::ALL {
        for db in all_datastores() {
            let c = config(tech, db);
            assert_eq!(dispatch(&c).unwrap(), dispatch(&c).unwrap());
        }
    }
}

#[test]
fn datastore_inclusion() {
    for tech in Technology::ALL {
        for kind in DatabaseKind::ALL {
            let out = dispatch(&config(tech, Some(kind))).unwrap();
            let doc = ComposeFile::parse(&out.docker_compose).unwrap();

            let db_services = doc
                .services
                .values()
                .filter(|s| s.image.as_deref() == Some(capabilities::datastore_def(kind).image))
                .count();
            assert_eq!(db_services, 1, "{tech} + {kind}");
            assert_eq!(doc.volumes.len(), 1, "{tech} + {kind}");
            assert!(doc.volumes.contains_key(&kind.volume_name()));
            assert!(doc.services["app"].depends_on.contains_key("db"));
        }
    }
}

#[test]
fn datastore_exclusion() {
    for tech in Technology::ALL {
        for tag in ["none", "cassandra"] {
            let request = ConfigRequest::new(tech.as_str()).with_database(tag);
            let out = dispatch_request(&request).unwrap();
            let doc = ComposeFile::parse(&out.docker_compose).unwrap();

            assert!(!doc.services.contains_key("db"), "{tech} + {tag}");
            assert!(doc.volumes.is_empty());
            assert!(!out.docker_compose.contains("\nvolumes:"));
            assert!(doc.services["app"].depends_on.is_empty());
            assert!(
                !doc.services["app"]
                    .environment
                    .iter()
                    .any(|e| e.starts_with("DATABASE_URL"))
            );
        }
    }
}

#[test]
fn port_propagates_for_configurable_stacks() {
    let port = Port::new(4321).unwrap();
    for tech in Technology::ALL {
        let c = TemplateConfig::builder()
            .technology(tech)
            .port(port)
            .build()
            .unwrap();
        let out = dispatch(&c).unwrap();
        let doc = ComposeFile::parse(&out.docker_compose).unwrap();
        let mapping = &doc.services["app"].ports[0];

        assert!(mapping.starts_with("${PORT:-4321}:"), "{tech}: {mapping}");
        if c.is_fixed_port() {
            assert!(out.dockerfile.contains("EXPOSE 9000"));
            assert_eq!(mapping, "${PORT:-4321}:9000");
        } else {
            assert!(out.dockerfile.contains("EXPOSE 4321"), "{tech}");
            assert_eq!(mapping, "${PORT:-4321}:4321");
        }
    }
}

#[test]
fn every_service_joins_the_shared_network() {
    for tech in Technology::ALL {
        let out = dispatch(&config(tech, Some(DatabaseKind::Mysql))).unwrap();
        let doc = ComposeFile::parse(&out.docker_compose).unwrap();
        assert_eq!(doc.networks.len(), 1);
        assert_eq!(doc.networks[APP_NETWORK].driver, "bridge");
        for (name, service) in &doc.services {
            assert_eq!(service.networks, vec![APP_NETWORK.to_string()], "{tech}/{name}");
        }
    }
}

#[test]
fn connection_string_is_deferred_to_runtime() {
    let out = dispatch(&config(Technology::Ruby, Some(DatabaseKind::Mongodb))).unwrap();
    let doc = ComposeFile::parse(&out.docker_compose).unwrap();
    assert!(
        doc.services["app"]
            .environment
            .contains(&"DATABASE_URL=${DATABASE_URL}".to_string())
    );
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn scenario_go_with_postgres() {
    let request = ConfigRequest::new("go")
        .with_version("1.24")
        .with_port(8080)
        .with_database("postgres");
    let out = dispatch_request(&request).unwrap();

    assert_eq!(out.dockerfile.matches("\nFROM ").count(), 2);
    assert!(out.dockerfile.trim_end().ends_with(r#"CMD ["./main"]"#));

    let doc = ComposeFile::parse(&out.docker_compose).unwrap();
    let app = &doc.services["app"];
    assert_eq!(app.ports, vec!["${PORT:-8080}:8080"]);
    assert_eq!(
        app.depends_on["db"].condition,
        DependencyCondition::ServiceHealthy
    );

    let db = &doc.services["db"];
    assert_eq!(db.image.as_deref(), Some("postgres:17-alpine"));
    assert!(db.healthcheck.is_some());
    assert!(doc.volumes.contains_key("postgres_data"));
}

#[test]
fn scenario_php_without_datastore() {
    let request = ConfigRequest::new("php")
        .with_version("8.3")
        .with_port(8000)
        .with_database("none");
    let out = dispatch_request(&request).unwrap();
    let doc = ComposeFile::parse(&out.docker_compose).unwrap();

    assert!(doc.services.contains_key("app"));
    assert!(doc.services.contains_key("nginx"));
    assert!(!doc.services.contains_key("db"));
    assert!(yaml(&out.docker_compose).get("volumes").is_none());
    assert_eq!(doc.services["nginx"].ports, vec!["8000:80"]);
}

#[test]
fn scenario_node_with_redis() {
    let request = ConfigRequest::new("node")
        .with_version("22")
        .with_port(3000)
        .with_database("redis");
    let out = dispatch_request(&request).unwrap();
    let doc = ComposeFile::parse(&out.docker_compose).unwrap();

    assert!(doc.services["db"].healthcheck.is_none());
    assert_eq!(
        doc.services["app"].depends_on["db"].condition,
        DependencyCondition::ServiceStarted
    );
    assert!(out.dockerfile.contains("FROM node:22-alpine"));
}

#[test]
fn scenario_unsupported_technology() {
    let err = dispatch_request(&ConfigRequest::new("fortran")).unwrap_err();
    assert!(matches!(err, DeepblueError::Configuration { .. }));
}
