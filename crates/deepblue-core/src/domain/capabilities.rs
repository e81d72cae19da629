//! Technology and datastore descriptor registries.
//!
//! Every static fact about a runtime stack or a datastore is described
//! exactly once here: labels, offered versions, default ports, images,
//! credentials, probes. Generators read descriptors; they never hard-code
//! these values.
//!
//! # Adding a New Technology
//!
//! 1. Add a variant to `Technology` in `value_objects.rs`
//! 2. Add one [`TechnologyDef`] constant and its arm in [`technology_def`]
//! 3. Add it to [`TECHNOLOGY_REGISTRY`]
//! 4. Write the generator; the dispatcher will not compile until you do
//!
//! # Adding a New Datastore
//!
//! Same steps with [`DatastoreDef`]. The fragment library picks it up
//! without further changes.

use crate::domain::value_objects::{DatabaseKind, Technology};

// ── Technology descriptors ───────────────────────────────────────────────────

/// Static description of one runtime technology.
#[derive(Debug, Clone, Copy)]
pub struct TechnologyDef {
    pub technology: Technology,

    /// Display label, e.g. `Node.js`.
    pub label: &'static str,

    /// Versions offered by the prompt, newest first.
    ///
    /// An entry may carry a qualifier (`"22 LTS"`); only the first
    /// whitespace-separated token is used as the image tag.
    pub versions: &'static [&'static str],

    /// Port suggested when the user does not pick one.
    pub default_port: u16,

    /// Port the runtime server binds regardless of configuration.
    ///
    /// `Some` marks a fixed-port stack: the orchestration document maps the
    /// host port onto this value and puts a reverse proxy in front.
    pub fixed_container_port: Option<u16>,
}

const NODE: TechnologyDef = TechnologyDef {
    technology: Technology::Node,
    label: "Node.js",
    versions: &["22 LTS", "20 LTS", "18 LTS"],
    default_port: 3000,
    fixed_container_port: None,
};

const PYTHON: TechnologyDef = TechnologyDef {
    technology: Technology::Python,
    label: "Python",
    versions: &["3.13", "3.12", "3.11"],
    default_port: 8000,
    fixed_container_port: None,
};

const GO: TechnologyDef = TechnologyDef {
    technology: Technology::Go,
    label: "Go",
    versions: &["1.24", "1.23", "1.22"],
    default_port: 8080,
    fixed_container_port: None,
};

const JAVA: TechnologyDef = TechnologyDef {
    technology: Technology::Java,
    label: "Java",
    versions: &["21 LTS", "17 LTS", "11 LTS"],
    default_port: 8080,
    fixed_container_port: None,
};

const PHP: TechnologyDef = TechnologyDef {
    technology: Technology::Php,
    label: "PHP",
    versions: &["8.3", "8.2", "8.1"],
    default_port: 8000,
    // php-fpm
    fixed_container_port: Some(9000),
};

const RUBY: TechnologyDef = TechnologyDef {
    technology: Technology::Ruby,
    label: "Ruby",
    versions: &["3.3", "3.2", "3.1"],
    default_port: 3000,
    fixed_container_port: None,
};

const RUST: TechnologyDef = TechnologyDef {
    technology: Technology::Rust,
    label: "Rust",
    versions: &["1.85", "1.84", "1.83"],
    default_port: 8080,
    fixed_container_port: None,
};

/// All technology descriptors, in presentation order.
pub static TECHNOLOGY_REGISTRY: &[TechnologyDef] = &[NODE, PYTHON, GO, JAVA, PHP, RUBY, RUST];

/// Descriptor for a technology. Total over the enum.
pub fn technology_def(technology: Technology) -> &'static TechnologyDef {
    match technology {
        Technology::Node => &NODE,
        Technology::Python => &PYTHON,
        Technology::Go => &GO,
        Technology::Java => &JAVA,
        Technology::Php => &PHP,
        Technology::Ruby => &RUBY,
        Technology::Rust => &RUST,
    }
}

/// Image tag for a version string: the first whitespace-separated token.
///
/// `"22 LTS"` → `"22"`, `"3.12"` → `"3.12"`.
pub fn image_tag(version: &str) -> &str {
    version.split_whitespace().next().unwrap_or("")
}

/// Whether `version` names one of the technology's offered versions.
///
/// Comparison is on the image-tag form, so `"22"` matches `"22 LTS"`.
pub fn is_offered_version(technology: Technology, version: &str) -> bool {
    let wanted = image_tag(version);
    !wanted.is_empty()
        && technology_def(technology)
            .versions
            .iter()
            .any(|offered| image_tag(offered) == wanted)
}

// ── Datastore descriptors ────────────────────────────────────────────────────

/// Liveness probe run inside the datastore container.
#[derive(Debug, Clone, Copy)]
pub struct HealthProbe {
    /// Shell command, run with `CMD-SHELL`.
    pub command: &'static str,
    pub interval: &'static str,
    pub timeout: &'static str,
    pub retries: u32,
}

impl HealthProbe {
    const fn standard(command: &'static str) -> Self {
        Self {
            command,
            interval: "5s",
            timeout: "5s",
            retries: 5,
        }
    }
}

/// Static description of one companion datastore.
#[derive(Debug, Clone, Copy)]
pub struct DatastoreDef {
    pub kind: DatabaseKind,
    pub label: &'static str,

    /// Image reference, pinned to a major version.
    pub image: &'static str,

    /// Port the datastore binds inside its container. Never overridable.
    pub port: u16,

    /// `KEY=value` pairs with the default development credentials.
    pub environment: &'static [&'static str],

    /// Mount point of the named data volume.
    pub data_path: &'static str,

    /// Command override, if the image default is not enough.
    pub command: Option<&'static str>,

    /// Variable the app reads its connection string from.
    pub connection_env: &'static str,

    /// `None` means no probe is defined; dependants fall back to plain
    /// startup ordering.
    pub health_probe: Option<HealthProbe>,
}

const POSTGRES: DatastoreDef = DatastoreDef {
    kind: DatabaseKind::Postgres,
    label: "PostgreSQL",
    image: "postgres:17-alpine",
    port: 5432,
    environment: &[
        "POSTGRES_PASSWORD=postgres",
        "POSTGRES_USER=postgres",
        "POSTGRES_DB=app_db",
    ],
    data_path: "/var/lib/postgresql/data",
    command: None,
    connection_env: "DATABASE_URL",
    health_probe: Some(HealthProbe::standard("pg_isready -U postgres -d app_db")),
};

const MYSQL: DatastoreDef = DatastoreDef {
    kind: DatabaseKind::Mysql,
    label: "MySQL",
    image: "mysql:9-oracle",
    port: 3306,
    environment: &[
        "MYSQL_ROOT_PASSWORD=root",
        "MYSQL_DATABASE=app_db",
        "MYSQL_USER=user",
        "MYSQL_PASSWORD=password",
    ],
    data_path: "/var/lib/mysql",
    command: None,
    connection_env: "DATABASE_URL",
    health_probe: Some(HealthProbe::standard(
        "mysqladmin ping -h localhost -u root -proot",
    )),
};

const MONGODB: DatastoreDef = DatastoreDef {
    kind: DatabaseKind::Mongodb,
    label: "MongoDB",
    image: "mongo:8",
    port: 27017,
    environment: &[
        "MONGO_INITDB_ROOT_USERNAME=root",
        "MONGO_INITDB_ROOT_PASSWORD=root",
        "MONGO_INITDB_DATABASE=app_db",
    ],
    data_path: "/data/db",
    command: None,
    connection_env: "DATABASE_URL",
    health_probe: Some(HealthProbe::standard(
        "mongosh --quiet --eval \"db.adminCommand('ping')\"",
    )),
};

const REDIS: DatastoreDef = DatastoreDef {
    kind: DatabaseKind::Redis,
    label: "Redis",
    image: "redis:7-alpine",
    port: 6379,
    environment: &[],
    data_path: "/data",
    command: Some("redis-server --appendonly yes"),
    connection_env: "REDIS_URL",
    health_probe: None,
};

/// All datastore descriptors, in presentation order.
pub static DATASTORE_REGISTRY: &[DatastoreDef] = &[POSTGRES, MYSQL, MONGODB, REDIS];

/// Descriptor for a datastore. Total over the enum.
pub fn datastore_def(kind: DatabaseKind) -> &'static DatastoreDef {
    match kind {
        DatabaseKind::Postgres => &POSTGRES,
        DatabaseKind::Mysql => &MYSQL,
        DatabaseKind::Mongodb => &MONGODB,
        DatabaseKind::Redis => &REDIS,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technology_registry_is_consistent() {
        assert_eq!(
            TECHNOLOGY_REGISTRY.len(),
            Technology::ALL.len(),
            "every technology must be registered exactly once"
        );
        for tech in Technology::ALL {
            let def = technology_def(tech);
            assert_eq!(def.technology, tech, "{tech:?} maps to the wrong descriptor");
            assert!(!def.versions.is_empty(), "{tech:?} offers no versions");
            assert!(def.default_port > 0, "{tech:?} default port is zero");
            for v in def.versions {
                assert!(!image_tag(v).is_empty(), "{tech:?} offers an empty version");
            }
        }
    }

    #[test]
    fn datastore_registry_is_consistent() {
        assert_eq!(DATASTORE_REGISTRY.len(), DatabaseKind::ALL.len());
        for kind in DatabaseKind::ALL {
            let def = datastore_def(kind);
            assert_eq!(def.kind, kind, "{kind:?} maps to the wrong descriptor");
            assert!(def.port > 0);
            for pair in def.environment {
                assert!(pair.contains('='), "{kind:?}: env entry '{pair}' has no '='");
            }
        }
    }

    #[test]
    fn image_tag_drops_qualifier() {
        assert_eq!(image_tag("22 LTS"), "22");
        assert_eq!(image_tag("3.12"), "3.12");
        assert_eq!(image_tag("  "), "");
    }

    #[test]
    fn offered_version_matches_on_tag() {
        assert!(is_offered_version(Technology::Node, "22"));
        assert!(is_offered_version(Technology::Node, "22 LTS"));
        assert!(is_offered_version(Technology::Go, "1.24"));
        assert!(!is_offered_version(Technology::Go, "1.10"));
        assert!(!is_offered_version(Technology::Go, ""));
    }

    #[test]
    fn only_php_has_a_fixed_container_port() {
        for def in TECHNOLOGY_REGISTRY {
            match def.technology {
                Technology::Php => assert_eq!(def.fixed_container_port, Some(9000)),
                _ => assert_eq!(def.fixed_container_port, None),
            }
        }
    }

    #[test]
    fn redis_has_no_probe_and_no_credentials() {
        let redis = datastore_def(DatabaseKind::Redis);
        assert!(redis.health_probe.is_none());
        assert!(redis.environment.is_empty());
    }

    #[test]
    fn probes_use_five_second_cadence() {
        for def in DATASTORE_REGISTRY {
            if let Some(probe) = def.health_probe {
                assert_eq!(probe.interval, "5s");
                assert_eq!(probe.timeout, "5s");
                assert_eq!(probe.retries, 5);
            }
        }
    }
}
