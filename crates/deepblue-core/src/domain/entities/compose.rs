//! Typed model of a `docker-compose.yml` document.
//!
//! Generators assemble a [`ComposeFile`] and render it once at the end, so an
//! absent section simply never appears: there is no string concatenation
//! that could leave a dangling key behind. All maps are `BTreeMap`, which
//! keeps output byte-identical across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Name of the application service.
pub const APP_SERVICE: &str = "app";
/// Name of the datastore service.
pub const DB_SERVICE: &str = "db";
/// Name of the reverse-proxy service of fixed-port stacks.
pub const PROXY_SERVICE: &str = "nginx";
/// The single bridge network every service joins.
pub const APP_NETWORK: &str = "app-network";
/// Restart policy used by every service.
pub const RESTART_POLICY: &str = "unless-stopped";

// ── Document ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub services: BTreeMap<String, Service>,

    pub networks: BTreeMap<String, Network>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, VolumeDecl>,
}

impl ComposeFile {
    /// An empty document already carrying the shared bridge network.
    pub fn new() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(APP_NETWORK.to_string(), Network::bridge());
        Self {
            services: BTreeMap::new(),
            networks,
            volumes: BTreeMap::new(),
        }
    }

    pub fn with_service(mut self, name: impl Into<String>, service: Service) -> Self {
        self.services.insert(name.into(), service);
        self
    }

    pub fn with_volume(mut self, name: impl Into<String>, volume: VolumeDecl) -> Self {
        self.volumes.insert(name.into(), volume);
        self
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Render as YAML.
    pub fn render(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(self).map_err(|e| DomainError::RenderFailed {
            document: "docker-compose.yml",
            reason: e.to_string(),
        })
    }

    /// Parse a rendered document back into the model.
    pub fn parse(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml).map_err(|e| DomainError::RenderFailed {
            document: "docker-compose.yml",
            reason: e.to_string(),
        })
    }
}

impl Default for ComposeFile {
    fn default() -> Self {
        Self::new()
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// One service entry. Field order is the order keys are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub depends_on: BTreeMap<String, Dependency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<HealthCheck>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
}

impl Service {
    /// A service running a prebuilt image, on the shared network.
    pub fn from_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Self::attached()
        }
    }

    /// A service built from the `Dockerfile` in the project root.
    pub fn from_build(build: BuildSpec) -> Self {
        Self {
            build: Some(build),
            ..Self::attached()
        }
    }

    fn attached() -> Self {
        Self {
            restart: Some(RESTART_POLICY.to_string()),
            networks: vec![APP_NETWORK.to_string()],
            ..Self::default()
        }
    }

    pub fn port(mut self, mapping: impl Into<String>) -> Self {
        self.ports.push(mapping.into());
        self
    }

    pub fn env(mut self, pair: impl Into<String>) -> Self {
        self.environment.push(pair.into());
        self
    }

    pub fn volume(mut self, mount: impl Into<String>) -> Self {
        self.volumes.push(mount.into());
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn depends_on(mut self, service: impl Into<String>, dependency: Dependency) -> Self {
        self.depends_on.insert(service.into(), dependency);
        self
    }

    pub fn healthcheck(mut self, check: Option<HealthCheck>) -> Self {
        self.healthcheck = check;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    pub context: String,
    pub dockerfile: String,
}

impl Default for BuildSpec {
    fn default() -> Self {
        Self {
            context: ".".into(),
            dockerfile: "Dockerfile".into(),
        }
    }
}

// ── Dependencies ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCondition {
    /// Wait for the dependency's health probe to pass.
    ServiceHealthy,
    /// Wait only for the dependency's process to start.
    ServiceStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub condition: DependencyCondition,
}

impl Dependency {
    pub const fn healthy() -> Self {
        Self {
            condition: DependencyCondition::ServiceHealthy,
        }
    }

    pub const fn started() -> Self {
        Self {
            condition: DependencyCondition::ServiceStarted,
        }
    }
}

// ── Health check ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

impl HealthCheck {
    /// A probe run through the container's shell.
    pub fn shell(command: &str, interval: &str, timeout: &str, retries: u32) -> Self {
        Self {
            test: vec!["CMD-SHELL".into(), command.into()],
            interval: interval.into(),
            timeout: timeout.into(),
            retries,
        }
    }
}

// ── Networks and volumes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub driver: String,
}

impl Network {
    pub fn bridge() -> Self {
        Self {
            driver: "bridge".into(),
        }
    }
}

/// A named volume declaration. Empty means "engine defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}
