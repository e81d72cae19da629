//! The `TemplateConfig` aggregate and its typestate builder.
//!
//! A `TemplateConfig` is the fully-validated input of one generation call:
//! technology, version, published port and optional datastore. Once it
//! exists it is guaranteed consistent, so generators never re-check it.
//!
//! # Typestate builder
//!
//! The builder uses two phantom markers (`NoTechnology` / `HasTechnology`)
//! so that version and port, whose validity depends on the technology, can
//! only be set after the technology is known.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Dropped datastore tags are logged
//! by the application layer.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::domain::{
    capabilities,
    error::DomainError,
    value_objects::{DatabaseKind, Port, Technology},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// Where the version string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    /// One of the versions the technology offers.
    #[default]
    Offered,
    /// Sniffed from a manifest or a local toolchain; accepted verbatim.
    Detected,
}

/// A fully-validated generation configuration.
///
/// Invariants:
/// - `version` is offered by `technology`, or was detected and is a single
///   non-empty token
/// - `port` and `database_port` are in `1..=65535` (guaranteed by [`Port`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateConfig {
    technology: Technology,
    version: String,
    version_source: VersionSource,
    port: Port,
    database: Option<DatabaseKind>,
    database_port: Option<Port>,
}

impl TemplateConfig {
    /// Start building a new `TemplateConfig`.
    pub fn builder() -> TemplateConfigBuilder<NoTechnology> {
        TemplateConfigBuilder::new()
    }

    pub const fn technology(&self) -> Technology {
        self.technology
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub const fn version_source(&self) -> VersionSource {
        self.version_source
    }

    /// The version as it appears in an image reference (`"22 LTS"` → `"22"`).
    pub fn image_tag(&self) -> &str {
        capabilities::image_tag(&self.version)
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    pub const fn database(&self) -> Option<DatabaseKind> {
        self.database
    }

    /// Host-side override for the datastore port mapping.
    pub const fn database_port(&self) -> Option<Port> {
        self.database_port
    }

    /// Port the app process binds inside its container.
    ///
    /// Equal to [`port`](Self::port) except for fixed-port stacks.
    pub fn container_port(&self) -> Port {
        capabilities::technology_def(self.technology)
            .fixed_container_port
            .map_or(self.port, Port::registered)
    }

    /// Whether the runtime binds a port independent of configuration.
    pub fn is_fixed_port(&self) -> bool {
        capabilities::technology_def(self.technology)
            .fixed_container_port
            .is_some()
    }

    /// Re-check the invariants.
    ///
    /// Called by the builder. Available after external construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_version(self.technology, &self.version, self.version_source)
    }
}

impl fmt::Display for TemplateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on port {}",
            self.technology.label(),
            self.image_tag(),
            self.port
        )?;
        if let Some(db) = self.database {
            write!(f, " + {}", db.label())?;
        }
        Ok(())
    }
}

fn validate_version(
    technology: Technology,
    version: &str,
    source: VersionSource,
) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidVersion {
        technology: technology.to_string(),
        version: version.to_string(),
        reason: reason.to_string(),
    };

    match source {
        VersionSource::Offered if capabilities::is_offered_version(technology, version) => Ok(()),
        VersionSource::Offered => Err(invalid("not an offered version")),
        VersionSource::Detected if version.trim().is_empty() => Err(invalid("empty version")),
        VersionSource::Detected if version.trim().contains(char::is_whitespace) => {
            Err(invalid("detected versions must be a single token"))
        }
        VersionSource::Detected => Ok(()),
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: technology has not yet been set.
pub struct NoTechnology;
/// Marker: technology has been set; other fields may now be configured.
pub struct HasTechnology;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`TemplateConfig`].
///
/// Unset fields fall back to the technology's defaults at `build()`: the
/// newest offered version and the technology's default port.
pub struct TemplateConfigBuilder<T> {
    technology: Option<Technology>,
    version: Option<(String, VersionSource)>,
    port: Option<Port>,
    database: Option<DatabaseKind>,
    database_port: Option<Port>,
    _marker: PhantomData<T>,
}

impl TemplateConfigBuilder<NoTechnology> {
    pub fn new() -> Self {
        Self {
            technology: None,
            version: None,
            port: None,
            database: None,
            database_port: None,
            _marker: PhantomData,
        }
    }

    /// Set the technology. This transitions the builder to `HasTechnology`.
    pub fn technology(self, technology: Technology) -> TemplateConfigBuilder<HasTechnology> {
        TemplateConfigBuilder {
            technology: Some(technology),
            version: None,
            port: None,
            database: None,
            database_port: None,
            _marker: PhantomData,
        }
    }
}

impl Default for TemplateConfigBuilder<NoTechnology> {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateConfigBuilder<HasTechnology> {
    fn tech(&self) -> Result<Technology, DomainError> {
        self.technology
            .ok_or(DomainError::MissingRequiredField { field: "technology" })
    }

    /// Set an offered version. Rejects versions the technology does not offer.
    pub fn version(mut self, version: impl Into<String>) -> Result<Self, DomainError> {
        let version = version.into().trim().to_string();
        validate_version(self.tech()?, &version, VersionSource::Offered)?;
        self.version = Some((version, VersionSource::Offered));
        Ok(self)
    }

    /// Set a version sniffed from the environment, accepted verbatim.
    pub fn detected_version(mut self, version: impl Into<String>) -> Result<Self, DomainError> {
        let version = version.into().trim().to_string();
        validate_version(self.tech()?, &version, VersionSource::Detected)?;
        self.version = Some((version, VersionSource::Detected));
        Ok(self)
    }

    pub fn port(mut self, port: Port) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database(mut self, database: Option<DatabaseKind>) -> Self {
        self.database = database;
        self
    }

    pub fn database_port(mut self, port: Option<Port>) -> Self {
        self.database_port = port;
        self
    }

    /// Build the configuration, filling unset fields from the registry.
    pub fn build(self) -> Result<TemplateConfig, DomainError> {
        let technology = self.tech()?;
        let def = capabilities::technology_def(technology);

        let (version, version_source) = match self.version {
            Some(v) => v,
            None => {
                let newest = def
                    .versions
                    .first()
                    .ok_or(DomainError::MissingRequiredField { field: "version" })?;
                (newest.to_string(), VersionSource::Offered)
            }
        };

        let config = TemplateConfig {
            technology,
            version,
            version_source,
            port: self.port.unwrap_or_else(|| technology.default_port()),
            database: self.database,
            database_port: self.database_port,
        };
        config.validate()?;
        Ok(config)
    }
}

// ── Untyped request ───────────────────────────────────────────────────────────

/// The untyped form of a [`TemplateConfig`], as it arrives from flags,
/// config files or JSON.
///
/// Technology and datastore are free-form tags here. [`resolve`](Self::resolve)
/// is the one place where they become typed values: an unknown technology is
/// an error, an unknown datastore means "no datastore".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRequest {
    pub technology: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub version_source: VersionSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_port: Option<u32>,
}

impl ConfigRequest {
    pub fn new(technology: impl Into<String>) -> Self {
        Self {
            technology: technology.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// The datastore tag, if one was given and it is not recognised.
    ///
    /// `"none"` and the empty string are an explicit "no datastore" and are
    /// not reported.
    pub fn unrecognized_database(&self) -> Option<&str> {
        let tag = self.database.as_deref()?.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("none") {
            return None;
        }
        DatabaseKind::parse_lenient(tag).is_none().then_some(tag)
    }

    /// Convert into a validated [`TemplateConfig`].
    pub fn resolve(&self) -> Result<TemplateConfig, DomainError> {
        let technology: Technology = self.technology.parse()?;

        let mut builder = TemplateConfig::builder().technology(technology);

        if let Some(version) = self.version.as_deref() {
            builder = match self.version_source {
                VersionSource::Offered => builder.version(version)?,
                VersionSource::Detected => builder.detected_version(version)?,
            };
        }
        if let Some(port) = self.port {
            builder = builder.port(Port::new(port)?);
        }

        let database = self.database.as_deref().and_then(DatabaseKind::parse_lenient);
        let database_port = self.database_port.map(Port::new).transpose()?;

        builder
            .database(database)
            .database_port(database_port)
            .build()
    }
}

impl From<&TemplateConfig> for ConfigRequest {
    fn from(config: &TemplateConfig) -> Self {
        Self {
            technology: config.technology.to_string(),
            version: Some(config.version.clone()),
            version_source: config.version_source,
            port: Some(u32::from(config.port.get())),
            database: config.database.map(|d| d.to_string()),
            database_port: config.database_port.map(|p| u32::from(p.get())),
        }
    }
}
