//! Domain value objects: Technology, DatabaseKind, Port.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO registry data. Labels, offered versions, images and default
//! ports live in `capabilities.rs`. This file's only job is to define the
//! types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a descriptor in `capabilities.rs`
//! 4. Add the generator arm in the dispatcher (the compiler will ask for it)

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Technology ───────────────────────────────────────────────────────────────

/// A supported runtime technology.
///
/// The set is closed: every variant has exactly one generator, enforced by
/// the exhaustive match in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Node,
    Python,
    Go,
    Java,
    Php,
    Ruby,
    Rust,
}

impl Technology {
    /// Every technology, in presentation order.
    pub const ALL: [Technology; 7] = [
        Self::Node,
        Self::Python,
        Self::Go,
        Self::Java,
        Self::Php,
        Self::Ruby,
        Self::Rust,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::Go => "go",
            Self::Java => "java",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
        }
    }

    /// Human-readable label, e.g. `Node.js`.
    pub fn label(self) -> &'static str {
        crate::domain::capabilities::technology_def(self).label
    }

    /// Port the generated service listens on when the user does not pick one.
    pub fn default_port(self) -> Port {
        Port::registered(crate::domain::capabilities::technology_def(self).default_port)
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technology {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "nodejs" | "node.js" | "js" => Ok(Self::Node),
            "python" | "py" => Ok(Self::Python),
            "go" | "golang" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            "php" => Ok(Self::Php),
            "ruby" | "rb" => Ok(Self::Ruby),
            "rust" | "rs" => Ok(Self::Rust),
            other => Err(DomainError::UnsupportedTechnology { tag: other.into() }),
        }
    }
}

// ── DatabaseKind ──────────────────────────────────────────────────────────────

/// A companion datastore that can run next to the app service.
///
/// "No datastore" is modelled as `Option::None`, never as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Postgres,
    Mysql,
    Mongodb,
    Redis,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 4] = [Self::Postgres, Self::Mysql, Self::Mongodb, Self::Redis];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mongodb => "mongodb",
            Self::Redis => "redis",
        }
    }

    pub fn label(self) -> &'static str {
        crate::domain::capabilities::datastore_def(self).label
    }

    /// Name of the named volume holding this datastore's data.
    pub fn volume_name(self) -> String {
        format!("{}_data", self.as_str())
    }

    /// Lenient parse used at the configuration boundary.
    ///
    /// `"none"`, the empty string and unrecognized tags all yield `None`.
    pub fn parse_lenient(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "redis" => Ok(Self::Redis),
            other => Err(DomainError::UnknownDatastore { tag: other.into() }),
        }
    }
}

// ── Port ──────────────────────────────────────────────────────────────────────

/// A TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u16")]
pub struct Port(u16);

impl Port {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        match u16::try_from(value) {
            Ok(0) | Err(_) => Err(DomainError::InvalidPort {
                value: value.to_string(),
            }),
            Ok(port) => Ok(Self(port)),
        }
    }

    /// Parse user input such as `"8080"` or `" 3000 "`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let value: u32 = input.trim().parse().map_err(|_| DomainError::InvalidPort {
            value: input.trim().into(),
        })?;
        Self::new(value)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Wrap a port taken from the compiled-in registries, which are checked
    /// to be non-zero by the registry integrity test.
    pub(crate) const fn registered(value: u16) -> Self {
        Self(value)
    }
}

impl TryFrom<u32> for Port {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
