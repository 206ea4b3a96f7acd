//! Cadence shared kernel
//!
//! Types every Cadence bounded context depends on:
//!
//! - **Identifiers**: [`EntityId`], a UUID-backed aggregate identifier
//! - **Time**: the [`Clock`] port, so "today" can be pinned in tests
//! - **Persistence errors**: [`RepositoryError`] returned by every outbound port
//! - **Configuration**: [`CadenceConfig`], loaded from TOML
//! - **Telemetry**: tracing subscriber bootstrap for binaries

pub mod clock;
pub mod config;
pub mod error;
pub mod telemetry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CadenceConfig, ConfigError, OutreachConfig, SchedulingConfig};
pub use error::{RepoResult, RepositoryError};

/// Identifier value object for entities
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}
