// src/checks/mod.rs
mod amqp;
mod file;
mod http;
mod postgres;
mod redis;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Error raised by a single verification attempt. Timeouts are not part of
/// this taxonomy: the runner enforces deadlines, a check only reports what it
/// observed while it was allowed to run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Transport or auth failure before any protocol exchange happened.
    #[error("connection failed: {0}")]
    Connection(String),
    /// Connected, but the minimal operation failed or returned something else.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// File timestamp check: file missing or older than allowed.
    #[error("{0}")]
    Stale(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    FileTimestamp,
    MessageBroker,
    RelationalDatabase,
    KeyValueStore,
    HttpEndpoint,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::FileTimestamp => "file_timestamp",
            CheckKind::MessageBroker => "message_broker",
            CheckKind::RelationalDatabase => "relational_database",
            CheckKind::KeyValueStore => "key_value_store",
            CheckKind::HttpEndpoint => "http_endpoint",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps report column alignment working
        f.pad(self.as_str())
    }
}

/// Closed set of dependency kinds with their kind-specific parameters.
/// Adding a kind means adding a variant here and one verify function below;
/// the match in `CheckTarget::verify` keeps the dispatch exhaustive.
#[derive(Debug, Clone)]
pub enum CheckSpec {
    FileTimestamp {
        path: PathBuf,
        max_staleness: Duration,
    },
    MessageBroker {
        url: String,
    },
    RelationalDatabase {
        url: String,
    },
    KeyValueStore {
        url: String,
    },
    HttpEndpoint {
        url: String,
    },
}

impl CheckSpec {
    pub fn kind(&self) -> CheckKind {
        match self {
            CheckSpec::FileTimestamp { .. } => CheckKind::FileTimestamp,
            CheckSpec::MessageBroker { .. } => CheckKind::MessageBroker,
            CheckSpec::RelationalDatabase { .. } => CheckKind::RelationalDatabase,
            CheckSpec::KeyValueStore { .. } => CheckKind::KeyValueStore,
            CheckSpec::HttpEndpoint { .. } => CheckKind::HttpEndpoint,
        }
    }
}

/// One configured dependency to verify. Immutable once built by the config
/// loader.
#[derive(Debug, Clone)]
pub struct CheckTarget {
    pub name: String,
    pub timeout: Option<Duration>,
    pub spec: CheckSpec,
}

impl CheckTarget {
    pub fn kind(&self) -> CheckKind {
        self.spec.kind()
    }

    /// Per-target timeout override, falling back to the global default.
    pub fn effective_timeout(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }

    /// Perform the dependency-specific liveness test. Any connection opened
    /// here is owned by this single attempt and dropped on every exit path;
    /// no timeout is enforced at this level.
    pub async fn verify(&self) -> Result<(), CheckError> {
        match &self.spec {
            CheckSpec::FileTimestamp {
                path,
                max_staleness,
            } => file::verify(path, *max_staleness).await,
            CheckSpec::MessageBroker { url } => amqp::verify(url).await,
            CheckSpec::RelationalDatabase { url } => postgres::verify(url).await,
            CheckSpec::KeyValueStore { url } => redis::verify(url).await,
            CheckSpec::HttpEndpoint { url } => http::verify(url).await,
        }
    }
}
