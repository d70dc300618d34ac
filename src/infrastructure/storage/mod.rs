//! Storage infrastructure - backend selection, connection pooling and error classification

mod error;
mod postgres;

pub use error::{StorageErrorKind, UNIQUE_VIOLATION, classify};
pub use postgres::{PostgresConfig, connect_pool};

use std::str::FromStr;

use serde::Deserialize;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(try_from = "String")]
pub enum StorageType {
    /// PostgreSQL storage
    #[default]
    Postgres,
    /// In-memory storage (for testing/development)
    #[value(name = "memory")]
    InMemory,
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl TryFrom<String> for StorageType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::InMemory => write!(f, "memory"),
        }
    }
}
