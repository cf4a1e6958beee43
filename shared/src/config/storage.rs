//! Storage backend selection

use serde::{Deserialize, Serialize};

use super::Environment;

/// Where account metadata and action tokens live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process maps, lost on restart
    Memory,
    /// MySQL for account metadata, Redis for action tokens
    Persistent,
}

impl StorageBackend {
    /// Default backend for an environment
    pub fn for_environment(env: Environment) -> Self {
        if env.is_development() {
            StorageBackend::Memory
        } else {
            StorageBackend::Persistent
        }
    }

    /// Read `STORAGE_BACKEND`, falling back to the environment default
    pub fn from_env(env: Environment) -> Self {
        std::env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| Self::for_environment(env))
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "persistent" | "mysql" => Ok(StorageBackend::Persistent),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}
