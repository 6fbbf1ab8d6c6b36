//! Startup configuration: which backend to run and how to reach it.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{
    DEFAULT_BACKEND, DOCUMENT_DB_FILE, DOCUMENT_POOL_SIZE, PG_DEFAULT_PORT,
    PG_POOL_MAX_CONNECTIONS,
};
use crate::env_config::parse_with_default;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported DB_TYPE: {0:?} (expected \"document\" or \"relational\")")]
    UnsupportedBackend(String),
}

/// The storage variants a process can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Document,
    Relational,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Relational => "relational",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "mongodb" => Ok(Self::Document),
            "relational" | "postgresql" | "postgres" => Ok(Self::Relational),
            _ => Err(ConfigError::UnsupportedBackend(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub path: PathBuf,
    pub pool_size: u32,
}

#[derive(Clone, PartialEq, Eq)]
pub struct RelationalConfig {
    /// Full connection string; takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

// Keeps the password out of logs.
impl fmt::Debug for RelationalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationalConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: BackendKind,
    pub document: DocumentConfig,
    pub relational: RelationalConfig,
}

impl StoreConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns error if `DB_TYPE` names an unknown backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// Variables: `DB_TYPE`, `DOCUMENT_DB_PATH`, `DOCUMENT_DB_POOL_SIZE`,
    /// `DATABASE_URL`, `PG_HOST`, `PG_PORT`, `PG_DB_NAME`, `PG_USER`,
    /// `PG_PASSWORD`, `PG_MAX_CONNECTIONS`.
    ///
    /// # Errors
    /// Returns error if `DB_TYPE` names an unknown backend.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup("DB_TYPE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND.to_owned())
            .parse()?;

        let document = DocumentConfig {
            path: lookup("DOCUMENT_DB_PATH")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(default_document_path, PathBuf::from),
            pool_size: parse_with_default(
                "DOCUMENT_DB_POOL_SIZE",
                lookup("DOCUMENT_DB_POOL_SIZE").as_deref(),
                DOCUMENT_POOL_SIZE,
            ),
        };

        let relational = RelationalConfig {
            url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            host: lookup("PG_HOST").unwrap_or_else(|| "localhost".to_owned()),
            port: parse_with_default("PG_PORT", lookup("PG_PORT").as_deref(), PG_DEFAULT_PORT),
            database: lookup("PG_DB_NAME").unwrap_or_else(|| "playlister".to_owned()),
            user: lookup("PG_USER").unwrap_or_else(|| "postgres".to_owned()),
            password: lookup("PG_PASSWORD").unwrap_or_default(),
            max_connections: parse_with_default(
                "PG_MAX_CONNECTIONS",
                lookup("PG_MAX_CONNECTIONS").as_deref(),
                PG_POOL_MAX_CONNECTIONS,
            ),
        };

        Ok(Self { backend, document, relational })
    }
}

fn default_document_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playlister")
        .join(DOCUMENT_DB_FILE)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn backend_aliases() {
        assert_eq!("document".parse::<BackendKind>(), Ok(BackendKind::Document));
        assert_eq!("MongoDB".parse::<BackendKind>(), Ok(BackendKind::Document));
        assert_eq!("postgresql".parse::<BackendKind>(), Ok(BackendKind::Relational));
        assert_eq!(" relational ".parse::<BackendKind>(), Ok(BackendKind::Relational));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = StoreConfig::from_lookup(lookup_from(&[("DB_TYPE", "cassandra")])).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedBackend("cassandra".to_owned()));
    }

    #[test]
    fn defaults_to_document_backend() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend, BackendKind::Document);
        assert_eq!(config.document.pool_size, DOCUMENT_POOL_SIZE);
        assert!(config.document.path.ends_with(DOCUMENT_DB_FILE));
    }

    #[test]
    fn relational_parts_from_env() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("DB_TYPE", "postgresql"),
            ("PG_HOST", "db"),
            ("PG_PORT", "6543"),
            ("PG_DB_NAME", "music"),
            ("PG_USER", "app"),
            ("PG_PASSWORD", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.backend, BackendKind::Relational);
        assert_eq!(config.relational.url, None);
        assert_eq!(config.relational.host, "db");
        assert_eq!(config.relational.port, 6543);
        assert_eq!(config.relational.database, "music");
        assert_eq!(config.relational.user, "app");
        assert_eq!(config.relational.password, "secret");
    }

    #[test]
    fn database_url_wins_over_parts() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u@h/d"),
            ("PG_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.relational.url.as_deref(), Some("postgres://u@h/d"));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = StoreConfig::from_lookup(lookup_from(&[("PG_PASSWORD", "hunter2")])).unwrap();
        assert!(!format!("{:?}", config.relational).contains("hunter2"));
    }
}
