//! Layered configuration for both apps
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, else `~/.fsnd/config.toml` when present)
//! 3. Environment (`DATABASE_URL`, `FYYUR_DATABASE_URL`, `TRIVIA_DATABASE_URL`,
//!    `FSND_BIND`, `FSND_MAX_CONNECTIONS`, `FSND_QUESTIONS_PER_PAGE`)
//! 4. CLI flags, applied by the caller on the resolved [`ServiceSettings`]
//!
//! ```toml
//! [database]
//! max_connections = 5
//!
//! [fyyur]
//! bind = "127.0.0.1:5000"
//! database_url = "postgres://localhost/fyyur"
//!
//! [trivia]
//! bind = "127.0.0.1:5001"
//! database_url = "postgres://localhost/trivia"
//! questions_per_page = 10
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DEFAULT_MAX_CONNECTIONS;
use crate::pagination::DEFAULT_PER_PAGE;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Which of the two apps a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    Fyyur,
    Trivia,
}

impl App {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fyyur => "fyyur",
            Self::Trivia => "trivia",
        }
    }

    fn database_env(&self) -> &'static str {
        match self {
            Self::Fyyur => "FYYUR_DATABASE_URL",
            Self::Trivia => "TRIVIA_DATABASE_URL",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FyyurConfig {
    pub bind: SocketAddr,
    pub database_url: String,
}

impl Default for FyyurConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database_url: "postgres://localhost/fyyur".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub bind: SocketAddr,
    pub database_url: String,
    pub questions_per_page: u32,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5001)),
            database_url: "postgres://localhost/trivia".to_string(),
            questions_per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub fyyur: FyyurConfig,
    pub trivia: TriviaConfig,
    /// Set only from the environment: `FSND_BIND` overrides whichever app is served
    #[serde(skip)]
    bind_override: Option<SocketAddr>,
    /// Set only from the environment: `DATABASE_URL` is the fallback for both apps
    #[serde(skip)]
    shared_database_url: Option<String>,
    #[serde(skip)]
    app_database_urls: Vec<(App, String)>,
}

/// Everything a server needs to start, resolved for one app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub app: App,
    pub bind: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub page_size: u32,
}

impl AppConfig {
    /// Default config file location: ~/.fsnd/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fsnd")
            .join("config.toml")
    }

    /// Load from an explicit path, or the default path if it exists, then
    /// apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    tracing::debug!(path = %default.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Takes the lookup as a closure so tests never touch the process env.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.shared_database_url = Some(url);
        }

        for app in [App::Fyyur, App::Trivia] {
            if let Some(url) = lookup(app.database_env()) {
                self.app_database_urls.push((app, url));
            }
        }

        if let Some(raw) = lookup("FSND_BIND") {
            let addr = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "FSND_BIND",
                value: raw.clone(),
            })?;
            self.bind_override = Some(addr);
        }

        if let Some(raw) = lookup("FSND_MAX_CONNECTIONS") {
            self.database.max_connections =
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "FSND_MAX_CONNECTIONS",
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup("FSND_QUESTIONS_PER_PAGE") {
            self.trivia.questions_per_page =
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "FSND_QUESTIONS_PER_PAGE",
                    value: raw.clone(),
                })?;
        }

        Ok(())
    }

    /// Resolve the settings for one app.
    ///
    /// App-specific database env wins over `DATABASE_URL`, which wins over the file.
    pub fn service(&self, app: App) -> ServiceSettings {
        let (file_bind, file_url, page_size) = match app {
            App::Fyyur => (self.fyyur.bind, &self.fyyur.database_url, DEFAULT_PER_PAGE),
            App::Trivia => (
                self.trivia.bind,
                &self.trivia.database_url,
                self.trivia.questions_per_page,
            ),
        };

        let database_url = self
            .app_database_urls
            .iter()
            .rev()
            .find(|(a, _)| *a == app)
            .map(|(_, url)| url.clone())
            .or_else(|| self.shared_database_url.clone())
            .unwrap_or_else(|| file_url.clone());

        ServiceSettings {
            app,
            bind: self.bind_override.unwrap_or(file_bind),
            database_url,
            max_connections: self.database.max_connections,
            page_size,
        }
    }
}
