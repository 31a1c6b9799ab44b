//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/dataset-register/config.toml` (XDG) or platform config dir
//! 3. Project config: `.dataset-register.toml`
//! 4. Environment variables: `REGISTER_*`, with `__` separating nested keys
//!    (e.g. `REGISTER_STORE__PASSWORD`)
//!
//! # Example
//!
//! ```toml
//! [store]
//! url = "https://triplestore.example.org"
//! repository = "registry"
//! username = "harvester"
//! password = "secret"
//!
//! [graphs]
//! registrations = "https://example.org/registry/registrations"
//!
//! [crawler]
//! stale_after_secs = 86400
//! interval_secs = 3600
//!
//! [harvest]
//! source = "document"
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub graphs: GraphsConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// Triplestore (GraphDB REST API) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the triplestore, without the `/repositories` suffix.
    pub url: String,
    /// Repository that holds registrations and datasets.
    pub repository: String,
    /// Username for bearer-token login. Requests are anonymous when unset.
    pub username: Option<String>,
    /// Password sent in the `X-GraphDB-Password` login header.
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:7200".to_string(),
            repository: "registry".to_string(),
            username: None,
            password: None,
        }
    }
}

impl StoreConfig {
    /// Returns the username/password pair when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

/// Named graphs used for registry bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphsConfig {
    pub registrations: String,
    pub allowed_domain_names: String,
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            registrations: "https://demo.netwerkdigitaalerfgoed.nl/registry/registrations"
                .to_string(),
            allowed_domain_names:
                "https://data.netwerkdigitaalerfgoed.nl/registry/allowed_domain_names".to_string(),
        }
    }
}

/// Re-harvest schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Registrations last read longer ago than this are re-read.
    pub stale_after_secs: u64,
    /// Pause between crawl runs in watch mode.
    pub interval_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: 86_400,
            interval_secs: 3_600,
        }
    }
}

impl CrawlerConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Settings for outbound HTTP to harvested sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout; no timeout beyond the transport default when unset.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Builds a reqwest client honouring the configured timeout.
    pub fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// How registration URLs are queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Dereference the URL and query its statements locally.
    #[default]
    Document,
    /// Send the query to the URL as a SPARQL endpoint.
    Endpoint,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub source: SourceKind,
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&[Self::user_config_path(), PathBuf::from(".dataset-register.toml")])
    }

    /// Load config from the given TOML files (later files win), then env.
    pub fn load_from<P: AsRef<Path>>(files: &[P]) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        for file in files {
            figment = figment.merge(Toml::file(file.as_ref()));
        }

        figment
            .merge(Env::prefixed("REGISTER_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/dataset-register/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("dataset-register")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("dataset-register").join("config.toml"))
            .unwrap_or_default()
    }
}
