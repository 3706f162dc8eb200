//! HadithStore configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "HADITH_DATA_DIR";

/// Environment variable that overrides the listen port
pub const PORT_ENV: &str = "PORT";

/// Main HadithStore configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<narrator>.json` collection files
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// HTTP server configuration
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            server: ServerConfig::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:8080"
    #[serde(rename = "listen-addr")]
    pub listen_addr: String,

    /// Allow cross-origin requests from any origin
    #[serde(rename = "cors-enabled")]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            cors_enabled: true,
        }
    }
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .context(format!("Invalid listen address: {}", self.server.listen_addr))
    }

    /// Load configuration from the first usable file, then apply
    /// `HADITH_DATA_DIR` and `PORT` from the process environment
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        Self::resolve(config_path, &Self::search_paths(), |key| std::env::var(key).ok())
    }

    /// Files tried in order when no explicit path is given:
    /// `./hadithstore.yml`, then `<config dir>/hadithstore/hadithstore.yml`
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("hadithstore.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hadithstore").join("hadithstore.yml"));
        }
        paths
    }

    /// An explicit path must load. Search paths that exist but fail to parse
    /// are skipped with a warning; with none usable the defaults apply. The
    /// environment always has the last word.
    fn resolve(
        config_path: Option<&PathBuf>,
        search_paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path).context(format!("Failed to load config from {}", path.display()))?,
            None => search_paths
                .iter()
                .filter(|path| path.is_file())
                .find_map(|path| {
                    Self::from_file(path)
                        .inspect_err(|e| tracing::warn!(path = %path.display(), error = %e, "Skipping config file"))
                        .ok()
                })
                .unwrap_or_else(|| {
                    tracing::info!("No config file found, using defaults");
                    Self::default()
                }),
        };

        config.apply_env(lookup)?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply `HADITH_DATA_DIR` and `PORT` overrides from `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(port) = lookup(PORT_ENV).filter(|p| !p.is_empty()) {
            let port: u16 = port.parse().context(format!("Invalid {} value: {}", PORT_ENV, port))?;
            let mut addr = self.listen_addr()?;
            addr.set_port(port);
            self.server.listen_addr = addr.to_string();
        }

        Ok(())
    }
}
