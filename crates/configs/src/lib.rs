use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Directory served for any path not matched by an API route.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4), static_dir: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Seed an empty collection at startup when the data file is absent.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), create_if_missing: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Answer not-found and bad-input with HTTP 200 and the error body.
    #[serde(default)]
    pub legacy_error_status: bool,
    #[serde(default = "default_true")]
    pub permissive_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { legacy_error_status: false, permissive_cors: true }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_data_file() -> String { "data/data.json".into() }
fn default_true() -> bool { true }

impl AppConfig {
    /// Build a config purely from environment variables, used when no config file exists.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        if let Some(host) = var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = var("TOKIO_WORKER_THREADS")
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Some(dir) = var("STATIC_DIR") {
            cfg.server.static_dir = Some(dir);
        }
        if let Some(path) = var("DATA_FILE") {
            cfg.storage.data_file = path;
        }
        if let Some(v) = var("LEGACY_ERROR_STATUS") {
            cfg.api.legacy_error_status = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        cfg
    }

    /// Config file at `CONFIG_PATH` (default `config.toml`) when present,
    /// environment otherwise; always normalized.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// Only a missing file falls back to the environment; an unreadable or
    /// malformed one is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| anyhow!("invalid config file {path}: {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        if let Some(dir) = &self.static_dir {
            if dir.trim().is_empty() {
                self.static_dir = None;
            }
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or via DATA_FILE"));
        }
        Ok(())
    }
}
