use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default shared PIN, used when neither the config file nor the environment
/// provides one.
pub const DEFAULT_PIN: &str = "110925";
pub const DEFAULT_TIMEZONE: &str = "Europe/Ljubljana";

pub const ENV_REMOTE_URL: &str = "RLUNCHPOLL_REMOTE_URL";
pub const ENV_REMOTE_KEY: &str = "RLUNCHPOLL_REMOTE_KEY";
pub const ENV_PIN: &str = "RLUNCHPOLL_PIN";

/// Which `ResponseStore` backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Remote when URL and key are set, otherwise local-only
    Auto,
    /// Hosted REST store
    Remote,
    /// Local SQLite file (the `database` path)
    Sqlite,
    /// Local-only: nothing is read or written
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_pin")]
    pub pin: String,
    #[serde(default = "default_store")]
    pub store: StoreBackend,
    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_pin() -> String {
    DEFAULT_PIN.to_string()
}
fn default_store() -> StoreBackend {
    StoreBackend::Auto
}
fn default_table() -> String {
    "responses".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            timezone: default_timezone(),
            pin: default_pin(),
            store: default_store(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rlunchpoll")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rlunchpoll")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rlunchpoll.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rlunchpoll.sqlite")
    }

    /// Load configuration from file (or defaults if not found), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Some(url) = var(ENV_REMOTE_URL) {
            self.remote.url = url;
        }
        if let Some(key) = var(ENV_REMOTE_KEY) {
            self.remote.key = key;
        }
        if let Some(pin) = var(ENV_PIN) {
            self.pin = pin;
        }
    }

    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Config(format!("invalid timezone '{}': {}", self.timezone, e)))
    }

    pub fn has_remote(&self) -> bool {
        !self.remote.url.trim().is_empty() && !self.remote.key.trim().is_empty()
    }

    /// Resolve `auto` and degrade `remote` to local-only when the connection
    /// parameters are missing.
    pub fn effective_store(&self) -> StoreBackend {
        match self.store {
            StoreBackend::Auto if self.has_remote() => StoreBackend::Remote,
            StoreBackend::Auto => StoreBackend::None,
            StoreBackend::Remote if !self.has_remote() => {
                warn!("store=remote but URL or key is missing, running local-only");
                StoreBackend::None
            }
            other => other,
        }
    }

    /// Copy with secrets masked, for printing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.pin = mask(&copy.pin);
        copy.remote.key = mask(&copy.remote.key);
        copy
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            debug!("{key} set from environment");
            Some(v)
        }
        _ => None,
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "*".repeat(secret.chars().count().min(8))
    }
}

/// Ensure the directory holding `path` exists.
pub fn ensure_parent(path: &str) -> io::Result<()> {
    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
