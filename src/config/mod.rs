use crate::errors::{AppError, AppResult};
use crate::models::working_day::FlagPolarity;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the booking API, e.g. `http://localhost:8080`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Automatic retries for failed reads (mutations are never retried)
    #[serde(default = "default_read_retries")]
    pub read_retries: u32,
    /// Local state database (session + internal log)
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub default_room: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Meaning of the backend's `aperto` flag on working days
    #[serde(default)]
    pub shift_flag_polarity: FlagPolarity,
    #[serde(default)]
    pub show_weekday: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_read_retries() -> u32 {
    1
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            read_retries: default_read_retries(),
            database: default_database(),
            default_room: None,
            log_level: default_log_level(),
            shift_flag_polarity: FlagPolarity::default(),
            show_weekday: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rsala")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rsala")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rsala.conf")
    }

    /// Return the full path of the local state database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rsala.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_base_url must start with http:// or https:// (got '{url}')"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(self.to_yaml()?.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration directory and file; returns the configuration written.
    pub fn init_all(
        custom_db: Option<String>,
        api_base_url: Option<String>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = std::path::Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            api_base_url: api_base_url.unwrap_or_else(default_api_base_url),
            ..Config::default()
        };
        config.validate()?;

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }
}
