use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Remote backend endpoint (single POST endpoint). Empty = unconfigured.
    #[serde(default)]
    pub webapp_url: String,
    /// Static bearer token sent with every remote call.
    #[serde(default)]
    pub api_token: String,
    /// Expected payload prefix. Empty = accept any prefix.
    #[serde(default)]
    pub event_code: String,
    /// How long a scan result stays on screen before the next scan is
    /// accepted, in milliseconds.
    #[serde(default = "default_result_hold_ms")]
    pub result_hold_ms: u64,
}

fn default_result_hold_ms() -> u64 {
    1500
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            webapp_url: String::new(),
            api_token: String::new(),
            event_code: String::new(),
            result_hold_ms: default_result_hold_ms(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("eqc")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".eqc")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("eqc.conf")
    }

    /// Return the full path of the SQLite store
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("eqc.sqlite")
    }

    /// Load configuration from file. A missing or unparseable file yields
    /// the defaults, never an error: local storage degradation must not
    /// block the door.
    pub fn load() -> Self {
        match fs::read_to_string(Self::config_file()) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    /// Persist the configuration file, creating the directory if needed.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(), yaml)?;
        Ok(())
    }

    /// Initialize configuration and database files. An existing config is
    /// kept as-is (re-running init must not wipe the remote credentials);
    /// only the database path is updated when one is given.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load();
        if let Some(name) = &custom_db {
            config.database = expand_tilde(name).to_string_lossy().to_string();
        }

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Touch the database file so the store path is valid from here on.
        let db_path = PathBuf::from(&config.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }

    /// Both the URL and the token are required before any remote call.
    pub fn require_remote(&self) -> AppResult<()> {
        if !self.has_remote() {
            return Err(AppError::Config(
                "missing webapp URL or API token (set them with `eqc config --url ... --token ...`)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn has_remote(&self) -> bool {
        !self.webapp_url.trim().is_empty() && !self.api_token.trim().is_empty()
    }
}
