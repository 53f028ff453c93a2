//! # Course console configuration
//!
//! This crate provides configuration management for the course console:
//! - Loading configuration from a YAML file
//! - Merging with the embedded default configuration
//! - Environment variable overrides
//! - Typed getters and setters for the values the SOAP client needs
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use courseconfig::get_config;
//!
//! let config = get_config();
//! let endpoint = config.get_soap_endpoint();
//! config.set_log_min_level("DEBUG".to_string())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{info, warn};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("courseconfig.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load course console configuration"));
}

const ENV_CONFIG_DIR: &str = "COURSECONSOLE_CONFIG";
const ENV_PREFIX: &str = "COURSECONSOLE_CONFIG__";
const CONFIG_DIR_NAME: &str = ".courseconsole";

pub const DEFAULT_SOAP_ENDPOINT: &str = "http://localhost:8200/course-service";
pub const DEFAULT_SOAP_NAMESPACE: &str = "http://course.university.com/";
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";
const DEFAULT_LOG_ENABLE_CONSOLE: bool = true;

/// Macro to generate getter/setter for bool values with default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<bool> {
            match self.get_value($path)? {
                Value::Bool(b) => Ok(b),
                _ => Ok($default),
            }
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// Macro to generate a getter for a non-empty string value with default
macro_rules! impl_string_config {
    ($getter:ident, $path:expr, $default:expr, $what:expr) => {
        pub fn $getter(&self) -> String {
            match self.get_value($path) {
                Ok(Value::String(s)) if !s.trim().is_empty() => s,
                Ok(_) => {
                    warn!("{} is not a string or empty, using default {}", $what, $default);
                    $default.to_string()
                }
                Err(err) => {
                    warn!("Failed to get {}: {}, using default {}", $what, err, $default);
                    $default.to_string()
                }
            }
        }
    };
}

/// Configuration manager for the course console
///
/// The YAML tree is kept in memory behind a mutex; every setter writes the
/// whole tree back to `config.yaml`.
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    data: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        let data = self.data.lock().unwrap().clone();
        Self {
            config_dir: self.config_dir.clone(),
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        if !directory.is_empty() {
            return directory.to_string();
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var=ENV_CONFIG_DIR, path=%env_path, "Trying to load config from env");
            return env_path;
        }

        if Path::new(CONFIG_DIR_NAME).exists() {
            return CONFIG_DIR_NAME.to_string();
        }

        if let Some(home) = home_dir() {
            let home_config = home.join(CONFIG_DIR_NAME);
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        CONFIG_DIR_NAME.to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!("{} is not a directory", path.display()));
        }

        // Test d'écriture puis de lecture
        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;
        fs::read_dir(path)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `COURSECONSOLE_CONFIG` environment variable
    /// 3. `.courseconsole` in the current directory
    /// 4. `.courseconsole` in the user's home directory
    ///
    /// The directory is created if it doesn't exist, and validated for read/write permissions.
    pub fn config_dir(directory: &str) -> Result<String> {
        let dir_path = Self::find_config_dir(directory);
        Self::validate_config_dir(Path::new(&dir_path))?;
        Ok(dir_path)
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::config_dir(directory)?;
        info!(config_dir=%config_dir, "Using config directory");

        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        let default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        let yaml_data = if let Ok(data) = fs::read(&path) {
            info!(config_file=%path, "Loaded config file");
            data
        } else {
            info!(config_file=%path, "Config file not found, using default embedded config");
            DEFAULT_CONFIG.as_bytes().to_vec()
        };

        // Les clés sont normalisées avant la fusion
        let external_value = Self::lower_keys_value(serde_yaml::from_slice(&yaml_data)?);
        let mut config_value = Self::lower_keys_value(default_value);
        merge_yaml(&mut config_value, &external_value);

        Self::apply_overrides(&mut config_value, env::vars());

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(config_value),
        };

        config.save()?;
        Ok(config)
    }

    /// Directory holding `config.yaml`
    pub fn directory(&self) -> &str {
        &self.config_dir
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["course_service", "endpoint"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        Self::set_value_internal(&mut data, path, value)?;
        drop(data);
        self.save()
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key_value = Value::String(path[0].to_lowercase());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// Keys are matched case-insensitively; an error is returned if the path doesn't exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                if let Some(next) = map.get(&Value::String(key.to_lowercase())) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    /// Applies `COURSECONSOLE_CONFIG__A__B=value` style overrides
    fn apply_overrides(config: &mut Value, vars: impl Iterator<Item = (String, String)>) {
        for (key, value) in vars {
            if let Some(rest) = key.strip_prefix(ENV_PREFIX) {
                let key_path = rest.split("__").collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                if let Err(err) = Self::set_value_internal(config, &key_path, yaml_value) {
                    warn!(env_var=%key, "Ignoring config override: {}", err);
                }
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    let new_key = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    new_map.insert(new_key, Self::lower_keys_value(v));
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    impl_string_config!(
        get_soap_endpoint,
        &["course_service", "endpoint"],
        DEFAULT_SOAP_ENDPOINT,
        "SOAP endpoint"
    );

    impl_string_config!(
        get_soap_namespace,
        &["course_service", "namespace"],
        DEFAULT_SOAP_NAMESPACE,
        "SOAP namespace"
    );

    /// Sets the URL the course service SOAP endpoint is reached at
    pub fn set_soap_endpoint(&self, endpoint: String) -> Result<()> {
        self.set_value(&["course_service", "endpoint"], Value::String(endpoint))
    }

    impl_bool_config!(
        get_log_enable_console,
        set_log_enable_console,
        &["host", "logger", "enable_console"],
        DEFAULT_LOG_ENABLE_CONSOLE
    );

    /// Récupère le niveau de log minimum depuis la configuration
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(&["host", "logger", "min_level"])? {
            Value::String(s) => Ok(s),
            _ => Ok(DEFAULT_LOG_MIN_LEVEL.to_string()),
        }
    }

    /// Définit le niveau de log minimum dans la configuration
    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(&["host", "logger", "min_level"], Value::String(level))
    }
}

/// Returns the global configuration instance
///
/// The instance is lazily loaded on first access.
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the default ones.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}
