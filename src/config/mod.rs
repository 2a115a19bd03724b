use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// Log file path, if not set, logs will be printed to stdout
    pub file: Option<String>,
    /// Log level, default is "info"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

/// PetMart configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Server listening address
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    /// Directory holding the account and pet store files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory holding uploaded images
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

fn default_server_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: default_server_addr(),
            data_dir: default_data_dir(),
            uploads_dir: default_uploads_dir(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file '{}'", path))?;

        Ok(config)
    }

    /// Backing file for the account store
    pub fn accounts_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("users.json")
    }

    /// Backing file for the pet store
    pub fn pets_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("pets.json")
    }

    /// Create missing directories and seed missing store files with an
    /// empty collection.
    pub fn bootstrap(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.uploads_dir)?;
        for path in [self.accounts_path(), self.pets_path()] {
            if !path.exists() {
                fs::write(&path, "[]")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config_str = r#"
server_addr = "127.0.0.1:8080"
data_dir = "/tmp/petmart/data"
uploads_dir = "/tmp/petmart/uploads"

[log]
level = "debug"
"#;

        let config: Config = toml::from_str(config_str).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.data_dir, "/tmp/petmart/data");
        assert_eq!(config.uploads_dir, "/tmp/petmart/uploads");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_defaults_when_absent() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.uploads_dir, "uploads");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_store_paths() {
        let config = Config {
            data_dir: "/srv/petmart".to_string(),
            ..Config::default()
        };
        assert_eq!(config.accounts_path(), Path::new("/srv/petmart/users.json"));
        assert_eq!(config.pets_path(), Path::new("/srv/petmart/pets.json"));
    }
}
