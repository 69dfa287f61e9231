use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Application home folder, created on open if missing
    #[serde(default = "default_home_folder")]
    pub home_folder: PathBuf,
    /// Store file name inside the home folder
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Colored output for the console format, ignored for json
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            home_folder: default_home_folder(),
            database_file: default_database_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            ansi: default_ansi(),
        }
    }
}

// Default value functions
fn default_home_folder() -> PathBuf {
    PathBuf::from(".registration-example")
}

fn default_database_file() -> String {
    "registration.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_ansi() -> bool {
    true
}

impl StorageConfig {
    /// Full path of the store file
    pub fn database_path(&self) -> PathBuf {
        self.home_folder.join(&self.database_file)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Resolve the configuration for the admin binary
    ///
    /// An explicit path must load. Without one, `config.toml` in the working
    /// directory is used when present and defaults otherwise.
    pub fn load(explicit_path: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        let (path, required) = match explicit_path {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok((Config::default(), path));
        }

        let config = Self::from_file(&path)
            .context(format!("Failed to load configuration from '{}'", path.display()))?;

        Ok((config, path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.home_folder.as_os_str().is_empty() {
            bail!("home_folder must not be empty");
        }

        if self.storage.database_file.is_empty() {
            bail!("database_file must not be empty");
        }

        if self.storage.database_file.contains(['/', '\\']) {
            bail!(
                "database_file '{}' must be a file name, not a path",
                self.storage.database_file
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.storage.home_folder, PathBuf::from(".registration-example"));
        assert_eq!(config.storage.database_file, "registration.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "console");
        assert!(config.logging.ansi);
    }

    #[test]
    fn test_database_path_joins_home_folder() {
        let config = Config::from_toml(
            r#"
            [storage]
            home_folder = "/tmp/gym"
            database_file = "users.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.database_path(), PathBuf::from("/tmp/gym/users.db"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = Config::from_toml(
            r#"
            [logging]
            level = "verbose"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result = Config::from_toml(
            r#"
            [logging]
            format = "xml"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_database_file_with_separator_rejected() {
        let result = Config::from_toml(
            r#"
            [storage]
            database_file = "nested/users.db"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_home_folder_rejected() {
        let result = Config::from_toml(
            r#"
            [storage]
            home_folder = ""
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logging]\nlevel = \"debug\"\nformat = \"json\"\nansi = false\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(!config.logging.ansi);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-explicit.toml");

        let result = Config::load(Some(path));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("admin.toml");
        std::fs::write(&path, "[storage]\nhome_folder = \"/srv/gym\"\n").unwrap();

        let (config, loaded_from) = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded_from, path);
        assert_eq!(config.storage.home_folder, PathBuf::from("/srv/gym"));
    }

    #[test]
    fn test_from_missing_file() {
        let path = PathBuf::from("does-not-exist.toml");
        assert!(Config::from_file(&path).is_err());
    }
}
