use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory that holds the slot files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Name of the slot the recipe collection is stored under
    #[serde(default = "default_slot")]
    pub slot: String,
    /// Extra write attempts after a failed save before giving up
    #[serde(default = "default_write_retries")]
    pub write_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot: default_slot(),
            write_retries: default_write_retries(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from(".recipe-box")
}

fn default_slot() -> String {
    "recipe-app-recipes".to_string()
}

fn default_write_retries() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. recipe-box.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__DATA_DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from `recipe-box.toml` and `RECIPE_BOX__*` variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from("recipe-box")
}

fn load_config_from(file_stem: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BOX")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".recipe-box"));
        assert_eq!(config.slot, "recipe-app-recipes");
        assert_eq!(config.write_retries, 1);
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let stem = dir.path().join("absent");
        let config = load_config_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.slot, default_slot());
        assert_eq!(config.write_retries, default_write_retries());
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipe-box.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/recipes\"\nslot = \"kitchen\"\nwrite_retries = 3\n",
        )
        .unwrap();

        let stem = dir.path().join("recipe-box");
        let config = load_config_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/recipes"));
        assert_eq!(config.slot, "kitchen");
        assert_eq!(config.write_retries, 3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("partial.toml"), "slot = \"other\"\n").unwrap();

        let stem = dir.path().join("partial");
        let config = load_config_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.slot, "other");
        assert_eq!(config.data_dir, default_data_dir());
    }
}
