// Configuration management for videodeck
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file to load; the built-in sample catalog when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub prompt: String,
    pub show_banner: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "videodeck> ".to_string(),
            show_banner: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let app_dir = config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("videodeck");

        Self {
            catalog_path: None,
            log_dir: app_dir.join("logs"),
            shell: ShellConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults out on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("videodeck");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            catalog_path: Some(PathBuf::from("/srv/videos.txt")),
            log_dir: dir.path().join("logs"),
            shell: ShellConfig {
                prompt: "> ".to_string(),
                show_banner: false,
            },
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_catalog_path_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "log_dir = \"/tmp/videodeck\"\n\n[shell]\nprompt = \"$ \"\nshow_banner = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.shell.prompt, "$ ");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_dir = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
