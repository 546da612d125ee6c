//! Configuration management for notpad

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Persisted editor preferences: a default folder and a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dir: Option<PathBuf>,
    pub theme: ThemeVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Light,
    Dark,
}

impl ThemeVariant {
    pub fn toggle(self) -> Self {
        match self {
            ThemeVariant::Light => ThemeVariant::Dark,
            ThemeVariant::Dark => ThemeVariant::Light,
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeVariant::Light => f.write_str("light"),
            ThemeVariant::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ThemeVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeVariant::Light),
            "dark" => Ok(ThemeVariant::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_dir: None,
            theme: ThemeVariant::Light,
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "notpad")
            .map(|proj_dirs| proj_dirs.config_dir().join("notpad.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        // Check config file permissions (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(path)
                .with_context(|| format!("Failed to stat config file: {}", path.display()))?;
            if metadata.permissions().mode() & 0o002 != 0 {
                anyhow::bail!(
                    "Config file {} is world-writable (insecure permissions)",
                    path.display()
                );
            }
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to the platform config path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    /// Save to a specific path, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Folder that file prompts start in
    ///
    /// The configured default folder is only used while it still exists.
    pub fn initial_dir(&self) -> PathBuf {
        if let Some(dir) = self.default_dir.as_ref().filter(|dir| dir.is_dir()) {
            return dir.clone();
        }

        home_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// The user's home directory, if the platform reports one
pub fn home_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeVariant::Light);
        assert!(config.default_dir.is_none());
    }

    #[test]
    fn test_load_valid_toml() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            "default_dir = '{}'\ntheme = \"dark\"\n",
            dir.path().display()
        )?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert_eq!(config.default_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.initial_dir(), dir.path());

        Ok(())
    }

    #[test]
    fn test_load_partial_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"theme = \"dark\"\n")?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert!(config.default_dir.is_none());

        Ok(())
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"invalid toml [[[syntax").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_theme_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"theme = \"sepia\"\n").unwrap();

        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("notpad.toml");

        let config = Config {
            default_dir: Some(dir.path().to_path_buf()),
            theme: ThemeVariant::Dark,
        };
        config.save_to(&path)?;

        let reloaded = Config::load_from(&path)?;
        assert_eq!(reloaded, config);

        Ok(())
    }

    #[test]
    fn test_save_without_default_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notpad.toml");

        Config::default().save_to(&path)?;
        let written = fs::read_to_string(&path)?;
        assert_eq!(written.trim(), "theme = \"light\"");

        Ok(())
    }

    #[test]
    fn test_missing_default_dir_falls_back() {
        let config = Config {
            default_dir: Some(PathBuf::from("/definitely/not/a/real/dir")),
            ..Default::default()
        };
        assert_ne!(config.initial_dir(), PathBuf::from("/definitely/not/a/real/dir"));
    }

    #[test]
    fn test_config_path_returns_some() {
        if let Some(p) = Config::config_path() {
            assert!(p.to_string_lossy().contains("notpad"));
            assert!(p.to_string_lossy().ends_with("notpad.toml"));
        }
    }

    #[test]
    fn test_theme_variant_parsing() {
        assert_eq!("Dark".parse::<ThemeVariant>(), Ok(ThemeVariant::Dark));
        assert_eq!(" light ".parse::<ThemeVariant>(), Ok(ThemeVariant::Light));
        assert!("blue".parse::<ThemeVariant>().is_err());
        assert_eq!(ThemeVariant::Light.toggle(), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::Dark.to_string(), "dark");
    }

    #[cfg(unix)]
    #[test]
    fn test_world_writable_config_rejected() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new()?;
        file.write_all(b"theme = \"dark\"\n")?;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o666))?;

        assert!(Config::load_from(file.path()).is_err());
        Ok(())
    }
}
