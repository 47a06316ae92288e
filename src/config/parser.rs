use super::settings::DockConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File name looked up inside the user configuration directory
pub const CONFIG_FILE_NAME: &str = "dockdash.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Validation error: {}", .problems.join("; "))]
    ValidationError { problems: Vec<String> },
}

impl DockConfig {
    /// Parse and validate configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DockConfig = toml::from_str(content)?;
        config
            .validate()
            .map_err(|problems| ConfigError::ValidationError { problems })?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load `dockdash/dockdash.toml` from the user config directory, or defaults when absent
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(default_config_path())
    }

    /// Load `path` when it exists, otherwise defaults
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockdash").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = DockConfig::from_toml_str(
            r#"
            show_overview_at_startup = true

            [edge]
            fallback_timeout_ms = 450
            suppress_activation_while_fullscreen = false
            "#,
        )
        .unwrap();

        assert!(config.show_overview_at_startup);
        assert_eq!(config.edge.fallback_timeout_ms, 450);
        assert!(!config.edge.suppress_activation_while_fullscreen);
        assert!(config.edge.suppress_activation_while_button_held);
        assert_eq!(config.dock.hide_animation_ms, 200);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = DockConfig::from_toml_str("[dock]\nauto_hide_delay_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        assert!(err.to_string().contains("auto_hide_delay_ms"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DockConfig::from_toml_str("[edge\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dock]\nshow_animation_ms = 150").unwrap();

        let config = DockConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dock.show_animation_ms, 150);
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(DockConfig::load_or_default(Some(absent)).unwrap(), DockConfig::default());
        assert_eq!(DockConfig::load_or_default(None).unwrap(), DockConfig::default());
    }

    #[test]
    fn present_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[dock]\nhide_animation_ms = 350\n").unwrap();

        let config = DockConfig::load_or_default(Some(path)).unwrap();
        assert_eq!(config.dock.hide_animation_ms, 350);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DockConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
