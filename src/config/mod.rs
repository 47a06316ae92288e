//! Configuration management for dockdash

pub mod parser;
pub mod settings;

pub use parser::{default_config_path, ConfigError, CONFIG_FILE_NAME};
pub use settings::{DockBehaviorConfig, DockConfig, EdgeTriggerConfig};
