//! Entry points that read the process environment
//!
//! Kept in their own test binary since they mutate environment variables.

use dockdash::config::{DockConfig, CONFIG_FILE_NAME};
use dockdash::logging::{LogConfig, LogFormat, LogLevel, LogOutput};
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_log_config_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("DOCKDASH_LOG_LEVEL", "warn");
    std::env::set_var("DOCKDASH_LOG_FORMAT", "compact");
    std::env::set_var("DOCKDASH_LOG_SOURCE", "true");
    std::env::remove_var("DOCKDASH_LOG_OUTPUT");
    std::env::remove_var("DOCKDASH_LOG_FILE");

    let config = LogConfig::from_env();
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.output, LogOutput::Stdout);
    assert!(config.include_source);

    std::env::remove_var("DOCKDASH_LOG_LEVEL");
    std::env::remove_var("DOCKDASH_LOG_FORMAT");
    std::env::remove_var("DOCKDASH_LOG_SOURCE");
}

#[cfg(target_os = "linux")]
#[test]
fn test_load_default_reads_user_config_dir() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    assert_eq!(DockConfig::load_default().unwrap(), DockConfig::default());

    let app_dir = dir.path().join("dockdash");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(
        app_dir.join(CONFIG_FILE_NAME),
        "show_overview_at_startup = true\n",
    )
    .unwrap();

    let config = DockConfig::load_default().unwrap();
    assert!(config.show_overview_at_startup);
}
