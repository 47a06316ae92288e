//! dockdash - Auto-hiding bottom dock for edge-gesture desktops
//!
//! dockdash turns a launcher strip into a dock that slides in from the bottom
//! of the screen when the pointer presses against a free monitor edge, hides
//! itself again once the pointer leaves, and replaces the launcher's icon
//! click behaviour with a launch / raise / cycle / minimize dispatcher.
//!
//! Everything the dock needs from the desktop is expressed through the
//! capability traits in [`host`], so the core runs unchanged against a real
//! compositor or against [`host::InMemoryHost`] in tests.

pub mod config;
pub mod host;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod services;

pub use models::*;
pub use services::*;

/// Result type alias for dockdash operations
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to dockdash operations
#[derive(thiserror::Error, Debug)]
pub enum DockError {
    #[error("Application not found: {0}")]
    ApplicationNotFound(String),

    #[error("Host capability error: {0}")]
    HostError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
