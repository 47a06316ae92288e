//! Data models for the dock

pub mod application;
pub mod dock_state;
pub mod geometry;

pub use application::*;
pub use dock_state::*;
pub use geometry::*;
