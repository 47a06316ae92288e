//! Core services for the dock

pub mod activation;
pub mod dock_controller;
pub mod edge_trigger;
pub mod layout_resolver;
pub mod orchestrator;

pub use activation::*;
pub use dock_controller::*;
pub use edge_trigger::*;
pub use layout_resolver::*;
pub use orchestrator::*;
