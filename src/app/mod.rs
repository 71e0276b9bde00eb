//! Application-level modules for the library viewer.
//!
//! This module contains the main application coordinator, centralized state
//! management and the per-tab list views.

mod app_state;
mod application_coordinator;
mod settings_coordinator;
pub mod view_state;

pub use app_state::{AppState, Selection};
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
