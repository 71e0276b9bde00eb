//! State management modules for the windowing engine.
//!
//! This module contains state-only logic (no UI concerns):
//! - Viewport state (scroll offset, container size)
//! - Surface observation (scroll/resize subscriptions with scoped release)
//! - List configuration (item heights, buffer, grid sizing, header policy)

mod viewport;
mod observer;
mod list_config;

pub use viewport::ViewportState;
pub use observer::{SurfaceEvent, SurfaceEvents, Subscription, ViewportTracker};
pub use list_config::{EmptyGroupPolicy, ItemHeights, ListConfig};
