//! Caching modules for derived layout values.

pub mod layout_cache;

// Re-export commonly used types
pub use layout_cache::{LayoutCache, LayoutKey};
