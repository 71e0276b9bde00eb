//! Utility modules for the library viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_count, format_duration, quality_badge, get_current_memory_mb, format_memory_mb};
