//! Layout logic for grouped, virtualized lists.
//!
//! This module contains the pure stages of the windowing engine:
//! - Flattening (groups -> position-annotated virtual items)
//! - Positions (content height, group offsets)
//! - Visible range (binary-search viewport resolution with buffering)
//! - Jump bar (group label positions for quick navigation)
//! - Grouping (library entities -> alphabetical and per-album groups)

pub mod flatten;
pub mod positions;
pub mod visible_range;
pub mod jump_bar;
pub mod grouping;
