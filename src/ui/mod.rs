//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the library viewer:
//! - Header panel (file controls, filter box, layout toggles)
//! - Tab bar (one tab per library view)
//! - Jump bar (section labels beside the list)
//! - Library panel (virtualized list and grid views)
//! - Status bar (library totals, layout figures, selection)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod tab_bar;
pub mod jump_bar;
pub mod library_panel;
pub mod status_bar;
pub mod panel_manager;
