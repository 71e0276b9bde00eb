//! Rendering subsystem for drawing library items
//!
//! This module contains the low-level drawing code for the library viewer:
//! - Group header rendering (section label and member count)
//! - Card rendering (album and artist grid rows)
//! - Row rendering (artist and track list rows)
//! - Text utilities (text measurement and truncation)

pub mod header_renderer;
pub mod card_renderer;
pub mod row_renderer;
pub mod text_utils;
