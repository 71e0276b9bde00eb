//! List layout configuration.
//!
//! Holds every tunable the windowing engine reads: the fixed height of each
//! item variant, the overscan buffer, grid card sizing and the header policy.
//! The struct is serializable so hosts can persist it next to their other
//! settings.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// What to do with the header of a group that has no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyGroupPolicy {
    /// Emit the header even though nothing follows it.
    #[default]
    ShowHeader,
    /// Skip the group entirely.
    Hide,
}

/// Fixed pixel height of each virtual item variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemHeights {
    pub header: f32,
    /// Height of one grid row of cards
    pub row: f32,
    /// Height of one list leaf
    pub leaf: f32,
}

impl Default for ItemHeights {
    fn default() -> Self {
        Self {
            header: 36.0,
            row: 212.0,
            leaf: 28.0,
        }
    }
}

impl ItemHeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [("header", self.header), ("row", self.row), ("leaf", self.leaf)] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{} height must be a positive number of pixels, got {}", name, value);
            }
        }
        Ok(())
    }
}

/// Layout settings for one virtualized list instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub heights: ItemHeights,
    /// Items kept mounted beyond each edge of the viewport
    pub buffer: usize,
    /// Extra space after the last item (keeps rows clear of the player bar)
    pub bottom_padding: f32,
    /// Minimum card width in grid mode
    pub card_width: f32,
    /// Gap between grid cards
    pub gap: f32,
    pub show_headers: bool,
    pub empty_groups: EmptyGroupPolicy,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            heights: ItemHeights::default(),
            buffer: 6,
            bottom_padding: 96.0,
            card_width: 160.0,
            gap: 12.0,
            show_headers: true,
            empty_groups: EmptyGroupPolicy::ShowHeader,
        }
    }
}

impl ListConfig {
    /// Defaults tuned for card grids (no player bar padding needed).
    pub fn grid() -> Self {
        Self {
            bottom_padding: 0.0,
            ..Self::default()
        }
    }

    /// Rejects values the layout math cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.heights.validate()?;
        if !self.card_width.is_finite() || self.card_width <= 0.0 {
            bail!("card width must be positive, got {}", self.card_width);
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            bail!("grid gap must not be negative, got {}", self.gap);
        }
        if !self.bottom_padding.is_finite() || self.bottom_padding < 0.0 {
            bail!("bottom padding must not be negative, got {}", self.bottom_padding);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ListConfig::default().validate().is_ok());
        assert!(ListConfig::grid().validate().is_ok());
        assert_eq!(ListConfig::grid().bottom_padding, 0.0);
    }

    #[test]
    fn test_rejects_zero_height() {
        let mut config = ListConfig::default();
        config.heights.leaf = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("leaf"));
    }

    #[test]
    fn test_rejects_nan_card_width() {
        let config = ListConfig {
            card_width: f32::NAN,
            ..ListConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ListConfig = serde_json::from_str(r#"{"buffer": 9}"#).unwrap();
        assert_eq!(config.buffer, 9);
        assert_eq!(config.heights, ItemHeights::default());
        assert_eq!(config.empty_groups, EmptyGroupPolicy::ShowHeader);
    }
}
