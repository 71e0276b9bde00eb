//! Viewport state management.
//!
//! This module encapsulates the observed geometry of the scroll container:
//! the current scroll offset and the container's size. The values are never
//! persisted; they are republished by the host surface on every scroll and
//! resize.

/// Observed scroll position and container size.
///
/// Responsibilities:
/// - Tracking the vertical scroll offset (never negative)
/// - Tracking container width and height (never negative)
/// - Answering viewport-bounds queries for the visible range resolver
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Current vertical scroll offset in pixels
    scroll_top: f32,
    /// Width of the scroll container
    container_width: f32,
    /// Height of the scroll container
    container_height: f32,
}

impl ViewportState {
    /// Creates a viewport at the top of an unsized container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a viewport for a container of the given size.
    pub fn with_size(width: f32, height: f32) -> Self {
        let mut state = Self::new();
        state.set_size(width, height);
        state
    }

    // ===== Viewport Queries =====

    /// Returns the current scroll offset.
    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Returns the container width.
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Returns the container height.
    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    /// Returns the viewport's bottom edge in content coordinates.
    pub fn scroll_bottom(&self) -> f32 {
        self.scroll_top + self.container_height
    }

    // ===== Viewport Mutations =====

    /// Sets the scroll offset, clamping negative or NaN values to zero.
    ///
    /// Returns true if the stored value changed.
    pub fn set_scroll_top(&mut self, top: f32) -> bool {
        let top = sanitize(top);
        let changed = top != self.scroll_top;
        self.scroll_top = top;
        changed
    }

    /// Sets the container size, clamping negative or NaN values to zero.
    ///
    /// Returns true if either dimension changed.
    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        let (width, height) = (sanitize(width), sanitize(height));
        let changed = width != self.container_width || height != self.container_height;
        self.container_width = width;
        self.container_height = height;
        changed
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_scroll_is_clamped() {
        let mut viewport = ViewportState::new();
        assert!(!viewport.set_scroll_top(-20.0));
        assert_eq!(viewport.scroll_top(), 0.0);
    }

    #[test]
    fn test_change_detection() {
        let mut viewport = ViewportState::with_size(800.0, 600.0);
        assert!(viewport.set_scroll_top(120.0));
        assert!(!viewport.set_scroll_top(120.0));
        assert!(!viewport.set_size(800.0, 600.0));
        assert!(viewport.set_size(640.0, 600.0));
        assert_eq!(viewport.scroll_bottom(), 720.0);
    }

    #[test]
    fn test_nan_size_is_zero() {
        let viewport = ViewportState::with_size(f32::NAN, f32::INFINITY);
        assert_eq!(viewport.container_width(), 0.0);
        assert_eq!(viewport.container_height(), 0.0);
    }
}
