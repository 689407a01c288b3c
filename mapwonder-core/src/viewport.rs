use crate::rect::LogicalRect;
use serde::{Deserialize, Serialize};

/// Fraction of the full extent below which the visible rect cannot shrink,
/// per axis. At 0.3 the deepest zoom shows 30% of the document.
pub const MIN_VIEW_FRACTION: f64 = 0.3;

/// Full document extent plus the currently visible sub-rectangle.
///
/// The full extent is fixed once the document loads; the current rect is
/// the only mutable piece of viewport state, and every mutation funnels
/// through [`Viewport::set_rect`], which clamps the candidate so that:
/// - width and height stay within `[MIN_VIEW_FRACTION * full, full]`,
///   clamped independently per axis,
/// - the rect lies entirely inside the full extent.
///
/// Callers therefore never observe an out-of-bounds or over-shrunk
/// viewport, no matter what zoom/pan arithmetic produced the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    full: LogicalRect,
    current: LogicalRect,
}

impl Viewport {
    /// Create a viewport showing the full extent.
    pub fn new(full: LogicalRect) -> Self {
        Self {
            full,
            current: full,
        }
    }

    pub fn full_extent(&self) -> LogicalRect {
        self.full
    }

    pub fn rect(&self) -> LogicalRect {
        self.current
    }

    /// Pure form of the clamp applied by [`Viewport::set_rect`].
    pub fn clamp(&self, candidate: LogicalRect) -> LogicalRect {
        let full = self.full;
        let min_width = full.width * MIN_VIEW_FRACTION;
        let min_height = full.height * MIN_VIEW_FRACTION;
        let width = candidate.width.clamp(min_width, full.width);
        let height = candidate.height.clamp(min_height, full.height);
        let x = candidate.x.clamp(full.x, full.x + full.width - width);
        let y = candidate.y.clamp(full.y, full.y + full.height - height);
        LogicalRect::new(x, y, width, height)
    }

    /// Clamp `candidate` and store it as the visible rect. Returns what
    /// was actually stored.
    pub fn set_rect(&mut self, candidate: LogicalRect) -> LogicalRect {
        self.current = self.clamp(candidate);
        self.current
    }

    /// Zoom relative to the full extent: 1.0 when fully zoomed out,
    /// larger as the visible width shrinks.
    pub fn zoom_level(&self) -> f64 {
        self.full.width / self.current.width
    }

    /// Document units per CSS pixel at the given surface width, or `None`
    /// when the surface has no usable width yet.
    pub fn units_per_pixel(&self, surface_width: f64) -> Option<f64> {
        if surface_width > 0.0 && surface_width.is_finite() {
            Some(self.current.width / surface_width)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_1000() -> Viewport {
        Viewport::new(LogicalRect::new(0.0, 0.0, 1000.0, 800.0))
    }

    // ============================================================================
    // set_rect() containment tests
    // ============================================================================

    #[test]
    fn new_viewport_shows_full_extent() {
        let viewport = full_1000();
        assert_eq!(viewport.rect(), viewport.full_extent());
        assert_eq!(viewport.zoom_level(), 1.0);
    }

    #[test]
    fn set_rect_keeps_in_bounds_candidate_unchanged() {
        let mut viewport = full_1000();
        let candidate = LogicalRect::new(100.0, 50.0, 500.0, 400.0);
        assert_eq!(viewport.set_rect(candidate), candidate);
        assert_eq!(viewport.rect(), candidate);
    }

    #[test]
    fn set_rect_pulls_negative_origin_back_inside() {
        let mut viewport = full_1000();
        let stored = viewport.set_rect(LogicalRect::new(-50.0, -25.0, 500.0, 400.0));
        assert_eq!(stored, LogicalRect::new(0.0, 0.0, 500.0, 400.0));
    }

    #[test]
    fn set_rect_pulls_overhanging_origin_back_inside() {
        let mut viewport = full_1000();
        let stored = viewport.set_rect(LogicalRect::new(900.0, 700.0, 500.0, 400.0));
        assert_eq!(stored, LogicalRect::new(500.0, 400.0, 500.0, 400.0));
    }

    #[test]
    fn stored_rect_is_always_contained_in_full_extent() {
        let mut viewport = full_1000();
        let candidates = [
            LogicalRect::new(-1e6, -1e6, 500.0, 400.0),
            LogicalRect::new(1e6, 1e6, 500.0, 400.0),
            LogicalRect::new(200.0, 100.0, 5000.0, 4000.0),
            LogicalRect::new(999.0, 799.0, 1.0, 1.0),
        ];
        for candidate in candidates {
            let stored = viewport.set_rect(candidate);
            assert!(
                viewport.full_extent().contains_rect(&stored),
                "candidate {candidate:?} stored as {stored:?} escapes the full extent"
            );
        }
    }

    #[test]
    fn clamp_respects_nonzero_full_origin() {
        let mut viewport = Viewport::new(LogicalRect::new(10.0, 20.0, 100.0, 100.0));
        let stored = viewport.set_rect(LogicalRect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(stored, LogicalRect::new(10.0, 20.0, 50.0, 50.0));
    }

    // ============================================================================
    // set_rect() size clamp tests
    // ============================================================================

    #[test]
    fn oversized_candidate_clamps_to_full_size() {
        let mut viewport = full_1000();
        let stored = viewport.set_rect(LogicalRect::new(0.0, 0.0, 2000.0, 1600.0));
        assert_eq!(stored, viewport.full_extent());
    }

    #[test]
    fn undersized_candidate_clamps_to_min_fraction() {
        let mut viewport = full_1000();
        let stored = viewport.set_rect(LogicalRect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(stored.width, 300.0);
        assert_eq!(stored.height, 240.0);
    }

    #[test]
    fn width_and_height_clamp_independently() {
        let mut viewport = full_1000();
        let stored = viewport.set_rect(LogicalRect::new(0.0, 0.0, 10.0, 600.0));
        assert_eq!(stored.width, 300.0);
        assert_eq!(stored.height, 600.0);
    }

    // ============================================================================
    // zoom_level() / units_per_pixel() tests
    // ============================================================================

    #[test]
    fn zoom_level_doubles_when_width_halves() {
        let mut viewport = full_1000();
        viewport.set_rect(LogicalRect::new(0.0, 0.0, 500.0, 400.0));
        assert_eq!(viewport.zoom_level(), 2.0);
    }

    #[test]
    fn units_per_pixel_at_reference_surface() {
        let viewport = full_1000();
        assert_eq!(viewport.units_per_pixel(800.0), Some(1.25));
    }

    #[test]
    fn units_per_pixel_rejects_degenerate_surface() {
        let viewport = full_1000();
        assert_eq!(viewport.units_per_pixel(0.0), None);
        assert_eq!(viewport.units_per_pixel(-10.0), None);
        assert_eq!(viewport.units_per_pixel(f64::NAN), None);
    }
}
