//! Region hover and activation state.
//!
//! Hover restyling is anchored to the fill cached at palette-assignment
//! time: hovering paints a darkened variant computed from the cache,
//! leaving restores the cached string untouched, so any number of
//! enter/leave cycles is lossless. Activation (driven by search
//! selection) highlights a single region with an outline layer and must
//! put the region's own stroke attributes back exactly as found.

use crate::color::Hsl;

/// Lightness points removed from the cached base fill while hovered.
pub const REGION_HOVER_DARKEN: f64 = 10.0;

/// Accent color of the activated-region outline.
pub const ACTIVE_OUTLINE_STROKE: &str = "#0a84ff";

/// Outline width in document units, held on screen by
/// `non-scaling-stroke`.
pub const ACTIVE_OUTLINE_WIDTH: &str = "1";

/// Fill to paint while a region is hovered: the cached base fill
/// darkened by [`REGION_HOVER_DARKEN`]. `None` when the cache holds
/// something that is not one of our `hsl(...)` fills; the caller then
/// leaves the element alone.
pub fn hover_fill(base_fill: &str) -> Option<String> {
    Some(Hsl::parse(base_fill)?.darkened(REGION_HOVER_DARKEN).to_css())
}

/// Stroke presentation attributes captured before activation restyles a
/// region. `None` records that the attribute was absent, so restore can
/// distinguish "remove the attribute" from "set it to an empty string".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedStroke {
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
}

/// Bookkeeping for the single activated region. Holds the region id and
/// what must be restored when the activation moves on.
#[derive(Debug, Default)]
pub struct RegionActivation {
    active: Option<(String, SavedStroke)>,
}

impl RegionActivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|(id, _)| id.as_str())
    }

    /// Activate `id`, returning the previously activated region (id and
    /// saved attributes) that the caller must restore first.
    pub fn activate(
        &mut self,
        id: impl Into<String>,
        saved: SavedStroke,
    ) -> Option<(String, SavedStroke)> {
        self.active.replace((id.into(), saved))
    }

    /// Clear any activation, returning what must be restored. Idempotent.
    pub fn clear(&mut self) -> Option<(String, SavedStroke)> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // hover_fill() tests
    // ============================================================================

    #[test]
    fn hover_fill_darkens_by_ten_points() {
        assert_eq!(
            hover_fill("hsl(175, 50%, 78%)").as_deref(),
            Some("hsl(175, 50%, 68%)")
        );
    }

    #[test]
    fn hover_fill_floors_at_zero_lightness() {
        assert_eq!(
            hover_fill("hsl(175, 50%, 4%)").as_deref(),
            Some("hsl(175, 50%, 0%)")
        );
    }

    #[test]
    fn hover_fill_skips_foreign_fills() {
        assert_eq!(hover_fill("#ff0000"), None);
        assert_eq!(hover_fill("url(#gradient)"), None);
        assert_eq!(hover_fill(""), None);
    }

    #[test]
    fn enter_leave_cycle_preserves_the_cached_string() {
        // The engine never rewrites the cache, only derives from it, so
        // derived hover fills stay identical across cycles.
        let cached = "hsl(168, 47%, 81%)";
        let first = hover_fill(cached).unwrap();
        let second = hover_fill(cached).unwrap();
        assert_eq!(first, second);
        assert_eq!(cached, "hsl(168, 47%, 81%)");
    }

    // ============================================================================
    // RegionActivation tests
    // ============================================================================

    #[test]
    fn activate_returns_previous_region_for_restore() {
        let mut activation = RegionActivation::new();
        assert_eq!(activation.activate("TH-10", SavedStroke::default()), None);
        assert_eq!(activation.active_id(), Some("TH-10"));

        let saved = SavedStroke {
            stroke: Some("#fff".to_string()),
            stroke_width: Some("0.4".to_string()),
        };
        let previous = activation.activate("TH-40", saved.clone());
        assert_eq!(
            previous,
            Some(("TH-10".to_string(), SavedStroke::default()))
        );
        assert_eq!(activation.active_id(), Some("TH-40"));

        let cleared = activation.clear();
        assert_eq!(cleared, Some(("TH-40".to_string(), saved)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut activation = RegionActivation::new();
        activation.activate("TH-10", SavedStroke::default());
        assert!(activation.clear().is_some());
        assert_eq!(activation.clear(), None);
        assert_eq!(activation.active_id(), None);
    }

    #[test]
    fn saved_stroke_distinguishes_absent_from_empty() {
        let absent = SavedStroke {
            stroke: None,
            stroke_width: None,
        };
        let empty = SavedStroke {
            stroke: Some(String::new()),
            stroke_width: Some(String::new()),
        };
        assert_ne!(absent, empty);
    }
}
