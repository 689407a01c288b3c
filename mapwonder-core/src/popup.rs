//! Popup placement.
//!
//! Placement is computed from a measured popup box, so the caller runs a
//! two-phase commit: write content with the popup hidden at a reset
//! position, measure on the next frame, place with this module, then
//! reveal on the frame after. The popup never paints at a stale
//! position.

use crate::rect::{ScreenPoint, SurfaceSize};

/// Window width at or below which the popup becomes a bottom sheet.
pub const MOBILE_BREAKPOINT_PX: f64 = 520.0;

/// Horizontal gap between the pointer and the popup edge.
pub const POINTER_GAP_PX: f64 = 16.0;

/// Minimum distance kept between the popup and the window edges.
pub const EDGE_MARGIN_PX: f64 = 20.0;

/// Where the popup goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupPlacement {
    /// Absolute page position of the popup's top-left corner.
    Anchored { x: f64, y: f64 },
    /// Mobile layout: fixed to the bottom, full width minus side
    /// margins. Concrete offsets are a stylesheet concern.
    BottomSheet,
}

/// Place a measured popup near the pointer.
///
/// Desktop placement prefers the right side of the pointer, vertically
/// centered; flips to the left when the right edge would come within
/// [`EDGE_MARGIN_PX`] of the window; then clamps vertically, bottom edge
/// last so it wins when the popup is taller than the window.
pub fn place_popup(
    pointer: ScreenPoint,
    popup: SurfaceSize,
    window: SurfaceSize,
) -> PopupPlacement {
    if window.width <= MOBILE_BREAKPOINT_PX {
        return PopupPlacement::BottomSheet;
    }

    let mut x = pointer.x + POINTER_GAP_PX;
    let mut y = pointer.y - popup.height / 2.0;

    if x + popup.width > window.width - EDGE_MARGIN_PX {
        x = pointer.x - popup.width - POINTER_GAP_PX;
    }
    if y < EDGE_MARGIN_PX {
        y = EDGE_MARGIN_PX;
    }
    if y + popup.height > window.height - EDGE_MARGIN_PX {
        y = window.height - popup.height - EDGE_MARGIN_PX;
    }

    PopupPlacement::Anchored { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: SurfaceSize = SurfaceSize {
        width: 1280.0,
        height: 800.0,
    };
    const POPUP: SurfaceSize = SurfaceSize {
        width: 300.0,
        height: 180.0,
    };

    #[test]
    fn default_placement_is_right_of_pointer_vertically_centered() {
        let placement = place_popup(ScreenPoint::new(400.0, 300.0), POPUP, WINDOW);
        assert_eq!(placement, PopupPlacement::Anchored { x: 416.0, y: 210.0 });
    }

    #[test]
    fn flips_left_when_right_edge_would_crowd_the_window() {
        // 1000 + 16 + 300 = 1316 > 1280 - 20.
        let placement = place_popup(ScreenPoint::new(1000.0, 300.0), POPUP, WINDOW);
        assert_eq!(placement, PopupPlacement::Anchored { x: 684.0, y: 210.0 });
    }

    #[test]
    fn clamps_to_the_top_margin() {
        let placement = place_popup(ScreenPoint::new(400.0, 30.0), POPUP, WINDOW);
        assert_eq!(placement, PopupPlacement::Anchored { x: 416.0, y: 20.0 });
    }

    #[test]
    fn clamps_to_the_bottom_margin() {
        let placement = place_popup(ScreenPoint::new(400.0, 780.0), POPUP, WINDOW);
        // 800 - 180 - 20.
        assert_eq!(placement, PopupPlacement::Anchored { x: 416.0, y: 600.0 });
    }

    #[test]
    fn bottom_clamp_wins_when_popup_is_taller_than_the_window() {
        let tall = SurfaceSize::new(300.0, 900.0);
        let placement = place_popup(ScreenPoint::new(400.0, 400.0), tall, WINDOW);
        // Top clamp raises y to 20, bottom clamp then pulls it to
        // 800 - 900 - 20 = -120: the bottom edge stays on screen.
        assert_eq!(
            placement,
            PopupPlacement::Anchored { x: 416.0, y: -120.0 }
        );
    }

    #[test]
    fn narrow_window_uses_the_bottom_sheet() {
        let phone = SurfaceSize::new(390.0, 844.0);
        assert_eq!(
            place_popup(ScreenPoint::new(200.0, 400.0), POPUP, phone),
            PopupPlacement::BottomSheet
        );
    }

    #[test]
    fn breakpoint_boundary_is_inclusive() {
        let window = SurfaceSize::new(MOBILE_BREAKPOINT_PX, 800.0);
        assert_eq!(
            place_popup(ScreenPoint::new(100.0, 100.0), POPUP, window),
            PopupPlacement::BottomSheet
        );
        let window = SurfaceSize::new(MOBILE_BREAKPOINT_PX + 1.0, 800.0);
        assert!(matches!(
            place_popup(ScreenPoint::new(100.0, 100.0), POPUP, window),
            PopupPlacement::Anchored { .. }
        ));
    }
}
