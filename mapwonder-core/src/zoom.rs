use crate::rect::{LogicalRect, ScreenPoint, SurfaceSize};
use crate::viewport::Viewport;

/// Multiplicative change in viewport size per wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 1.15;

/// Size change (in document units) below which a zoom step is treated as
/// a no-op. Absorbs float drift when the clamp keeps returning the same
/// rect at a zoom bound.
pub const ZOOM_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: positive `delta_y` (scrolling down) zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            Self::Out
        } else {
            Self::In
        }
    }

    fn size_factor(self) -> f64 {
        match self {
            Self::Out => WHEEL_ZOOM_STEP,
            Self::In => 1.0 / WHEEL_ZOOM_STEP,
        }
    }
}

/// Apply one pointer-anchored wheel step to the viewport.
///
/// `pointer` is relative to the drawing surface. The document point under
/// the pointer stays under the pointer: scaling happens around the
/// pointer's logical position, not the viewport center.
///
/// Returns the committed rect, or `None` when nothing changed: the
/// surface has no usable geometry, or the clamp pinned the size at a
/// bound (difference below [`ZOOM_EPSILON`] in both axes). A `None` means
/// no re-render and no overlay rescale.
pub fn wheel_zoom(
    viewport: &mut Viewport,
    surface: SurfaceSize,
    pointer: ScreenPoint,
    direction: ZoomDirection,
) -> Option<LogicalRect> {
    if !surface.is_usable() {
        return None;
    }

    let current = viewport.rect();
    let scale_x = current.width / surface.width;
    let scale_y = current.height / surface.height;
    let anchor_x = current.x + pointer.x * scale_x;
    let anchor_y = current.y + pointer.y * scale_y;

    let factor = direction.size_factor();
    let new_width = current.width * factor;
    let new_height = current.height * factor;
    let candidate = LogicalRect::new(
        anchor_x - pointer.x * new_width / surface.width,
        anchor_y - pointer.y * new_height / surface.height,
        new_width,
        new_height,
    );

    let clamped = viewport.clamp(candidate);
    if (clamped.width - current.width).abs() < ZOOM_EPSILON
        && (clamped.height - current.height).abs() < ZOOM_EPSILON
    {
        return None;
    }

    Some(viewport.set_rect(clamped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: SurfaceSize = SurfaceSize {
        width: 800.0,
        height: 600.0,
    };

    fn full_1000() -> Viewport {
        Viewport::new(LogicalRect::new(0.0, 0.0, 1000.0, 750.0))
    }

    /// Document point currently under `pointer`.
    fn point_under_pointer(viewport: &Viewport, pointer: ScreenPoint) -> (f64, f64) {
        let rect = viewport.rect();
        (
            rect.x + pointer.x * rect.width / SURFACE.width,
            rect.y + pointer.y * rect.height / SURFACE.height,
        )
    }

    // ============================================================================
    // direction mapping tests
    // ============================================================================

    #[test]
    fn positive_wheel_delta_zooms_out() {
        assert_eq!(ZoomDirection::from_wheel_delta(120.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_wheel_delta(-120.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), ZoomDirection::In);
    }

    // ============================================================================
    // pointer anchoring tests
    // ============================================================================

    #[test]
    fn zoom_in_keeps_document_point_under_pointer() {
        let mut viewport = full_1000();
        let pointer = ScreenPoint::new(200.0, 450.0);
        let before = point_under_pointer(&viewport, pointer);

        wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::In).unwrap();

        let after = point_under_pointer(&viewport, pointer);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_then_out_returns_to_start_rect() {
        let mut viewport = full_1000();
        viewport.set_rect(LogicalRect::new(200.0, 150.0, 500.0, 375.0));
        let start = viewport.rect();
        let pointer = ScreenPoint::new(123.0, 77.0);

        wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::In).unwrap();
        wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::Out).unwrap();

        assert!(
            viewport.rect().approx_eq(&start, 1e-9),
            "round trip drifted: {:?} vs {:?}",
            viewport.rect(),
            start
        );
    }

    #[test]
    fn zoom_at_origin_pointer_keeps_origin_fixed() {
        let mut viewport = full_1000();
        let pointer = ScreenPoint::new(0.0, 0.0);
        let stored = wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::In).unwrap();
        assert_eq!(stored.x, 0.0);
        assert_eq!(stored.y, 0.0);
    }

    #[test]
    fn zoom_in_shrinks_size_by_step_factor() {
        let mut viewport = full_1000();
        let stored = wheel_zoom(
            &mut viewport,
            SURFACE,
            ScreenPoint::new(400.0, 300.0),
            ZoomDirection::In,
        )
        .unwrap();
        assert!((stored.width - 1000.0 / WHEEL_ZOOM_STEP).abs() < 1e-9);
        assert!((stored.height - 750.0 / WHEEL_ZOOM_STEP).abs() < 1e-9);
    }

    // ============================================================================
    // no-op and clamp tests
    // ============================================================================

    #[test]
    fn zoom_out_at_full_extent_is_a_no_op() {
        let mut viewport = full_1000();
        let before = viewport.rect();
        let result = wheel_zoom(
            &mut viewport,
            SURFACE,
            ScreenPoint::new(400.0, 300.0),
            ZoomDirection::Out,
        );
        assert_eq!(result, None);
        assert_eq!(viewport.rect(), before);
    }

    #[test]
    fn zoom_in_stops_at_min_size_and_stays_there() {
        let mut viewport = full_1000();
        let pointer = ScreenPoint::new(400.0, 300.0);

        // Drive the viewport to the minimum size.
        let mut steps = 0;
        while wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::In).is_some() {
            steps += 1;
            assert!(steps < 100, "zoom never reached the min-size bound");
        }

        let at_bound = viewport.rect();
        assert!((at_bound.width - 300.0).abs() < 1.0);

        // Further zoom-in requests are no-ops and do not drift the rect.
        assert_eq!(
            wheel_zoom(&mut viewport, SURFACE, pointer, ZoomDirection::In),
            None
        );
        assert_eq!(viewport.rect(), at_bound);
    }

    #[test]
    fn zoomed_rect_is_contained_after_corner_zoom_out() {
        let mut viewport = full_1000();
        viewport.set_rect(LogicalRect::new(700.0, 525.0, 300.0, 225.0));

        // Zooming out anchored at a far corner would overhang without the clamp.
        wheel_zoom(
            &mut viewport,
            SURFACE,
            ScreenPoint::new(790.0, 590.0),
            ZoomDirection::Out,
        )
        .unwrap();

        let full = viewport.full_extent();
        assert!(full.contains_rect(&viewport.rect()));
    }

    #[test]
    fn degenerate_surface_is_a_no_op() {
        let mut viewport = full_1000();
        let before = viewport.rect();
        let result = wheel_zoom(
            &mut viewport,
            SurfaceSize::new(0.0, 0.0),
            ScreenPoint::new(0.0, 0.0),
            ZoomDirection::In,
        );
        assert_eq!(result, None);
        assert_eq!(viewport.rect(), before);
    }
}
