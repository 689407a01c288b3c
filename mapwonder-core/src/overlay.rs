//! Marker overlay scale synchronization.
//!
//! Markers are SVG circles whose geometry lives in document units, so a
//! zoomed-in viewBox would blow them up proportionally. After every
//! committed viewport change the radius is recomputed so markers keep a
//! near-constant apparent size: the on-screen radius grows only mildly
//! with zoom level instead of linearly.

/// Marker radius on screen at zoom level 1, in CSS pixels.
pub const MARKER_BASE_RADIUS_PX: f64 = 6.0;

/// Fraction of the base radius gained per unit of zoom level above 1.
/// At zoom 2 the on-screen radius is 6 * 1.3 = 7.8 px.
pub const MARKER_ZOOM_GROWTH: f64 = 0.3;

/// Marker outline width in CSS pixels, held constant on screen via
/// `vector-effect: non-scaling-stroke`.
pub const MARKER_STROKE_PX: f64 = 0.9;

/// Resolved marker geometry for the current viewport and surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayScale {
    /// Circle radius in document units (written to the `r` attribute).
    pub radius_units: f64,
    /// Outline width in CSS pixels (written as a style, not scaled).
    pub stroke_px: f64,
}

/// Compute the marker scale from the full extent width, the visible
/// width and the surface width in pixels.
///
/// Returns `None` when any input is non-positive: the surface may not
/// have laid out yet, or no extent was resolvable. Callers skip the
/// pass and retry on the next scheduled one.
pub fn marker_scale(
    full_width: f64,
    current_width: f64,
    surface_px_width: f64,
) -> Option<OverlayScale> {
    if !(full_width > 0.0 && current_width > 0.0 && surface_px_width > 0.0) {
        return None;
    }

    let units_per_px = current_width / surface_px_width;
    let zoom_level = full_width / current_width;
    let radius_px = MARKER_BASE_RADIUS_PX * (1.0 + (zoom_level - 1.0) * MARKER_ZOOM_GROWTH);

    Some(OverlayScale {
        radius_units: radius_px * units_per_px,
        stroke_px: MARKER_STROKE_PX,
    })
}
