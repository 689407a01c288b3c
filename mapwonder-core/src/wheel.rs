use crate::zoom::ZoomDirection;

/// `|delta_x| >= |delta_y| * ratio` marks a wheel event as horizontal
/// enough to hijack: trackpads emit diagonal deltas that would otherwise
/// drift the page sideways.
pub const HORIZONTAL_DRIFT_RATIO: f64 = 0.5;

/// Raw wheel gesture over the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    /// `ctrl` or `meta` held.
    pub zoom_modifier: bool,
}

/// What the listener should do with a wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    /// Consume the event and zoom the viewport.
    Zoom(ZoomDirection),
    /// Consume the event and scroll the page vertically by `delta_y`.
    RedirectScroll { delta_y: f64 },
    /// Leave the event to the browser (normal vertical page scroll).
    PassThrough,
}

/// Route a wheel event: modifier → zoom, horizontal-ish drift → vertical
/// page scroll, anything else untouched.
pub fn classify_wheel(input: WheelInput) -> WheelAction {
    if input.zoom_modifier {
        return WheelAction::Zoom(ZoomDirection::from_wheel_delta(input.delta_y));
    }

    let abs_x = input.delta_x.abs();
    let abs_y = input.delta_y.abs();
    if abs_x > 0.0 && abs_x >= abs_y * HORIZONTAL_DRIFT_RATIO {
        return WheelAction::RedirectScroll {
            delta_y: input.delta_y,
        };
    }

    WheelAction::PassThrough
}
