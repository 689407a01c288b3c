use crate::rect::{LogicalRect, ScreenPoint, SurfaceSize};
use crate::viewport::Viewport;

/// Pan interaction state. A drag carries the pointer position and the
/// viewport rect captured at `begin`; every subsequent move re-derives
/// from that immutable snapshot, so clamped moves never feed back into
/// the translation math.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    Dragging {
        origin: ScreenPoint,
        start_rect: LogicalRect,
    },
}

/// Drag-to-pan controller: `Idle` ⇄ `Dragging`.
#[derive(Debug, Default)]
pub struct PanController {
    state: PanState,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PanState::Dragging { .. })
    }

    /// Enter `Dragging`, snapshotting the pointer and the current rect.
    /// The caller decides whether the press qualifies (primary button,
    /// not on a marker).
    pub fn begin(&mut self, pointer: ScreenPoint, current: LogicalRect) {
        self.state = PanState::Dragging {
            origin: pointer,
            start_rect: current,
        };
    }

    /// Translate the drag-start snapshot to follow the pointer and store
    /// the clamped result. Content follows the cursor: dragging right
    /// moves the viewport origin left. Returns `None` outside a drag or
    /// without usable surface geometry.
    pub fn move_to(
        &mut self,
        viewport: &mut Viewport,
        surface: SurfaceSize,
        pointer: ScreenPoint,
    ) -> Option<LogicalRect> {
        let (origin, start_rect) = match self.state {
            PanState::Dragging { origin, start_rect } => (origin, start_rect),
            PanState::Idle => return None,
        };
        if !surface.is_usable() {
            return None;
        }

        let dx_px = pointer.x - origin.x;
        let dy_px = pointer.y - origin.y;
        let scale_x = start_rect.width / surface.width;
        let scale_y = start_rect.height / surface.height;
        let candidate = LogicalRect::new(
            start_rect.x - dx_px * scale_x,
            start_rect.y - dy_px * scale_y,
            start_rect.width,
            start_rect.height,
        );
        Some(viewport.set_rect(candidate))
    }

    /// Leave `Dragging`. Pointer-up anywhere on the page ends the drag.
    pub fn end(&mut self) {
        self.state = PanState::Idle;
    }
}
