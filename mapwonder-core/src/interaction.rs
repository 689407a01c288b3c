//! Marker interaction state machine.
//!
//! Tracks which marker is hovered, which is active (popup subject) and
//! where the popup is in its open lifecycle. The DOM layer never stores
//! visual state of its own: after any transition it re-reads
//! [`InteractionModel::visual`] for the affected markers and repaints.

/// Visual state of one hotspot marker, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVisual {
    Idle,
    Hovered,
    Active,
}

/// Popup lifecycle. `Opening` doubles as the single-flight latch: while a
/// measure/place sequence is in flight, further open requests are
/// dropped rather than queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    #[default]
    Closed,
    Opening,
    Open,
}

/// Hover/active bookkeeping for the marker overlay plus the popup phase.
///
/// Invariants:
/// - at most one marker is `Active`;
/// - activating a marker demotes the previous active one in the same
///   transition (callers repaint both);
/// - `Opening` is entered at most once per settled open sequence.
#[derive(Debug)]
pub struct InteractionModel {
    marker_count: usize,
    hovered: Option<usize>,
    active: Option<usize>,
    phase: PopupPhase,
}

impl InteractionModel {
    pub fn new(marker_count: usize) -> Self {
        Self {
            marker_count,
            hovered: None,
            active: None,
            phase: PopupPhase::Closed,
        }
    }

    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn popup_phase(&self) -> PopupPhase {
        self.phase
    }

    pub fn popup_open(&self) -> bool {
        self.phase == PopupPhase::Open
    }

    /// Visual for marker `index`. Active wins over hovered.
    pub fn visual(&self, index: usize) -> MarkerVisual {
        if self.active == Some(index) {
            MarkerVisual::Active
        } else if self.hovered == Some(index) {
            MarkerVisual::Hovered
        } else {
            MarkerVisual::Idle
        }
    }

    /// Pointer entered marker `index`. Out-of-range indices are ignored.
    pub fn hover_enter(&mut self, index: usize) {
        if index < self.marker_count {
            self.hovered = Some(index);
        }
    }

    /// Pointer left marker `index`. An active marker keeps its active
    /// visual; only the hover flag is dropped.
    pub fn hover_leave(&mut self, index: usize) {
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    /// Begin the popup open sequence for marker `index`: the marker
    /// becomes active (demoting any previous active marker) and the
    /// latch is taken.
    ///
    /// Returns `false` when the request is dropped: a prior open is
    /// still in flight, or the index is out of range. A dropped request
    /// must cause no content write and no restyle.
    pub fn request_open(&mut self, index: usize) -> bool {
        if index >= self.marker_count || self.phase == PopupPhase::Opening {
            return false;
        }
        self.active = Some(index);
        self.phase = PopupPhase::Opening;
        true
    }

    /// Second commit phase: the popup has been measured and placed. A
    /// stray call outside an open sequence changes nothing.
    pub fn commit_open(&mut self) {
        if self.phase == PopupPhase::Opening {
            self.phase = PopupPhase::Open;
        }
    }

    /// Close the popup, clear the latch and demote the active marker.
    /// Returns the marker that lost active state so the caller can
    /// repaint it. Safe to call at any time, any number of times.
    pub fn dismiss(&mut self) -> Option<usize> {
        self.phase = PopupPhase::Closed;
        self.active.take()
    }
}
