//! Per-frame input state handed to the session.

/// Everything the session needs to know about input for one frame.
///
/// Held keys are level-triggered (true while down); clicks and the sprint
/// key are edge-triggered and should be reported only on the frame they
/// happen.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Sprint key went down this frame.
    pub sprint_pressed: bool,
    /// Primary click this frame: break the highlighted block.
    pub break_clicked: bool,
    /// Secondary click this frame: place a block at the target cell.
    pub place_clicked: bool,
    /// Hotbar slot chosen this frame, if any.
    pub select_slot: Option<usize>,
    /// View yaw in radians.
    pub yaw: f32,
    /// View pitch in radians.
    pub pitch: f32,
}

impl InputSnapshot {
    /// True if any directional movement key is held.
    #[must_use]
    pub fn moving(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}
