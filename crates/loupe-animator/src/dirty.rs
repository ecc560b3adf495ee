//! The animator's dirty state and the intents that set it

use loupe_scroll::{SegmentId, TweenTarget};
use std::fmt;

/// Which camera vector a hooked write touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraField {
    Position,
    Target,
}

impl CameraField {
    /// Field written by a tween target, `None` for non-camera targets
    pub fn of(target: &TweenTarget) -> Option<Self> {
        match target {
            TweenTarget::CameraPosition => Some(CameraField::Position),
            TweenTarget::CameraTarget => Some(CameraField::Target),
            TweenTarget::Element(_) => None,
        }
    }
}

impl fmt::Display for CameraField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraField::Position => write!(f, "position"),
            CameraField::Target => write!(f, "target"),
        }
    }
}

/// A hooked tween write, queued until the next frame boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraUpdateIntent {
    pub segment: SegmentId,
    pub field: CameraField,
}

/// Whether the camera has moved since the last frame boundary.
///
/// Marked freely by the scroll path; cleared only by [`DirtyState::take`]
/// at the frame boundary. Starts dirty so the first frame synchronises the
/// camera with whatever the setup left in it.
#[derive(Debug)]
pub struct DirtyState {
    needs_update: bool,
    intents: Vec<CameraUpdateIntent>,
}

impl Default for DirtyState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyState {
    pub fn new() -> Self {
        Self {
            needs_update: true,
            intents: Vec::new(),
        }
    }

    /// A state that starts idle
    pub fn clean() -> Self {
        Self {
            needs_update: false,
            intents: Vec::new(),
        }
    }

    /// Record a hooked write. Idempotent with respect to the flag.
    pub fn mark(&mut self, intent: CameraUpdateIntent) {
        self.needs_update = true;
        self.intents.push(intent);
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Intents queued since the last frame boundary
    pub fn pending(&self) -> &[CameraUpdateIntent] {
        &self.intents
    }

    /// Consume the state at a frame boundary.
    ///
    /// Returns the drained intents when dirty (possibly empty, for the
    /// initial state), `None` when idle.
    pub fn take(&mut self) -> Option<Vec<CameraUpdateIntent>> {
        if !std::mem::take(&mut self.needs_update) {
            return None;
        }
        Some(std::mem::take(&mut self.intents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_scroll::TimelineId;

    fn intent(index: usize, field: CameraField) -> CameraUpdateIntent {
        CameraUpdateIntent {
            segment: SegmentId {
                timeline: TimelineId(0),
                index,
            },
            field,
        }
    }

    #[test]
    fn starts_dirty_and_clears_once() {
        let mut state = DirtyState::new();
        assert!(state.needs_update());
        assert_eq!(state.take(), Some(Vec::new()));
        assert!(!state.needs_update());
        assert_eq!(state.take(), None);
    }

    #[test]
    fn repeated_marks_stay_dirty() {
        let mut state = DirtyState::clean();
        state.mark(intent(0, CameraField::Position));
        assert!(state.needs_update());
        state.mark(intent(0, CameraField::Position));
        state.mark(intent(2, CameraField::Target));
        assert!(state.needs_update());
        assert_eq!(state.pending().len(), 3);

        let drained = state.take().unwrap();
        assert_eq!(drained[2].field, CameraField::Target);
        assert!(state.pending().is_empty());
        assert_eq!(state.take(), None);
    }

    #[test]
    fn element_targets_have_no_camera_field() {
        assert_eq!(
            CameraField::of(&TweenTarget::CameraTarget),
            Some(CameraField::Target)
        );
        assert_eq!(CameraField::of(&TweenTarget::Element(".second".into())), None);
    }
}
