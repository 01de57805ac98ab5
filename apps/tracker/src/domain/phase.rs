//! Controller lifecycle phases.

use crate::domain::selection::Selection;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// Some players selected but submission is not yet allowed.
    Selecting,
    /// Eligibility holds; the submit trigger is enabled.
    Ready,
    /// A create-game request is outstanding.
    Submitting,
}

impl Phase {
    /// Resting phase for a selection. Never yields `Submitting`.
    pub fn of(selection: &Selection) -> Phase {
        if selection.is_eligible() {
            Phase::Ready
        } else if selection.is_empty() {
            Phase::Idle
        } else {
            Phase::Selecting
        }
    }

    pub fn can_submit(self) -> bool {
        self == Phase::Ready
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selecting => "selecting",
            Phase::Ready => "ready",
            Phase::Submitting => "submitting",
        }
    }
}
