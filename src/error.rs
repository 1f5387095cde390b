use std::fmt;

/// Fatal navigation failures.
///
/// None of these are recoverable in the field: each one indicates the map or
/// the mission state machine reached a configuration the algorithm assumes
/// can never happen. The only correct response is to stop driving the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// `search_step` needed to backtrack but the move stack was empty.
    StackUnderflow,
    /// A forward step tried to push past the move stack's fixed capacity.
    StackOverflow,
    /// A mission guard produced a next-state with no matching transition.
    IllegalTransition {
        from: crate::mission::MissionState,
        to: crate::mission::MissionState,
    },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::StackUnderflow => {
                write!(f, "move stack underflow: backtrack requested with no moves recorded")
            }
            NavError::StackOverflow => {
                write!(f, "move stack overflow: exceeded configured capacity")
            }
            NavError::IllegalTransition { from, to } => {
                write!(f, "illegal mission transition: {:?} -> {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for NavError {}
