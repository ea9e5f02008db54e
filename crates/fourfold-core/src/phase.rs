//! Lifecycle phase of a game instance.
//!
//! Phases only move forward: `None -> Initialized -> Running -> Finished`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    #[default]
    None = 0,
    Initialized = 1,
    Running = 2,
    Finished = 3,
}

impl Phase {
    /// Wire representation
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether `next` is the single forward step from `self`.
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::None, Phase::Initialized)
                | (Phase::Initialized, Phase::Running)
                | (Phase::Running, Phase::Finished)
        )
    }

    /// No further moves are accepted once finished.
    pub fn is_terminal(self) -> bool {
        self == Phase::Finished
    }
}

impl TryFrom<u8> for Phase {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Phase::None),
            1 => Ok(Phase::Initialized),
            2 => Ok(Phase::Running),
            3 => Ok(Phase::Finished),
            other => Err(other),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::None => "none",
            Phase::Initialized => "initialized",
            Phase::Running => "running",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}
