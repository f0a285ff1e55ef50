//! Possession and event values produced per frame.
//!
//! Integer codes only exist at the serialisation boundary:
//!
//! | Value | Code |
//! |-------|------|
//! | `Possession::NoHolder` | `-1` |
//! | `Possession::HeldBy(id)` | `id` |
//! | no event | `0` |
//! | pass / interception by team 1 or 2 | `1` / `2` |

use serde::{Deserialize, Serialize};

use super::team::Team;
use super::track::TrackId;

/// Sentinel used on the wire for "nobody holds the ball".
pub const NO_HOLDER_CODE: i64 = -1;

/// Who holds the ball in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Possession {
    #[default]
    NoHolder,
    HeldBy(TrackId),
}

impl Possession {
    pub fn holder(self) -> Option<TrackId> {
        match self {
            Possession::NoHolder => None,
            Possession::HeldBy(id) => Some(id),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Possession::NoHolder => NO_HOLDER_CODE,
            Possession::HeldBy(id) => i64::from(id),
        }
    }
}

impl From<i64> for Possession {
    fn from(code: i64) -> Self {
        TrackId::try_from(code)
            .map(Possession::HeldBy)
            .unwrap_or(Possession::NoHolder)
    }
}

impl From<Possession> for i64 {
    fn from(p: Possession) -> Self {
        p.code()
    }
}

/// Event emitted on the exact frame a possession transfer completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "team")]
pub enum FrameEvent {
    #[default]
    None,
    /// Same-team transfer, credited to that team.
    Pass(Team),
    /// Cross-team transfer, credited to the team that gained the ball.
    Interception(Team),
}

impl FrameEvent {
    /// Pass code for this frame: 0, 1 or 2.
    pub fn pass_code(self) -> u8 {
        match self {
            FrameEvent::Pass(team) => team.code(),
            _ => 0,
        }
    }

    /// Interception code for this frame: 0, 1 or 2.
    pub fn interception_code(self) -> u8 {
        match self {
            FrameEvent::Interception(team) => team.code(),
            _ => 0,
        }
    }

    pub fn is_none(self) -> bool {
        self == FrameEvent::None
    }
}
