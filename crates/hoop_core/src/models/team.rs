use serde::{Deserialize, Serialize};

/// One of the two teams on court.
///
/// The external classifier labels players `1` or `2`; any other label is
/// treated as unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn from_label(label: u8) -> Option<Team> {
        match label {
            1 => Some(Team::One),
            2 => Some(Team::Two),
            _ => None,
        }
    }

    /// Wire code: 1 or 2.
    pub fn code(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        Team::from_label(label).ok_or_else(|| format!("invalid team label {}", label))
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> Self {
        team.code()
    }
}
