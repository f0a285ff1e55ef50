//! Team ball control: which team holds the ball in each frame, and the
//! running share of frames per team.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_frame_count, Result};
use crate::models::{Possession, Team, TeamAssignmentFrame};

/// Wire code for frames where no team controls the ball.
pub const NO_CONTROL_CODE: i8 = -1;

/// Holder's team per frame; `None` without a holder or a resolvable team.
///
/// Unlike the pass classifier, control is not carried over gaps.
pub fn team_ball_control(
    possession: &[Possession],
    team_assignments: &[TeamAssignmentFrame],
) -> Result<Vec<Option<Team>>> {
    ensure_frame_count("team_assignments", possession.len(), team_assignments.len())?;

    Ok(possession
        .iter()
        .zip(team_assignments)
        .map(|(p, teams)| {
            p.holder()
                .and_then(|id| teams.get(&id).copied())
                .and_then(Team::from_label)
        })
        .collect())
}

/// Integer form `-1 / 1 / 2`.
pub fn control_codes(control: &[Option<Team>]) -> Vec<i8> {
    control
        .iter()
        .map(|team| team.map_or(NO_CONTROL_CODE, |t| t.code() as i8))
        .collect()
}

/// Running control percentages after one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BallControlStats {
    pub team_one_pct: f64,
    pub team_two_pct: f64,
}

impl BallControlStats {
    /// One entry per frame. The denominator counts every frame so far,
    /// including frames nobody controlled, so the two shares may sum below 100.
    pub fn cumulative(control: &[Option<Team>]) -> Vec<BallControlStats> {
        let mut one = 0usize;
        let mut two = 0usize;
        control
            .iter()
            .enumerate()
            .map(|(idx, team)| {
                match team {
                    Some(Team::One) => one += 1,
                    Some(Team::Two) => two += 1,
                    None => {}
                }
                let frames = (idx + 1) as f64;
                BallControlStats {
                    team_one_pct: 100.0 * one as f64 / frames,
                    team_two_pct: 100.0 * two as f64 / frames,
                }
            })
            .collect()
    }

    pub fn share(&self, team: Team) -> f64 {
        match team {
            Team::One => self.team_one_pct,
            Team::Two => self.team_two_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use Possession::{HeldBy, NoHolder};

    fn assignments(n: usize) -> Vec<TeamAssignmentFrame> {
        let frame: TeamAssignmentFrame = [(1, 1), (2, 2), (3, 0)].into_iter().collect();
        vec![frame; n]
    }

    #[test]
    fn test_control_follows_holder_team() {
        let possession = [HeldBy(1), NoHolder, HeldBy(2), HeldBy(3), HeldBy(7)];
        let control = team_ball_control(&possession, &assignments(5)).unwrap();
        assert_eq!(control, vec![Some(Team::One), None, Some(Team::Two), None, None]);
        assert_eq!(control_codes(&control), vec![1, -1, 2, -1, -1]);
    }

    #[test]
    fn test_cumulative_percentages() {
        let control = [Some(Team::One), None, Some(Team::Two), Some(Team::One)];
        let stats = BallControlStats::cumulative(&control);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0], BallControlStats { team_one_pct: 100.0, team_two_pct: 0.0 });
        assert_eq!(stats[1].team_one_pct, 50.0);
        assert!((stats[2].team_two_pct - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats[3], BallControlStats { team_one_pct: 50.0, team_two_pct: 25.0 });
        assert_eq!(stats[3].share(Team::Two), 25.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(team_ball_control(&[], &[]).unwrap().is_empty());
        assert!(BallControlStats::cumulative(&[]).is_empty());
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let result = team_ball_control(&[NoHolder], &assignments(2));
        assert!(matches!(result, Err(AnalysisError::LengthMismatch { .. })));
    }
}
