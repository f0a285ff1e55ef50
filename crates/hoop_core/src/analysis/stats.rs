//! Running event counts and the end-of-sequence summary.

use serde::{Deserialize, Serialize};

use super::ball_control::BallControlStats;
use crate::models::{FrameEvent, Team, TacticalFrame};

/// Passes and interceptions per team, counted up to some frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTally {
    pub team_one_passes: u32,
    pub team_two_passes: u32,
    pub team_one_interceptions: u32,
    pub team_two_interceptions: u32,
}

impl EventTally {
    pub fn record(&mut self, event: FrameEvent) {
        match event {
            FrameEvent::None => {}
            FrameEvent::Pass(Team::One) => self.team_one_passes += 1,
            FrameEvent::Pass(Team::Two) => self.team_two_passes += 1,
            FrameEvent::Interception(Team::One) => self.team_one_interceptions += 1,
            FrameEvent::Interception(Team::Two) => self.team_two_interceptions += 1,
        }
    }

    /// Tally after each frame.
    pub fn cumulative(events: &[FrameEvent]) -> Vec<EventTally> {
        events
            .iter()
            .scan(EventTally::default(), |tally, event| {
                tally.record(*event);
                Some(*tally)
            })
            .collect()
    }

    pub fn total(events: &[FrameEvent]) -> EventTally {
        let mut tally = EventTally::default();
        for event in events {
            tally.record(*event);
        }
        tally
    }

    pub fn passes(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team_one_passes,
            Team::Two => self.team_two_passes,
        }
    }

    pub fn interceptions(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team_one_interceptions,
            Team::Two => self.team_two_interceptions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub frame_count: usize,
    pub events: EventTally,
    pub ball_control: BallControlStats,
    /// Frames with at least one projected player.
    pub projected_frames: usize,
}

impl MatchSummary {
    pub fn new(
        events: &[FrameEvent],
        ball_control: &[BallControlStats],
        tactical_positions: &[TacticalFrame],
    ) -> Self {
        Self {
            frame_count: events.len(),
            events: EventTally::total(events),
            ball_control: ball_control.last().copied().unwrap_or_default(),
            projected_frames: tactical_positions.iter().filter(|f| !f.is_empty()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_tally() {
        let events = [
            FrameEvent::None,
            FrameEvent::Pass(Team::One),
            FrameEvent::Interception(Team::Two),
            FrameEvent::Pass(Team::Two),
            FrameEvent::Pass(Team::Two),
        ];
        let tallies = EventTally::cumulative(&events);
        assert_eq!(tallies.len(), 5);
        assert_eq!(tallies[0], EventTally::default());
        assert_eq!(tallies[1].passes(Team::One), 1);
        assert_eq!(tallies[2].interceptions(Team::Two), 1);
        assert_eq!(tallies[4].passes(Team::Two), 2);
        assert_eq!(tallies[4], EventTally::total(&events));
    }

    #[test]
    fn test_summary() {
        let events = [FrameEvent::None, FrameEvent::Pass(Team::One)];
        let control = BallControlStats::cumulative(&[Some(Team::One), Some(Team::One)]);
        let mut projected = TacticalFrame::new();
        projected.insert(4, (10.0, 10.0));
        let tactical = vec![TacticalFrame::new(), projected];

        let summary = MatchSummary::new(&events, &control, &tactical);
        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.events.team_one_passes, 1);
        assert_eq!(summary.ball_control.team_one_pct, 100.0);
        assert_eq!(summary.projected_frames, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MatchSummary::new(&[], &[], &[]);
        assert_eq!(summary, MatchSummary::default());
    }
}
