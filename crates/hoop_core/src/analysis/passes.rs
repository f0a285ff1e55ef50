//! # Pass / Interception Classifier
//!
//! Turns the possession timeline into discrete transfer events.
//!
//! ## Algorithm
//! Left-to-right fold over frames carrying the last resolved holder:
//! 1. No holder, or the holder's team is unknown -> skip (state kept)
//! 2. No previous holder -> remember this one, no event
//! 3. Same holder -> nothing
//! 4. New holder, same team -> `Pass(team)`; other team -> `Interception(team)`
//!
//! Frames are strictly sequential here; never split this fold across threads.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_frame_count, Result};
use crate::models::{FrameEvent, Possession, Team, TeamAssignmentFrame, TrackId};

/// Holder memory threaded through the fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HolderState {
    pub last_holder: Option<(TrackId, Team)>,
}

impl HolderState {
    /// Advance by one frame, returning the next state and this frame's event.
    pub fn step(self, possession: Possession, teams: &TeamAssignmentFrame) -> (HolderState, FrameEvent) {
        let Some(holder) = possession.holder() else {
            return (self, FrameEvent::None);
        };
        let Some(team) = teams.get(&holder).copied().and_then(Team::from_label) else {
            return (self, FrameEvent::None);
        };

        let next = HolderState {
            last_holder: Some((holder, team)),
        };
        match self.last_holder {
            None => (next, FrameEvent::None),
            Some((last_id, _)) if last_id == holder => (self, FrameEvent::None),
            Some((_, last_team)) if last_team == team => (next, FrameEvent::Pass(team)),
            Some(_) => (next, FrameEvent::Interception(team)),
        }
    }
}

/// Per-frame events, aligned with the input frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTimeline {
    pub events: Vec<FrameEvent>,
}

impl EventTimeline {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pass codes per frame (0, 1, 2).
    pub fn passes(&self) -> Vec<u8> {
        self.events.iter().map(|e| e.pass_code()).collect()
    }

    /// Interception codes per frame (0, 1, 2).
    pub fn interceptions(&self) -> Vec<u8> {
        self.events.iter().map(|e| e.interception_code()).collect()
    }

    /// `(frame, event)` for every frame that has one.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, FrameEvent)> + '_ {
        self.events
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, e)| !e.is_none())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassInterceptionClassifier;

impl PassInterceptionClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(
        &self,
        possession: &[Possession],
        team_assignments: &[TeamAssignmentFrame],
    ) -> Result<EventTimeline> {
        ensure_frame_count("team_assignments", possession.len(), team_assignments.len())?;

        let events = possession
            .iter()
            .zip(team_assignments)
            .scan(HolderState::default(), |state, (p, teams)| {
                let (next, event) = state.step(*p, teams);
                *state = next;
                Some(event)
            })
            .collect();

        Ok(EventTimeline { events })
    }
}
