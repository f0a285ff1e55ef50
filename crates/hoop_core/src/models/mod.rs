pub mod events;
pub mod team;
pub mod track;

pub use events::{FrameEvent, Possession, NO_HOLDER_CODE};
pub use team::Team;
pub use track::{
    detected_indices, is_detected, BallTrackFrame, BoundingBox, KeypointFrame, PlayerTrackFrame,
    Point2, TacticalFrame, TeamAssignmentFrame, TrackId,
};
