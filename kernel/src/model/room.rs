use crate::model::id::RoomId;
use chrono::{DateTime, Utc};

/// Immutable reference data seeded by admin tooling; the application only
/// ever reads rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub room_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
