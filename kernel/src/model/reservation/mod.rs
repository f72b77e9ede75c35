pub mod event;

use crate::model::{
    date::DateSpan,
    id::{ReservationId, RoomId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub span: DateSpan,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room: ReservationRoom,
}

/// The slice of room data joined into reservation listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRoom {
    pub room_id: RoomId,
    pub room_name: String,
}

/// The in-progress reservation a visitor builds up across the search,
/// choose-room and guest-details steps. Lives in the session until the
/// summary page consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub span: DateSpan,
    pub room_id: Option<RoomId>,
    pub room_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ReservationDraft {
    pub fn from_span(span: DateSpan) -> Self {
        Self {
            span,
            room_id: None,
            room_name: None,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        }
    }
}
