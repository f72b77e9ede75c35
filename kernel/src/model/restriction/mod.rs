pub mod event;

use crate::model::{
    date::DateSpan,
    id::{ReservationId, RestrictionId, RoomId},
};

/// Why a restriction exists. Stored as a small integer tag in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionKind {
    Reservation,
    Block,
}

impl RestrictionKind {
    pub fn as_tag(&self) -> i16 {
        match self {
            RestrictionKind::Reservation => 1,
            RestrictionKind::Block => 2,
        }
    }

    pub fn from_tag(tag: i16) -> Option<Self> {
        match tag {
            1 => Some(RestrictionKind::Reservation),
            2 => Some(RestrictionKind::Block),
            _ => None,
        }
    }
}

/// A date range during which a room cannot be booked.
///
/// `reservation_id` is present exactly when `kind` is `Reservation`; a
/// manual admin block carries no reservation reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRestriction {
    pub id: RestrictionId,
    pub room_id: RoomId,
    pub reservation_id: Option<ReservationId>,
    pub kind: RestrictionKind,
    pub span: DateSpan,
}

impl RoomRestriction {
    pub fn is_block(&self) -> bool {
        self.reservation_id.is_none()
    }
}
