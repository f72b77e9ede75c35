use crate::model::id::{RestrictionId, RoomId};
use chrono::NaiveDate;
use derive_new::new;

/// A single-day manual block requested through the admin calendar.
/// The stored restriction spans `[date, date + 1 day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct AddBlock {
    pub room_id: RoomId,
    pub date: NaiveDate,
}

/// The outcome of diffing an admin's calendar edit against the block map
/// that was shown to them. Applied to storage as one unit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CalendarEdits {
    pub removals: Vec<RestrictionId>,
    pub additions: Vec<AddBlock>,
}

impl CalendarEdits {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty()
    }
}
