use crate::model::{
    calendar::Month,
    date::DateSpan,
    id::RoomId,
    restriction::{event::CalendarEdits, RoomRestriction},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RestrictionRepository: Send + Sync {
    /// True when at least one restriction for the room overlaps the span
    /// under the strict half-open predicate `s1 < e2 AND s2 < e1`.
    async fn has_overlap(&self, room_id: RoomId, span: DateSpan) -> AppResult<bool>;

    /// Every restriction for the room touching any day of the month.
    async fn find_for_room_in_month(
        &self,
        room_id: RoomId,
        month: Month,
    ) -> AppResult<Vec<RoomRestriction>>;

    /// Applies a reconciled set of calendar edits as one unit: deletes the
    /// listed block restrictions and inserts a one-day block restriction per
    /// addition. Deletion must never touch a restriction that belongs to a
    /// reservation, even if its id is listed.
    async fn apply_calendar_edits(&self, edits: CalendarEdits) -> AppResult<()>;
}
