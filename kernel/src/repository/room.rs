use crate::model::{date::DateSpan, id::RoomId, room::Room};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms ordered by room name.
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    /// Rooms with no restriction overlapping the span, ordered by room name.
    /// An empty result is a valid answer, not an error.
    async fn find_available(&self, span: DateSpan) -> AppResult<Vec<Room>>;
}
