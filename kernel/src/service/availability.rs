//! Answers "is room R free for [start, end)?" and "which rooms are free?".
//!
//! The overlap convention is strict half-open: two spans `[s1, e1)` and
//! `[s2, e2)` conflict iff `s1 < e2 && s2 < e1`. A restriction ending
//! exactly on the requested start date, or starting exactly on the
//! requested end date, is not a conflict — checkout and checkin may share
//! a day. `start >= end` is unrepresentable because `DateSpan::new`
//! rejects it before any query runs.

use crate::model::{date::DateSpan, id::RoomId, room::Room};
use crate::repository::{restriction::RestrictionRepository, room::RoomRepository};
use derive_new::new;
use shared::error::AppResult;
use std::sync::Arc;

#[derive(new)]
pub struct AvailabilityEngine {
    rooms: Arc<dyn RoomRepository>,
    restrictions: Arc<dyn RestrictionRepository>,
}

impl AvailabilityEngine {
    /// True iff no restriction for the room overlaps the requested span.
    /// A room with zero restrictions is trivially available.
    pub async fn is_room_available(&self, room_id: RoomId, span: DateSpan) -> AppResult<bool> {
        let conflict = self.restrictions.has_overlap(room_id, span).await?;
        Ok(!conflict)
    }

    /// Rooms with zero overlapping restrictions, ordered by room name.
    /// Returns an empty vec, not an error, when nothing is free.
    pub async fn search_available_rooms(&self, span: DateSpan) -> AppResult<Vec<Room>> {
        self.rooms.find_available(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reservation::event::CreateReservation;
    use crate::repository::{memory::MemoryStore, reservation::ReservationRepository};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn span(start: &str, end: &str) -> DateSpan {
        DateSpan::new(date(start), date(end)).unwrap()
    }

    fn engine(store: &Arc<MemoryStore>) -> AvailabilityEngine {
        AvailabilityEngine::new(store.clone(), store.clone())
    }

    fn reservation(room_id: RoomId, s: DateSpan) -> CreateReservation {
        CreateReservation::new(
            "John".into(),
            "Smith".into(),
            "john@here.com".into(),
            "555-555-5555".into(),
            room_id,
            s,
        )
    }

    #[tokio::test]
    async fn room_with_no_restrictions_is_available() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let engine = engine(&store);

        assert!(engine
            .is_room_available(room, span("2050-01-01", "2050-01-02"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reservation_blocks_the_room_for_overlapping_spans() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let engine = engine(&store);

        store
            .create(reservation(room, span("2024-01-01", "2024-01-03")))
            .await
            .unwrap();

        // read-your-writes: the very same span is no longer free
        assert!(!engine
            .is_room_available(room, span("2024-01-01", "2024-01-03"))
            .await
            .unwrap());
        // partial overlap conflicts
        assert!(!engine
            .is_room_available(room, span("2024-01-02", "2024-01-05"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn back_to_back_checkout_and_checkin_do_not_conflict() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let engine = engine(&store);

        store
            .create(reservation(room, span("2024-01-01", "2024-01-03")))
            .await
            .unwrap();

        // checkin on the checkout day
        assert!(engine
            .is_room_available(room, span("2024-01-03", "2024-01-05"))
            .await
            .unwrap());
        // checkout on the checkin day
        assert!(engine
            .is_room_available(room, span("2023-12-30", "2024-01-01"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn search_returns_only_free_rooms_ordered_by_name() {
        let store = Arc::new(MemoryStore::new());
        let majors = store.add_room("Majors Suite");
        let generals = store.add_room("Generals Quarters");
        let engine = engine(&store);

        store
            .create(reservation(majors, span("2024-06-10", "2024-06-12")))
            .await
            .unwrap();

        let free = engine
            .search_available_rooms(span("2024-06-11", "2024-06-13"))
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, generals);

        // nothing free is an empty answer, not an error
        store
            .create(reservation(generals, span("2024-06-11", "2024-06-13")))
            .await
            .unwrap();
        let free = engine
            .search_available_rooms(span("2024-06-11", "2024-06-13"))
            .await
            .unwrap();
        assert!(free.is_empty());
    }

    #[tokio::test]
    async fn search_agrees_with_per_room_availability() {
        let store = Arc::new(MemoryStore::new());
        let rooms = vec![
            store.add_room("Generals Quarters"),
            store.add_room("Majors Suite"),
            store.add_room("Turret Room"),
        ];
        let engine = engine(&store);

        store
            .create(reservation(rooms[0], span("2024-03-01", "2024-03-04")))
            .await
            .unwrap();
        store.add_block(rooms[2], span("2024-03-02", "2024-03-03"));

        let query = span("2024-03-02", "2024-03-05");
        let found = engine.search_available_rooms(query).await.unwrap();

        for room in &rooms {
            let available = engine.is_room_available(*room, query).await.unwrap();
            assert_eq!(
                available,
                found.iter().any(|r| r.id == *room),
                "search result disagrees with is_room_available for room {room}",
            );
        }
    }
}
