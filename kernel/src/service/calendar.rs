//! The admin block calendar: builds per-room month grids and reconciles
//! the admin's edits back into storage.
//!
//! Reconciliation diffs the submitted form against the block maps that were
//! shown on the previous GET, not against live storage — the edit form only
//! submits changed checkboxes. Two admins editing the same month at once
//! can therefore stomp on each other; the tool assumes a single admin.

use crate::model::{
    calendar::{CalendarEditForm, Month, MonthGrid},
    id::RoomId,
    restriction::event::{AddBlock, CalendarEdits},
};
use crate::repository::{restriction::RestrictionRepository, room::RoomRepository};
use chrono::NaiveDate;
use derive_new::new;
use shared::error::AppResult;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The per-room block maps an admin was shown, keyed by room. Carried in
/// the admin's session between the calendar GET and POST.
pub type BlockMaps = HashMap<RoomId, BTreeMap<NaiveDate, i64>>;

#[derive(new)]
pub struct CalendarService {
    rooms: Arc<dyn RoomRepository>,
    restrictions: Arc<dyn RestrictionRepository>,
}

impl CalendarService {
    /// Builds the occupancy grid for one room and month. Every day of the
    /// month appears in both maps, the final day included, defaulted to 0.
    pub async fn build_month_grid(&self, room_id: RoomId, month: Month) -> AppResult<MonthGrid> {
        let mut grid = MonthGrid::default();
        for day in month.days() {
            grid.reservation_map.insert(day, 0);
            grid.block_map.insert(day, 0);
        }

        let restrictions = self
            .restrictions
            .find_for_room_in_month(room_id, month)
            .await?;

        for restriction in restrictions {
            match restriction.reservation_id {
                Some(reservation_id) => {
                    // mark every occupied night that falls inside the month
                    for day in restriction.span.days() {
                        if let Some(slot) = grid.reservation_map.get_mut(&day) {
                            *slot = reservation_id.raw();
                        }
                    }
                }
                None => {
                    // a manual block is rendered on its start day only
                    if let Some(slot) = grid.block_map.get_mut(&restriction.span.start()) {
                        *slot = restriction.id.raw();
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Grids for every room, in room-name order, paired with the block maps
    /// the caller must stash in the session for the later POST.
    pub async fn build_all_month_grids(
        &self,
        month: Month,
    ) -> AppResult<(Vec<(RoomId, String, MonthGrid)>, BlockMaps)> {
        let mut grids = Vec::new();
        let mut block_maps = BlockMaps::new();
        for room in self.rooms.find_all().await? {
            let grid = self.build_month_grid(room.id, month).await?;
            block_maps.insert(room.id, grid.block_map.clone());
            grids.push((room.id, room.room_name, grid));
        }
        Ok((grids, block_maps))
    }

    /// Pure diff of an edit form against the previously shown block maps.
    ///
    /// Removal pass: a block that was shown (non-zero map entry) and has no
    /// keep marker in the form is deleted by its stored restriction id.
    /// Addition pass: every add field becomes a one-day block insert, with
    /// no duplicate check — submitting the same add field twice yields two
    /// rows.
    pub fn diff_edits(previous: &BlockMaps, form: &CalendarEditForm) -> CalendarEdits {
        let mut edits = CalendarEdits::default();

        for (room_id, block_map) in previous {
            for (day, restriction_id) in block_map {
                if *restriction_id == 0 {
                    continue;
                }
                if !form.keeps.contains(&(*room_id, *day)) {
                    edits.removals.push((*restriction_id).into());
                }
            }
        }

        for (room_id, day) in &form.adds {
            edits.additions.push(AddBlock::new(*room_id, *day));
        }

        edits
    }

    /// Applies the diff through the store as one unit.
    pub async fn reconcile_edits(
        &self,
        previous: &BlockMaps,
        form: &CalendarEditForm,
    ) -> AppResult<()> {
        let edits = Self::diff_edits(previous, form);
        if edits.is_empty() {
            return Ok(());
        }
        self.restrictions.apply_calendar_edits(edits).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        date::DateSpan,
        reservation::event::CreateReservation,
        restriction::RestrictionKind,
    };
    use crate::repository::{memory::MemoryStore, reservation::ReservationRepository};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn span(start: &str, end: &str) -> DateSpan {
        DateSpan::new(date(start), date(end)).unwrap()
    }

    fn service(store: &Arc<MemoryStore>) -> CalendarService {
        CalendarService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn grid_covers_every_day_of_the_month_including_the_last() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let grid = service(&store)
            .build_month_grid(room, Month::new(2024, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(grid.reservation_map.len(), 31);
        assert_eq!(grid.block_map.len(), 31);
        assert_eq!(grid.reservation_map.get(&date("2024-01-31")), Some(&0));
    }

    #[tokio::test]
    async fn reservation_marks_each_night_and_block_marks_start_day_only() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let reservation_id = store
            .create(CreateReservation::new(
                "John".into(),
                "Smith".into(),
                "john@here.com".into(),
                "555-555-5555".into(),
                room,
                span("2024-01-10", "2024-01-13"),
            ))
            .await
            .unwrap();
        let block_id = store.add_block(room, span("2024-01-20", "2024-01-22"));

        let grid = service(&store)
            .build_month_grid(room, Month::new(2024, 1).unwrap())
            .await
            .unwrap();

        for day in ["2024-01-10", "2024-01-11", "2024-01-12"] {
            assert_eq!(
                grid.reservation_map.get(&date(day)),
                Some(&reservation_id.raw()),
                "night {day} should be marked"
            );
        }
        // checkout day is free again
        assert_eq!(grid.reservation_map.get(&date("2024-01-13")), Some(&0));

        assert_eq!(grid.block_map.get(&date("2024-01-20")), Some(&block_id.raw()));
        assert_eq!(grid.block_map.get(&date("2024-01-21")), Some(&0));
    }

    #[tokio::test]
    async fn reservation_spanning_month_boundary_is_clamped_to_the_month() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        store
            .create(CreateReservation::new(
                "Jane".into(),
                "Smith".into(),
                "jane@here.com".into(),
                "555-555-5556".into(),
                room,
                span("2024-01-30", "2024-02-02"),
            ))
            .await
            .unwrap();

        let january = service(&store)
            .build_month_grid(room, Month::new(2024, 1).unwrap())
            .await
            .unwrap();
        assert_ne!(january.reservation_map.get(&date("2024-01-31")), Some(&0));

        let february = service(&store)
            .build_month_grid(room, Month::new(2024, 2).unwrap())
            .await
            .unwrap();
        assert_ne!(february.reservation_map.get(&date("2024-02-01")), Some(&0));
        assert_eq!(february.reservation_map.get(&date("2024-02-02")), Some(&0));
    }

    #[tokio::test]
    async fn unkept_blocks_are_removed_and_added_days_inserted() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let kept = store.add_block(room, span("2024-03-05", "2024-03-06"));
        let dropped = store.add_block(room, span("2024-03-10", "2024-03-11"));

        let svc = service(&store);
        let (_, block_maps) = svc
            .build_all_month_grids(Month::new(2024, 3).unwrap())
            .await
            .unwrap();

        let form = CalendarEditForm::parse(
            [
                format!("keep_block_{room}_2024-03-05").as_str(),
                format!("add_block_{room}_2024-03-15").as_str(),
            ]
            .into_iter(),
        )
        .unwrap();

        svc.reconcile_edits(&block_maps, &form).await.unwrap();

        let restrictions = store.restrictions_for_room(room);
        assert!(restrictions.iter().any(|r| r.id == kept));
        assert!(!restrictions.iter().any(|r| r.id == dropped));
        let added: Vec<_> = restrictions
            .iter()
            .filter(|r| r.span.start() == date("2024-03-15"))
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].kind, RestrictionKind::Block);
        assert_eq!(added[0].span.end(), date("2024-03-16"));
    }

    #[tokio::test]
    async fn addition_pass_is_not_idempotent() {
        // the same add field submitted twice inserts two redundant rows;
        // nothing deduplicates additions
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        let svc = service(&store);

        let field = format!("add_block_{room}_2024-04-02");
        let form =
            CalendarEditForm::parse([field.as_str(), field.as_str()].into_iter()).unwrap();
        svc.reconcile_edits(&BlockMaps::new(), &form).await.unwrap();

        let rows = store.restrictions_for_room(room);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.span.start() == date("2024-04-02")));
    }

    #[tokio::test]
    async fn removal_pass_never_deletes_a_reservation_restriction() {
        let store = Arc::new(MemoryStore::new());
        let room = store.add_room("Generals Quarters");
        store
            .create(CreateReservation::new(
                "John".into(),
                "Smith".into(),
                "john@here.com".into(),
                "555-555-5555".into(),
                room,
                span("2024-05-05", "2024-05-06"),
            ))
            .await
            .unwrap();
        let restriction = &store.restrictions_for_room(room)[0];

        // a forged block map pointing at the reservation's restriction id
        let mut forged = BlockMaps::new();
        let mut map = BTreeMap::new();
        map.insert(date("2024-05-05"), restriction.id.raw());
        forged.insert(room, map);

        service(&store)
            .reconcile_edits(&forged, &CalendarEditForm::default())
            .await
            .unwrap();

        let survivors = store.restrictions_for_room(room);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].kind, RestrictionKind::Reservation);
    }

    #[tokio::test]
    async fn diff_ignores_zero_entries_and_keeps_marked_blocks() {
        let mut previous = BlockMaps::new();
        let mut map = BTreeMap::new();
        map.insert(date("2024-06-01"), 0);
        map.insert(date("2024-06-02"), 77);
        previous.insert(RoomId::new(1), map);

        let form = CalendarEditForm::parse(["keep_block_1_2024-06-02"].into_iter()).unwrap();
        let edits = CalendarService::diff_edits(&previous, &form);
        assert!(edits.is_empty());
    }
}
