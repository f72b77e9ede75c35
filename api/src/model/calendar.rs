use chrono::{Datelike, NaiveDate, Utc};
use kernel::model::{calendar::MonthGrid, id::RoomId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `?y=2024&m=7`; defaults to the current month when absent.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub y: Option<i32>,
    pub m: Option<u32>,
}

impl CalendarQuery {
    pub fn year_month(&self) -> (i32, u32) {
        let today = Utc::now().date_naive();
        (
            self.y.unwrap_or_else(|| today.year()),
            self.m.unwrap_or_else(|| today.month()),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub rooms: Vec<RoomCalendarResponse>,
}

#[derive(Debug, Serialize)]
pub struct RoomCalendarResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub reservation_map: BTreeMap<NaiveDate, i64>,
    pub block_map: BTreeMap<NaiveDate, i64>,
}

impl RoomCalendarResponse {
    pub fn new(room_id: RoomId, room_name: String, grid: MonthGrid) -> Self {
        Self {
            room_id,
            room_name,
            reservation_map: grid.reservation_map,
            block_map: grid.block_map,
        }
    }
}
