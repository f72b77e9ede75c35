use chrono::NaiveDate;
use kernel::model::{date::DateSpan, id::RoomId};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

/// The HTML availability search form. Dates arrive as `YYYY-MM-DD` text
/// and are parsed explicitly so a bad value becomes a flash-and-redirect,
/// not a rejected request.
#[derive(Debug, Deserialize)]
pub struct AvailabilityForm {
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityForm {
    pub fn parse_span(&self) -> AppResult<DateSpan> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        DateSpan::new(start, end)
    }
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|_| AppError::UnprocessableEntity(format!("invalid date {raw}")))
}

/// The JSON variant used by the per-room availability widget.
#[derive(Debug, Deserialize)]
pub struct AvailabilityJsonForm {
    pub start_date: String,
    pub end_date: String,
    pub room_id: String,
}

/// Wire shape of the JSON search response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityJsonResponse {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityJsonResponse {
    pub fn failure(message: &str) -> Self {
        Self {
            ok: false,
            message: message.into(),
            room_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

/// Query parameters of the room-page "book now" link: `/book-room?id&s&e`.
#[derive(Debug, Deserialize)]
pub struct BookRoomQuery {
    pub id: RoomId,
    pub s: String,
    pub e: String,
}

impl BookRoomQuery {
    pub fn parse_span(&self) -> AppResult<DateSpan> {
        DateSpan::new(parse_date(&self.s)?, parse_date(&self.e)?)
    }
}
