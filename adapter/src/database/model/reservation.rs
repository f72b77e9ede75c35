use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    date::DateSpan,
    id::{ReservationId, RoomId},
    reservation::{Reservation, ReservationRoom},
};
use shared::error::{AppError, AppResult};

/// Reservation joined with its room's name, as rendered in admin listings.
#[derive(Debug, sqlx::FromRow)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room_id: RoomId,
    pub room_name: String,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> AppResult<Self> {
        let ReservationRow {
            id,
            first_name,
            last_name,
            email,
            phone,
            start_date,
            end_date,
            processed,
            created_at,
            updated_at,
            room_id,
            room_name,
        } = value;
        Ok(Reservation {
            id,
            first_name,
            last_name,
            email,
            phone,
            span: DateSpan::new(start_date, end_date)?,
            processed,
            created_at,
            updated_at,
            room: ReservationRoom { room_id, room_name },
        })
    }
}
