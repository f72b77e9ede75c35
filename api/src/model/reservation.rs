use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId},
    reservation::Reservation,
};
use serde::{Deserialize, Serialize};

/// Guest details submitted on the make-reservation form. Mirrors the
/// public form's validation rules: all fields required, a three-character
/// minimum on the first name, and a well-formed email.
#[derive(Debug, Deserialize, Validate)]
pub struct GuestDetailsForm {
    #[garde(length(min = 3))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub phone: String,
}

/// Admin edit of a reservation's guest fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReservationForm {
    #[garde(length(min = 3))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub processed: bool,
    pub room_id: RoomId,
    pub room_name: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            start_date: value.span.start(),
            end_date: value.span.end(),
            processed: value.processed,
            room_id: value.room.room_id,
            room_name: value.room.room_name,
        }
    }
}
