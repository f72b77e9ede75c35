use crate::model::{
    date::DateSpan,
    id::{ReservationId, RoomId},
};
use derive_new::new;

/// A fully validated reservation ready to persist. Creating it also creates
/// the owning room restriction in the same transaction.
#[derive(Debug, Clone, new)]
pub struct CreateReservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub room_id: RoomId,
    pub span: DateSpan,
}

/// Admin edit of a reservation's guest fields. Dates and room are fixed
/// once the reservation exists.
#[derive(Debug, Clone, new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}
