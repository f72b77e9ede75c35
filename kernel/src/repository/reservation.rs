use crate::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists the reservation and its owning room restriction together;
    /// either both rows exist afterwards or neither does.
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;

    /// All reservations, earliest stay first.
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;

    /// Reservations not yet marked processed, earliest stay first.
    async fn find_new(&self) -> AppResult<Vec<Reservation>>;

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;

    async fn update(&self, event: UpdateReservation) -> AppResult<()>;

    /// New -> Processed. Terminal; there is no reverse transition.
    async fn mark_processed(&self, reservation_id: ReservationId) -> AppResult<()>;

    /// Deletes the reservation and its owning restriction.
    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()>;
}
