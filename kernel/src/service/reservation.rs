//! Turns a validated reservation request into durable state plus two
//! notifications (guest confirmation and owner notice).

use crate::model::{id::ReservationId, mail::MailData, reservation::event::CreateReservation};
use crate::repository::{mail::MailQueue, reservation::ReservationRepository};
use derive_new::new;
use shared::error::AppResult;
use std::sync::Arc;

#[derive(new)]
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    mail: Arc<dyn MailQueue>,
    owner_address: String,
}

impl ReservationService {
    /// Persists the reservation (and its restriction, atomically) and then
    /// enqueues the two notification mails. A failed enqueue is logged and
    /// swallowed: mail trouble must never roll back or fail a reservation.
    pub async fn place(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let guest_email = event.email.clone();
        let guest_name = format!("{} {}", event.first_name, event.last_name);
        let span = event.span;

        let reservation_id = self.reservations.create(event).await?;

        let guest_mail = MailData::new(
            guest_email.clone(),
            self.owner_address.clone(),
            "Reservation Confirmation".into(),
            format!(
                "Dear {guest_name}, <br>This is to confirm your reservation from {} to {}.",
                span.start(),
                span.end()
            ),
            Some("basic.html".into()),
        );
        let owner_mail = MailData::new(
            self.owner_address.clone(),
            guest_email,
            "New Reservation".into(),
            format!(
                "A reservation has been made by {guest_name} from {} to {}.",
                span.start(),
                span.end()
            ),
            None,
        );

        for mail in [guest_mail, owner_mail] {
            if let Err(e) = self.mail.enqueue(mail) {
                tracing::error!(
                    error.message = %e,
                    reservation_id = %reservation_id,
                    "failed to enqueue notification mail"
                );
            }
        }

        Ok(reservation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::DateSpan;
    use crate::repository::memory::{MemoryStore, RecordingMailQueue};

    fn event(store: &MemoryStore) -> CreateReservation {
        let room = store.add_room("Generals Quarters");
        CreateReservation::new(
            "John".into(),
            "Smith".into(),
            "john@here.com".into(),
            "555-555-5555".into(),
            room,
            DateSpan::new(
                "2050-01-01".parse().unwrap(),
                "2050-01-02".parse().unwrap(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn placing_a_reservation_writes_both_rows_and_sends_two_mails() {
        let store = Arc::new(MemoryStore::new());
        let mail = Arc::new(RecordingMailQueue::new());
        let svc = ReservationService::new(store.clone(), mail.clone(), "owner@here.com".into());

        let event = event(&store);
        let room_id = event.room_id;
        let id = svc.place(event).await.unwrap();

        let reservation = store.find_by_id(id).await.unwrap();
        assert_eq!(reservation.first_name, "John");
        assert!(!reservation.processed);

        let restrictions = store.restrictions_for_room(room_id);
        assert_eq!(restrictions.len(), 1);
        assert_eq!(restrictions[0].reservation_id, Some(id));

        let sent = mail.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "john@here.com");
        assert_eq!(sent[1].to, "owner@here.com");
    }

    #[tokio::test]
    async fn persistence_failure_sends_no_mail() {
        let store = Arc::new(MemoryStore::new());
        let mail = Arc::new(RecordingMailQueue::new());
        let svc = ReservationService::new(store.clone(), mail.clone(), "owner@here.com".into());

        let mut event = event(&store);
        event.room_id = crate::model::id::RoomId::new(9999);
        assert!(svc.place(event).await.is_err());
        assert!(mail.sent().is_empty());
    }
}
