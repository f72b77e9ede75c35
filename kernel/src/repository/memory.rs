//! In-memory variant of the persistence contract.
//!
//! The production store is Postgres-backed (see the adapter crate); this
//! variant backs unit tests and keeps the whole data-access surface
//! exercisable without a database. Both sides implement the same traits.

use crate::model::{
    calendar::Month,
    date::DateSpan,
    id::{ReservationId, RestrictionId, RoomId, UserId},
    mail::MailData,
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation, ReservationRoom,
    },
    restriction::{event::CalendarEdits, RestrictionKind, RoomRestriction},
    room::Room,
    user::User,
};
use crate::repository::{
    health::HealthCheckRepository, mail::MailQueue, reservation::ReservationRepository,
    restriction::RestrictionRepository, room::RoomRepository, session::SessionRepository,
    user::UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Mutex,
};

#[derive(Debug, Clone)]
struct ReservationRecord {
    id: ReservationId,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    room_id: RoomId,
    span: DateSpan,
    processed: bool,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Default)]
pub struct MemoryStore {
    rooms: DashMap<RoomId, Room>,
    restrictions: DashMap<RestrictionId, RoomRestriction>,
    reservations: DashMap<ReservationId, ReservationRecord>,
    users: DashMap<UserId, UserRecord>,
    sessions: DashMap<String, HashMap<String, Value>>,
    seq: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn add_room(&self, room_name: &str) -> RoomId {
        let id = RoomId::new(self.next_id());
        let now = Utc::now();
        self.rooms.insert(
            id,
            Room {
                id,
                room_name: room_name.into(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn add_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let id = UserId::new(self.next_id());
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        self.users.insert(
            id,
            UserRecord {
                user: User {
                    id,
                    first_name: "Admin".into(),
                    last_name: "User".into(),
                    email: email.into(),
                    access_level: 1,
                },
                password_hash,
            },
        );
        Ok(id)
    }

    /// Seeds a manual block directly, bypassing the calendar flow.
    pub fn add_block(&self, room_id: RoomId, span: DateSpan) -> RestrictionId {
        let id = RestrictionId::new(self.next_id());
        self.restrictions.insert(
            id,
            RoomRestriction {
                id,
                room_id,
                reservation_id: None,
                kind: RestrictionKind::Block,
                span,
            },
        );
        id
    }

    pub fn restrictions_for_room(&self, room_id: RoomId) -> Vec<RoomRestriction> {
        let mut out: Vec<_> = self
            .restrictions
            .iter()
            .filter(|r| r.room_id == room_id)
            .map(|r| r.clone())
            .collect();
        out.sort_by_key(|r| (r.span.start(), r.id));
        out
    }

    fn room_name(&self, room_id: RoomId) -> AppResult<String> {
        self.rooms
            .get(&room_id)
            .map(|r| r.room_name.clone())
            .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))
    }

    fn to_reservation(&self, record: &ReservationRecord) -> AppResult<Reservation> {
        Ok(Reservation {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            span: record.span,
            processed: record.processed,
            created_at: record.created_at,
            updated_at: record.updated_at,
            room: ReservationRoom {
                room_id: record.room_id,
                room_name: self.room_name(record.room_id)?,
            },
        })
    }

    fn collect_reservations(
        &self,
        mut filter: impl FnMut(&ReservationRecord) -> bool,
    ) -> AppResult<Vec<Reservation>> {
        let mut records: Vec<_> = self
            .reservations
            .iter()
            .filter(|r| filter(&r))
            .map(|r| r.clone())
            .collect();
        records.sort_by_key(|r| (r.span.start(), r.id));
        records.iter().map(|r| self.to_reservation(r)).collect()
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let mut rooms: Vec<_> = self.rooms.iter().map(|r| r.clone()).collect();
        rooms.sort_by(|a, b| a.room_name.cmp(&b.room_name));
        Ok(rooms)
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.rooms.get(&room_id).map(|r| r.clone()))
    }

    async fn find_available(&self, span: DateSpan) -> AppResult<Vec<Room>> {
        let mut rooms = Vec::new();
        for room in self.rooms.iter() {
            let blocked = self
                .restrictions
                .iter()
                .any(|r| r.room_id == room.id && r.span.overlaps(&span));
            if !blocked {
                rooms.push(room.clone());
            }
        }
        rooms.sort_by(|a, b| a.room_name.cmp(&b.room_name));
        Ok(rooms)
    }
}

#[async_trait]
impl RestrictionRepository for MemoryStore {
    async fn has_overlap(&self, room_id: RoomId, span: DateSpan) -> AppResult<bool> {
        Ok(self
            .restrictions
            .iter()
            .any(|r| r.room_id == room_id && r.span.overlaps(&span)))
    }

    async fn find_for_room_in_month(
        &self,
        room_id: RoomId,
        month: Month,
    ) -> AppResult<Vec<RoomRestriction>> {
        let mut out: Vec<_> = self
            .restrictions
            .iter()
            .filter(|r| {
                r.room_id == room_id
                    && r.span.start() <= month.last
                    && r.span.end() > month.first
            })
            .map(|r| r.clone())
            .collect();
        out.sort_by_key(|r| (r.span.start(), r.id));
        Ok(out)
    }

    async fn apply_calendar_edits(&self, edits: CalendarEdits) -> AppResult<()> {
        for restriction_id in &edits.removals {
            // blocks only; a reservation's restriction is never deleted here
            let is_block = self
                .restrictions
                .get(restriction_id)
                .map(|r| r.is_block())
                .unwrap_or(false);
            if is_block {
                self.restrictions.remove(restriction_id);
            }
        }
        for add in &edits.additions {
            let id = RestrictionId::new(self.next_id());
            let span = DateSpan::new(add.date, add.date + chrono::Duration::days(1))?;
            self.restrictions.insert(
                id,
                RoomRestriction {
                    id,
                    room_id: add.room_id,
                    reservation_id: None,
                    kind: RestrictionKind::Block,
                    span,
                },
            );
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        if self.rooms.get(&event.room_id).is_none() {
            return Err(AppError::EntityNotFound(format!(
                "room {} not found",
                event.room_id
            )));
        }
        let id = ReservationId::new(self.next_id());
        let now = Utc::now();
        self.reservations.insert(
            id,
            ReservationRecord {
                id,
                first_name: event.first_name,
                last_name: event.last_name,
                email: event.email,
                phone: event.phone,
                room_id: event.room_id,
                span: event.span,
                processed: false,
                created_at: now,
                updated_at: now,
            },
        );
        let restriction_id = RestrictionId::new(self.next_id());
        self.restrictions.insert(
            restriction_id,
            RoomRestriction {
                id: restriction_id,
                room_id: event.room_id,
                reservation_id: Some(id),
                kind: RestrictionKind::Reservation,
                span: event.span,
            },
        );
        Ok(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        self.collect_reservations(|_| true)
    }

    async fn find_new(&self) -> AppResult<Vec<Reservation>> {
        self.collect_reservations(|r| !r.processed)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let record = self
            .reservations
            .get(&reservation_id)
            .map(|r| r.clone())
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
            })?;
        self.to_reservation(&record)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut record = self.reservations.get_mut(&event.reservation_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation {} not found", event.reservation_id))
        })?;
        record.first_name = event.first_name;
        record.last_name = event.last_name;
        record.email = event.email;
        record.phone = event.phone;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn mark_processed(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut record = self.reservations.get_mut(&reservation_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
        })?;
        record.processed = true;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        if self.reservations.remove(&reservation_id).is_none() {
            return Err(AppError::EntityNotFound(format!(
                "reservation {reservation_id} not found"
            )));
        }
        self.restrictions
            .retain(|_, r| r.reservation_id != Some(reservation_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|r| r.user.clone()))
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<UserId> {
        let record = self
            .users
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.clone())
            .ok_or(AppError::UnauthorizedError)?;
        let valid = bcrypt::verify(password, &record.password_hash)?;
        if !valid {
            return Err(AppError::UnauthorizedError);
        }
        Ok(record.user.id)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn get(&self, token: &str, key: &str) -> AppResult<Option<Value>> {
        Ok(self
            .sessions
            .get(token)
            .and_then(|s| s.get(key).cloned()))
    }

    async fn put(&self, token: &str, key: &str, value: Value) -> AppResult<()> {
        self.sessions
            .entry(token.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn pop(&self, token: &str, key: &str) -> AppResult<Option<Value>> {
        Ok(self.sessions.get_mut(token).and_then(|mut s| s.remove(key)))
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        self.sessions.remove(token);
        Ok(())
    }
}

#[async_trait]
impl HealthCheckRepository for MemoryStore {
    async fn check_db(&self) -> bool {
        true
    }
}

/// Mail double: records everything instead of delivering.
#[derive(Default)]
pub struct RecordingMailQueue {
    sent: Mutex<Vec<MailData>>,
}

impl RecordingMailQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<MailData> {
        self.sent.lock().expect("mail queue poisoned").clone()
    }
}

impl MailQueue for RecordingMailQueue {
    fn enqueue(&self, mail: MailData) -> AppResult<()> {
        self.sent.lock().expect("mail queue poisoned").push(mail);
        Ok(())
    }
}
