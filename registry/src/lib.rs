use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mail::MailQueueHandle;
use adapter::redis::{RedisClient, RedisSessionRepository};
use adapter::repository::{
    health::HealthCheckRepositoryImpl, reservation::ReservationRepositoryImpl,
    restriction::RestrictionRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::repository::{
    health::HealthCheckRepository, mail::MailQueue, reservation::ReservationRepository,
    restriction::RestrictionRepository, room::RoomRepository, session::SessionRepository,
    user::UserRepository,
};
use kernel::service::{
    availability::AvailabilityEngine, calendar::CalendarService, reservation::ReservationService,
};
use shared::config::AppConfig;

/// The application context: constructed once at startup and injected into
/// every handler through axum state. There are no ambient globals.
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    room_repository: Arc<dyn RoomRepository>,
    restriction_repository: Arc<dyn RestrictionRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
    availability_engine: Arc<AvailabilityEngine>,
    calendar_service: Arc<CalendarService>,
    reservation_service: Arc<ReservationService>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        mail_queue: MailQueueHandle,
        app_config: &AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let room_repository = Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let restriction_repository = Arc::new(RestrictionRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let session_repository = Arc::new(RedisSessionRepository::new(
            redis_client,
            app_config.session.ttl,
        ));
        Self::from_parts(
            health_check_repository,
            room_repository,
            restriction_repository,
            reservation_repository,
            user_repository,
            session_repository,
            Arc::new(mail_queue),
            app_config.mail.owner_address.clone(),
        )
    }

    /// Wires the same graph over arbitrary trait objects; tests use this
    /// with the in-memory store.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        room_repository: Arc<dyn RoomRepository>,
        restriction_repository: Arc<dyn RestrictionRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
        mail_queue: Arc<dyn MailQueue>,
        owner_address: String,
    ) -> Self {
        let availability_engine = Arc::new(AvailabilityEngine::new(
            room_repository.clone(),
            restriction_repository.clone(),
        ));
        let calendar_service = Arc::new(CalendarService::new(
            room_repository.clone(),
            restriction_repository.clone(),
        ));
        let reservation_service = Arc::new(ReservationService::new(
            reservation_repository.clone(),
            mail_queue,
            owner_address,
        ));
        Self {
            health_check_repository,
            room_repository,
            restriction_repository,
            reservation_repository,
            user_repository,
            session_repository,
            availability_engine,
            calendar_service,
            reservation_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn restriction_repository(&self) -> Arc<dyn RestrictionRepository> {
        self.restriction_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn session_repository(&self) -> Arc<dyn SessionRepository> {
        self.session_repository.clone()
    }

    pub fn availability_engine(&self) -> Arc<AvailabilityEngine> {
        self.availability_engine.clone()
    }

    pub fn calendar_service(&self) -> Arc<CalendarService> {
        self.calendar_service.clone()
    }

    pub fn reservation_service(&self) -> Arc<ReservationService> {
        self.reservation_service.clone()
    }
}
