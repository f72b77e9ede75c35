use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation,
    },
    restriction::RestrictionKind,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        // reservation and its restriction commit together; there is no
        // state in which one row exists without the other
        let mut tx = self.db.begin().await?;

        let reservation_id: ReservationId = sqlx::query_scalar(
            r#"
                INSERT INTO reservations
                    (first_name, last_name, email, phone, start_date,
                     end_date, room_id, processed, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NOW(), NOW())
                RETURNING id
            "#,
        )
        .bind(&event.first_name)
        .bind(&event.last_name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(event.span.start())
        .bind(event.span.end())
        .bind(event.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query(
            r#"
                INSERT INTO room_restrictions
                    (room_id, reservation_id, start_date, end_date,
                     restriction_kind, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            "#,
        )
        .bind(event.room_id)
        .bind(reservation_id)
        .bind(event.span.start())
        .bind(event.span.end())
        .bind(RestrictionKind::Reservation.as_tag())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no room restriction record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.id, r.first_name, r.last_name, r.email, r.phone,
                    r.start_date, r.end_date, r.processed,
                    r.created_at, r.updated_at,
                    rm.id AS room_id, rm.room_name
                FROM reservations AS r
                LEFT JOIN rooms AS rm ON r.room_id = rm.id
                ORDER BY r.start_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_new(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.id, r.first_name, r.last_name, r.email, r.phone,
                    r.start_date, r.end_date, r.processed,
                    r.created_at, r.updated_at,
                    rm.id AS room_id, rm.room_name
                FROM reservations AS r
                LEFT JOIN rooms AS rm ON r.room_id = rm.id
                WHERE r.processed = FALSE
                ORDER BY r.start_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.id, r.first_name, r.last_name, r.email, r.phone,
                    r.start_date, r.end_date, r.processed,
                    r.created_at, r.updated_at,
                    rm.id AS room_id, rm.room_name
                FROM reservations AS r
                LEFT JOIN rooms AS rm ON r.room_id = rm.id
                WHERE r.id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            Some(row) => Reservation::try_from(row),
            None => Err(AppError::EntityNotFound(format!(
                "reservation {reservation_id} not found"
            ))),
        }
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET first_name = $1, last_name = $2, email = $3, phone = $4,
                    updated_at = NOW()
                WHERE id = $5
            "#,
        )
        .bind(&event.first_name)
        .bind(&event.last_name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(event.reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        Ok(())
    }

    async fn mark_processed(&self, reservation_id: ReservationId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET processed = TRUE, updated_at = NOW()
                WHERE id = $1
            "#,
        )
        .bind(reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
                DELETE FROM room_restrictions
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query(
            r#"
                DELETE FROM reservations
                WHERE id = $1
            "#,
        )
        .bind(reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}
