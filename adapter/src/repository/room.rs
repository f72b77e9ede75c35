use crate::database::{model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{date::DateSpan, id::RoomId, room::Room};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT id, room_name, created_at, updated_at
                FROM rooms
                ORDER BY room_name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                SELECT id, room_name, created_at, updated_at
                FROM rooms
                WHERE id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn find_available(&self, span: DateSpan) -> AppResult<Vec<Room>> {
        // strict half-open overlap: a restriction ending on the requested
        // start date or starting on the requested end date is no conflict
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT r.id, r.room_name, r.created_at, r.updated_at
                FROM rooms AS r
                WHERE r.id NOT IN (
                    SELECT rr.room_id
                    FROM room_restrictions AS rr
                    WHERE rr.start_date < $2 AND $1 < rr.end_date
                )
                ORDER BY r.room_name
            "#,
        )
        .bind(span.start())
        .bind(span.end())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }
}
