use crate::database::{model::restriction::RestrictionRow, ConnectionPool};
use async_trait::async_trait;
use chrono::Duration;
use derive_new::new;
use kernel::model::{
    calendar::Month,
    date::DateSpan,
    id::RoomId,
    restriction::{event::CalendarEdits, RestrictionKind, RoomRestriction},
};
use kernel::repository::restriction::RestrictionRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RestrictionRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RestrictionRepository for RestrictionRepositoryImpl {
    async fn has_overlap(&self, room_id: RoomId, span: DateSpan) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(id)
                FROM room_restrictions
                WHERE room_id = $1
                  AND start_date < $3 AND $2 < end_date
            "#,
        )
        .bind(room_id)
        .bind(span.start())
        .bind(span.end())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(count > 0)
    }

    async fn find_for_room_in_month(
        &self,
        room_id: RoomId,
        month: Month,
    ) -> AppResult<Vec<RoomRestriction>> {
        let rows: Vec<RestrictionRow> = sqlx::query_as(
            r#"
                SELECT id, room_id, reservation_id, restriction_kind,
                       start_date, end_date
                FROM room_restrictions
                WHERE room_id = $1
                  AND start_date <= $3 AND end_date > $2
                ORDER BY start_date, id
            "#,
        )
        .bind(room_id)
        .bind(month.first)
        .bind(month.last)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(RoomRestriction::try_from).collect()
    }

    async fn apply_calendar_edits(&self, edits: CalendarEdits) -> AppResult<()> {
        // one transaction for the whole edit so a mid-way failure cannot
        // leave a half-applied calendar
        let mut tx = self.db.begin().await?;

        for restriction_id in &edits.removals {
            // the guard keeps a forged or stale id from ever deleting a
            // restriction that belongs to a reservation
            sqlx::query(
                r#"
                    DELETE FROM room_restrictions
                    WHERE id = $1 AND reservation_id IS NULL
                "#,
            )
            .bind(restriction_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        for add in &edits.additions {
            sqlx::query(
                r#"
                    INSERT INTO room_restrictions
                        (room_id, start_date, end_date, restriction_kind,
                         created_at, updated_at)
                    VALUES ($1, $2, $3, $4, NOW(), NOW())
                "#,
            )
            .bind(add.room_id)
            .bind(add.date)
            .bind(add.date + Duration::days(1))
            .bind(RestrictionKind::Block.as_tag())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}
