use chrono::NaiveDate;
use kernel::model::{
    date::DateSpan,
    id::{ReservationId, RestrictionId, RoomId},
    restriction::{RestrictionKind, RoomRestriction},
};
use shared::error::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
pub struct RestrictionRow {
    pub id: RestrictionId,
    pub room_id: RoomId,
    pub reservation_id: Option<ReservationId>,
    pub restriction_kind: i16,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TryFrom<RestrictionRow> for RoomRestriction {
    type Error = AppError;

    fn try_from(value: RestrictionRow) -> AppResult<Self> {
        let RestrictionRow {
            id,
            room_id,
            reservation_id,
            restriction_kind,
            start_date,
            end_date,
        } = value;
        let kind = RestrictionKind::from_tag(restriction_kind).ok_or_else(|| {
            AppError::ConversionEntityError(format!(
                "unknown restriction kind tag {restriction_kind} on restriction {id}"
            ))
        })?;
        Ok(RoomRestriction {
            id,
            room_id,
            reservation_id,
            kind,
            span: DateSpan::new(start_date, end_date)?,
        })
    }
}
