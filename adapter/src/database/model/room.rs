use chrono::{DateTime, Utc};
use kernel::model::{id::RoomId, room::Room};

#[derive(Debug, sqlx::FromRow)]
pub struct RoomRow {
    pub id: RoomId,
    pub room_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            id,
            room_name,
            created_at,
            updated_at,
        } = value;
        Room {
            id,
            room_name,
            created_at,
            updated_at,
        }
    }
}
