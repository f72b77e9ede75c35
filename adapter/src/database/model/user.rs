use kernel::model::{id::UserId, user::User};

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub access_level: i32,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            id,
            first_name,
            last_name,
            email,
            access_level,
        } = value;
        User {
            id,
            first_name,
            last_name,
            email,
            access_level,
        }
    }
}
