use crate::model::{id::UserId, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    /// Verifies the password against the stored adaptive hash and returns
    /// the account id. A wrong password and an unknown email both surface
    /// as `AppError::UnauthorizedError`.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<UserId>;
}
