use async_trait::async_trait;
use serde_json::Value;
use shared::error::AppResult;

/// Per-browser key-value storage: the reservation draft, one-shot flash
/// messages, the authenticated user id and the admin calendar block maps
/// all ride here between requests.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, token: &str, key: &str) -> AppResult<Option<Value>>;
    async fn put(&self, token: &str, key: &str, value: Value) -> AppResult<()>;
    /// Reads and removes in one step; used for flash messages and the
    /// one-view reservation summary.
    async fn pop(&self, token: &str, key: &str) -> AppResult<Option<Value>>;
    /// Drops the whole session. Logout rotates to a fresh token afterwards.
    async fn destroy(&self, token: &str) -> AppResult<()>;
}
