use async_trait::async_trait;
use derive_new::new;
use kernel::repository::session::SessionRepository;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde_json::Value;
use shared::{
    config::RedisConfig,
    error::{AppError, AppResult},
};
use std::sync::Arc;

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(cfg: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", cfg.host, cfg.port))?;
        Ok(Self { client })
    }

    async fn conn(&self) -> AppResult<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

/// Sessions live in one Redis hash per browser, expiring after the
/// configured idle TTL. Values are stored as JSON strings.
#[derive(new)]
pub struct RedisSessionRepository {
    client: Arc<RedisClient>,
    ttl: u64,
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

fn decode(raw: Option<String>) -> AppResult<Option<Value>> {
    match raw {
        None => Ok(None),
        Some(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|e| AppError::ConversionEntityError(format!("corrupt session value: {e}"))),
    }
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
    async fn get(&self, token: &str, key: &str) -> AppResult<Option<Value>> {
        let mut conn = self.client.conn().await?;
        let raw: Option<String> = conn.hget(session_key(token), key).await?;
        decode(raw)
    }

    async fn put(&self, token: &str, key: &str, value: Value) -> AppResult<()> {
        let mut conn = self.client.conn().await?;
        let session = session_key(token);
        redis::pipe()
            .atomic()
            .hset(&session, key, value.to_string())
            .ignore()
            .expire(&session, self.ttl as i64)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn pop(&self, token: &str, key: &str) -> AppResult<Option<Value>> {
        let mut conn = self.client.conn().await?;
        let session = session_key(token);
        let raw: Option<String> = conn.hget(&session, key).await?;
        if raw.is_some() {
            let _: () = conn.hdel(&session, key).await?;
        }
        decode(raw)
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        let mut conn = self.client.conn().await?;
        let _: () = conn.del(session_key(token)).await?;
        Ok(())
    }
}
