//! Cookie-backed session plumbing.
//!
//! A middleware guarantees every request carries a session token (minting
//! one and setting the cookie when the browser has none); the `Session`
//! extractor then gives handlers typed access to the per-browser store:
//! the reservation draft, one-shot flash messages, the logged-in user id
//! and the admin calendar block maps.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use kernel::model::{id::UserId, reservation::ReservationDraft};
use kernel::repository::session::SessionRepository;
use kernel::service::calendar::BlockMaps;
use registry::AppRegistry;
use serde::{de::DeserializeOwned, Serialize};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

const SESSION_COOKIE: &str = "sid";

const DRAFT_KEY: &str = "reservation";
const USER_KEY: &str = "user_id";
const BLOCK_MAPS_KEY: &str = "block_maps";

#[derive(Debug, Clone)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn session_cookie_header(token: &SessionToken) -> (axum::http::HeaderName, String) {
    (
        SET_COOKIE,
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            token.as_str()
        ),
    )
}

fn token_from_cookie_header(value: &HeaderValue) -> Option<SessionToken> {
    let raw = value.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty())
            .then(|| SessionToken(value.to_string()))
    })
}

/// Ensures a session token rides on every request. When the browser sent
/// none, a fresh token is minted and the cookie is set on the response.
pub async fn attach_session_token(mut req: Request, next: Next) -> Response {
    let existing = req
        .headers()
        .get(COOKIE)
        .and_then(token_from_cookie_header);
    let minted = existing.is_none();
    let token = existing.unwrap_or_else(SessionToken::generate);
    req.extensions_mut().insert(token.clone());

    let mut res = next.run(req).await;
    // a handler that rotated the token has already set its own cookie
    if minted && !res.headers().contains_key(SET_COOKIE) {
        let (name, value) = session_cookie_header(&token);
        if let Ok(value) = HeaderValue::from_str(&value) {
            res.headers_mut().append(name, value);
        }
    }
    res
}

/// Typed view over one browser's session.
pub struct Session {
    token: SessionToken,
    repo: Arc<dyn SessionRepository>,
}

impl Session {
    pub fn new(token: SessionToken, repo: Arc<dyn SessionRepository>) -> Self {
        Self { token, repo }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let value = self.repo.get(self.token.as_str(), key).await?;
        decode(value)
    }

    async fn pop_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let value = self.repo.pop(self.token.as_str(), key).await?;
        decode(value)
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::ConversionEntityError(format!("session encode failed: {e}")))?;
        self.repo.put(self.token.as_str(), key, value).await
    }

    pub async fn draft(&self) -> AppResult<Option<ReservationDraft>> {
        self.get_json(DRAFT_KEY).await
    }

    pub async fn put_draft(&self, draft: &ReservationDraft) -> AppResult<()> {
        self.put_json(DRAFT_KEY, draft).await
    }

    /// Reads and removes the draft; the reservation summary is viewable
    /// exactly once.
    pub async fn take_draft(&self) -> AppResult<Option<ReservationDraft>> {
        self.pop_json(DRAFT_KEY).await
    }

    /// One-shot message under "flash", "error" or "warning".
    pub async fn put_flash(&self, kind: &str, message: &str) -> AppResult<()> {
        self.put_json(kind, &message.to_string()).await
    }

    pub async fn take_flash(&self, kind: &str) -> AppResult<Option<String>> {
        self.pop_json(kind).await
    }

    pub async fn user_id(&self) -> AppResult<Option<UserId>> {
        self.get_json(USER_KEY).await
    }

    pub async fn put_user_id(&self, user_id: UserId) -> AppResult<()> {
        self.put_json(USER_KEY, &user_id).await
    }

    pub async fn put_block_maps(&self, maps: &BlockMaps) -> AppResult<()> {
        self.put_json(BLOCK_MAPS_KEY, maps).await
    }

    pub async fn take_block_maps(&self) -> AppResult<Option<BlockMaps>> {
        self.pop_json(BLOCK_MAPS_KEY).await
    }

    pub async fn destroy(&self) -> AppResult<()> {
        self.repo.destroy(self.token.as_str()).await
    }
}

fn decode<T: DeserializeOwned>(value: Option<serde_json::Value>) -> AppResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| AppError::ConversionEntityError(format!("session decode failed: {e}"))),
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .extensions
            .get::<SessionToken>()
            .cloned()
            .ok_or(AppError::SessionExpired)?;
        Ok(Session::new(token, registry.session_repository()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_parsing_picks_out_the_session_token() {
        let value = HeaderValue::from_static("theme=dark; sid=abc-123; lang=en");
        let token = token_from_cookie_header(&value).unwrap();
        assert_eq!(token.as_str(), "abc-123");

        assert!(token_from_cookie_header(&HeaderValue::from_static("theme=dark")).is_none());
        assert!(token_from_cookie_header(&HeaderValue::from_static("sid=")).is_none());
    }
}
