use crate::model::mail::MailData;
use shared::error::AppResult;

/// Fire-and-forget hand-off to the background mail worker. Enqueueing never
/// blocks the request path; delivery failures are the worker's problem.
pub trait MailQueue: Send + Sync {
    fn enqueue(&self, mail: MailData) -> AppResult<()>;
}
