//! Asynchronous mail dispatch: an unbounded in-process queue drained by a
//! single background worker. Enqueueing is fire-and-forget; when the
//! process shuts down the channel closes and in-flight messages are
//! dropped. Nothing is persisted or retried.

use async_trait::async_trait;
use kernel::{model::mail::MailData, repository::mail::MailQueue};
use shared::error::{AppError, AppResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const BODY_TOKEN: &str = "[%body%]";

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, mail: &MailData) -> AppResult<()>;
}

/// Cheaply cloneable sending half handed to the registry.
#[derive(Clone)]
pub struct MailQueueHandle {
    tx: mpsc::UnboundedSender<MailData>,
}

impl MailQueue for MailQueueHandle {
    fn enqueue(&self, mail: MailData) -> AppResult<()> {
        self.tx
            .send(mail)
            .map_err(|_| AppError::ExternalServiceError("mail worker has shut down".into()))
    }
}

/// Spawns the worker task and returns the queue handle plus the worker's
/// join handle. Delivery failures are logged and dropped.
pub fn start_mail_worker(
    transport: std::sync::Arc<dyn MailTransport>,
) -> (MailQueueHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<MailData>();
    let worker = tokio::spawn(async move {
        while let Some(mail) = rx.recv().await {
            if let Err(e) = transport.deliver(&mail).await {
                tracing::error!(
                    error.message = %e,
                    mail.to = %mail.to,
                    mail.subject = %mail.subject,
                    "mail delivery failed"
                );
            }
        }
        tracing::info!("mail worker stopped");
    });
    (MailQueueHandle { tx }, worker)
}

/// Delivers through an HTTP mail gateway (a JSON POST per message).
pub struct HttpMailGateway {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpMailGateway {
    pub fn new(gateway_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url,
        }
    }

    /// When the message names a template, its `[%body%]` token is replaced
    /// with the rendered content. An unreadable template falls back to the
    /// bare content rather than losing the message.
    async fn render_body(&self, mail: &MailData) -> String {
        let Some(template) = &mail.template else {
            return mail.content.clone();
        };
        let path = format!("./email-templates/{template}");
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw.replacen(BODY_TOKEN, &mail.content, 1),
            Err(e) => {
                tracing::error!(
                    error.message = %e,
                    template = %template,
                    "could not read mail template"
                );
                mail.content.clone()
            }
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailGateway {
    async fn deliver(&self, mail: &MailData) -> AppResult<()> {
        let body = self.render_body(mail).await;
        let res = self
            .client
            .post(&self.gateway_url)
            .json(&serde_json::json!({
                "to": mail.to,
                "from": mail.from,
                "subject": mail.subject,
                "body": body,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail gateway error: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "mail gateway responded with {}",
                res.status()
            )));
        }

        Ok(())
    }
}
