use derive_new::new;

/// One outbound notification. When `template` is set the transport loads
/// that template and substitutes the `[%body%]` token with `content`;
/// otherwise `content` is sent as the body directly.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MailData {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub content: String,
    pub template: Option<String>,
}
