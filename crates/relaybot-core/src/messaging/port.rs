use async_trait::async_trait;

use crate::{
    domain::{ChatId, MemberRole, MessageId, MessageRef, UserId},
    messaging::types::UrlButton,
    Result,
};

/// Outbound platform actions.
///
/// Every call may fail with [`crate::Error::RateLimited`] carrying the wait the
/// platform asked for, or with a generic [`crate::Error::External`]. The port
/// itself never retries; retry policy belongs to the flows.
#[async_trait]
pub trait PlatformPort: Send + Sync {
    async fn send_text_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageRef>;

    async fn send_photo_with_button(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        photo_url: &str,
        caption: &str,
        button: UrlButton,
    ) -> Result<MessageRef>;

    /// Copy `source` into `chat_id` with a replacement caption.
    async fn copy_message(
        &self,
        chat_id: ChatId,
        source: MessageRef,
        caption: &str,
    ) -> Result<MessageRef>;

    async fn delete_message(&self, msg: MessageRef) -> Result<()>;

    async fn member_role(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberRole>;
}
