//! Channel republish flow: repost with a cleaned caption, then delete the original.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::{
    domain::MessageRef,
    messaging::{port::PlatformPort, types::InboundMessage},
    retry::retry_on_rate_limit,
    routes::MessageHandler,
    sanitize::CaptionSanitizer,
    Result,
};

/// The first try plus one retry after a rate-limit wait.
const MAX_ATTEMPTS: usize = 2;

pub struct RepublishFlow {
    port: Arc<dyn PlatformPort>,
    sanitizer: Arc<CaptionSanitizer>,
}

impl RepublishFlow {
    pub fn new(port: Arc<dyn PlatformPort>, sanitizer: Arc<CaptionSanitizer>) -> Self {
        Self { port, sanitizer }
    }

    /// Branded caption for named media, otherwise the cleaned original caption.
    pub fn caption_for(&self, msg: &InboundMessage) -> String {
        let named = msg.media.as_ref().and_then(|m| {
            m.file_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| (name, m.size))
        });
        match named {
            Some((name, size)) => self.sanitizer.media_caption(name, size),
            None => self.sanitizer.sanitize(msg.caption.as_deref().unwrap_or("")),
        }
    }

    /// Copy then delete, as one unit. A rate-limited unit is retried once.
    ///
    /// If the copy went through but the delete was rate limited, the retry
    /// copies again.
    pub async fn republish(&self, msg: &InboundMessage) -> Result<MessageRef> {
        let caption = self.caption_for(msg);
        let caption = caption.as_str();
        let original = msg.reference();

        retry_on_rate_limit(MAX_ATTEMPTS, move || self.copy_and_delete(original, caption)).await
    }

    async fn copy_and_delete(&self, original: MessageRef, caption: &str) -> Result<MessageRef> {
        let copy = self
            .port
            .copy_message(original.chat_id, original, caption)
            .await?;
        self.port.delete_message(original).await?;
        Ok(copy)
    }
}

#[async_trait]
impl MessageHandler for RepublishFlow {
    async fn handle(&self, msg: &InboundMessage) -> Result<()> {
        let copy = self.republish(msg).await?;
        info!(
            chat_id = msg.chat.id.0,
            original = msg.message_id.0,
            copy = copy.message_id.0,
            "republished channel post"
        );
        Ok(())
    }
}
