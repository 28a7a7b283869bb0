//! Static replies to private-chat commands.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    messaging::{port::PlatformPort, types::InboundMessage},
    routes::MessageHandler,
    Result,
};

pub const START_TEXT: &str = "👋 Bot is alive! ReplyBot & KillMe logic activated.";

pub const HELP_TEXT: &str = "📌 Bot Commands:\n\
/start – Start\n\
/help – Help\n\
\n\
✅ Group: ReplyBot active\n\
✅ Channels: KillMe bot (mention/domain cleaner)";

/// Replies to the triggering message with a fixed text.
pub struct StaticReply {
    port: Arc<dyn PlatformPort>,
    text: &'static str,
}

impl StaticReply {
    pub fn new(port: Arc<dyn PlatformPort>, text: &'static str) -> Self {
        Self { port, text }
    }

    pub fn start(port: Arc<dyn PlatformPort>) -> Self {
        Self::new(port, START_TEXT)
    }

    pub fn help(port: Arc<dyn PlatformPort>) -> Self {
        Self::new(port, HELP_TEXT)
    }
}

#[async_trait]
impl MessageHandler for StaticReply {
    async fn handle(&self, msg: &InboundMessage) -> Result<()> {
        self.port
            .send_text_reply(msg.chat.id, Some(msg.message_id), self.text)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{
        fake::FakePlatform,
        types::{fixtures, ChatKind},
    };

    #[tokio::test]
    async fn replies_with_fixed_text() {
        let port = Arc::new(FakePlatform::new());
        let help = StaticReply::help(port.clone());
        let mut msg = fixtures::message(5, ChatKind::Private, 3);
        msg.text = Some("/help".to_string());

        help.handle(&msg).await.unwrap();

        let texts = port.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, HELP_TEXT);
        assert!(texts[0].text.contains("/start – Start\n/help – Help\n\n✅"));
    }
}
