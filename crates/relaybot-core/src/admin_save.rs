//! Moderator "save" action: an admin replies to a member's request with the
//! trigger word, the bot swaps the trigger for an announcement.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{
    config::Config,
    messaging::{
        port::PlatformPort,
        types::{InboundMessage, UrlButton},
    },
    routes::MessageHandler,
    Result,
};

pub const SAVE_CONFIRMATION: &str = "Saved ✅";
pub const JOIN_BUTTON_LABEL: &str = "Join Group";

pub struct SaveFlow {
    port: Arc<dyn PlatformPort>,
    trigger: String,
    photo_url: String,
    fallback_url: String,
    confirm_delay: Duration,
}

impl SaveFlow {
    pub fn new(port: Arc<dyn PlatformPort>, cfg: &Config) -> Self {
        Self {
            port,
            trigger: cfg.save_trigger.clone(),
            photo_url: cfg.save_photo_url.clone(),
            fallback_url: cfg.fallback_group_url.clone(),
            confirm_delay: cfg.save_confirm_delay,
        }
    }

    /// Case-insensitive match of the whole (trimmed) message text.
    pub fn is_trigger(&self, text: &str) -> bool {
        text.trim().to_lowercase() == self.trigger.to_lowercase()
    }

    pub fn group_link(&self, msg: &InboundMessage) -> String {
        match msg.chat.username.as_deref().filter(|u| !u.is_empty()) {
            Some(username) => format!("https://t.me/{username}"),
            None => self.fallback_url.clone(),
        }
    }
}

fn announcement(name: &str) -> String {
    format!(
        "📌 {name}, your request has been saved!\n\n\
         It will be uploaded as soon as it is available.\n\
         Stay in the group so you don't miss it 🍿"
    )
}

#[async_trait]
impl MessageHandler for SaveFlow {
    async fn handle(&self, msg: &InboundMessage) -> Result<()> {
        let Some(admin) = msg.from.as_ref() else {
            return Ok(());
        };
        let Some(reply) = msg.reply_to.as_ref() else {
            return Ok(());
        };
        let Some(author) = reply.author.as_ref() else {
            return Ok(());
        };
        if author.is_bot || author.id == admin.id {
            return Ok(());
        }

        let role = self.port.member_role(msg.chat.id, admin.id).await?;
        if !role.is_privileged() {
            debug!(
                chat_id = msg.chat.id.0,
                user_id = admin.id.0,
                ?role,
                "save trigger from non-admin ignored"
            );
            return Ok(());
        }

        self.port.delete_message(msg.reference()).await?;

        let button = UrlButton {
            label: JOIN_BUTTON_LABEL.to_string(),
            url: self.group_link(msg),
        };
        self.port
            .send_photo_with_button(
                msg.chat.id,
                Some(reply.message_id),
                &self.photo_url,
                &announcement(&author.first_name),
                button,
            )
            .await?;

        let confirm = self
            .port
            .send_text_reply(msg.chat.id, None, SAVE_CONFIRMATION)
            .await?;
        info!(
            chat_id = msg.chat.id.0,
            admin_id = admin.id.0,
            request = reply.message_id.0,
            "request saved"
        );

        sleep(self.confirm_delay).await;
        self.port.delete_message(confirm).await?;
        Ok(())
    }
}
