//! Telegram adapter (teloxide).
//!
//! This crate implements the `relaybot-core` PlatformPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{ChatMemberKind, InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};

pub mod convert;
pub mod handlers;
pub mod router;

use relaybot_core::{
    domain::{ChatId, MemberRole, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{port::PlatformPort, types::UrlButton},
    Result,
};

#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn tg_user(user_id: UserId) -> teloxide::types::UserId {
        teloxide::types::UserId(user_id.0 as u64)
    }

    fn parse_url(raw: &str) -> Result<reqwest::Url> {
        reqwest::Url::parse(raw).map_err(|e| Error::External(format!("invalid url {raw:?}: {e}")))
    }
}

/// `RetryAfter` becomes the core rate-limit signal; everything else is generic.
pub fn map_err(e: teloxide::RequestError) -> Error {
    match e {
        teloxide::RequestError::RetryAfter(wait) => Error::RateLimited(wait),
        other => Error::External(format!("telegram error: {other}")),
    }
}

pub fn map_role(kind: &ChatMemberKind) -> MemberRole {
    match kind {
        ChatMemberKind::Owner(_) => MemberRole::Owner,
        ChatMemberKind::Administrator(_) => MemberRole::Administrator,
        ChatMemberKind::Member => MemberRole::Member,
        ChatMemberKind::Restricted(_) => MemberRole::Restricted,
        ChatMemberKind::Left => MemberRole::Left,
        ChatMemberKind::Banned(_) => MemberRole::Banned,
    }
}

#[async_trait]
impl PlatformPort for TelegramPlatform {
    async fn send_text_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageRef> {
        let mut req = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .disable_web_page_preview(true);
        if let Some(id) = reply_to {
            req = req
                .reply_to_message_id(Self::tg_msg_id(id))
                .allow_sending_without_reply(true);
        }
        let msg = req.await.map_err(map_err)?;

        Ok(MessageRef::new(chat_id, MessageId(msg.id.0)))
    }

    async fn send_photo_with_button(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        photo_url: &str,
        caption: &str,
        button: UrlButton,
    ) -> Result<MessageRef> {
        let photo = InputFile::url(Self::parse_url(photo_url)?);
        let markup = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
            button.label,
            Self::parse_url(&button.url)?,
        )]]);

        let mut req = self
            .bot
            .send_photo(Self::tg_chat(chat_id), photo)
            .caption(caption.to_string())
            .reply_markup(markup);
        if let Some(id) = reply_to {
            req = req
                .reply_to_message_id(Self::tg_msg_id(id))
                .allow_sending_without_reply(true);
        }
        let msg = req.await.map_err(map_err)?;

        Ok(MessageRef::new(chat_id, MessageId(msg.id.0)))
    }

    async fn copy_message(
        &self,
        chat_id: ChatId,
        source: MessageRef,
        caption: &str,
    ) -> Result<MessageRef> {
        let id = self
            .bot
            .copy_message(
                Self::tg_chat(chat_id),
                Self::tg_chat(source.chat_id),
                Self::tg_msg_id(source.message_id),
            )
            .caption(caption.to_string())
            .await
            .map_err(map_err)?;

        Ok(MessageRef::new(chat_id, MessageId(id.0)))
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.bot
            .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn member_role(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberRole> {
        let member = self
            .bot
            .get_chat_member(Self::tg_chat(chat_id), Self::tg_user(user_id))
            .await
            .map_err(map_err)?;
        Ok(map_role(&member.kind))
    }
}
