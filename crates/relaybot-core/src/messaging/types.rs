use crate::domain::{ChatId, MessageId, MessageRef, UserId};

/// Kind of chat an inbound message was posted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Clone, Debug)]
pub struct ChatInfo {
    pub id: ChatId,
    pub kind: ChatKind,
    /// Public `@username` of the chat (without the `@`), if it has one.
    pub username: Option<String>,
}

impl ChatInfo {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }
}

#[derive(Clone, Debug)]
pub struct Sender {
    pub id: UserId,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

/// Named media attachment (document, video or audio).
#[derive(Clone, Debug)]
pub struct MediaInfo {
    pub file_name: Option<String>,
    pub size: u64,
}

/// The message an inbound message replies to.
#[derive(Clone, Debug)]
pub struct ReplyContext {
    pub message_id: MessageId,
    pub author: Option<Sender>,
}

/// Platform-neutral inbound message.
///
/// Telegram-specific fields stay in the adapter crate.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub chat: ChatInfo,
    pub message_id: MessageId,
    pub from: Option<Sender>,
    /// Chat the message was sent on behalf of (anonymous admins, linked channels).
    pub sender_chat: Option<ChatId>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub media: Option<MediaInfo>,
    pub reply_to: Option<ReplyContext>,
    /// Authored by this bot.
    pub from_self: bool,
}

impl InboundMessage {
    pub fn reference(&self) -> MessageRef {
        MessageRef::new(self.chat.id, self.message_id)
    }

    pub fn is_command(&self) -> bool {
        self.text.as_deref().is_some_and(|t| t.starts_with('/'))
    }

    /// Lower-cased command name without the leading `/` or `@botname` suffix.
    pub fn command_name(&self) -> Option<String> {
        if !self.is_command() {
            return None;
        }
        let text = self.text.as_deref()?;
        let first = text.split_whitespace().next().unwrap_or("");
        let name = first
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();
        Some(name)
    }
}

/// Inline button that opens a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlButton {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: i64) -> Sender {
        Sender {
            id: UserId(id),
            is_bot: false,
            first_name: format!("user{id}"),
            username: None,
        }
    }

    pub fn message(chat_id: i64, kind: ChatKind, message_id: i32) -> InboundMessage {
        InboundMessage {
            chat: ChatInfo {
                id: ChatId(chat_id),
                kind,
                username: None,
            },
            message_id: MessageId(message_id),
            from: None,
            sender_chat: None,
            text: None,
            caption: None,
            media: None,
            reply_to: None,
            from_self: false,
        }
    }

    pub fn group_text(chat_id: i64, message_id: i32, from: i64, text: &str) -> InboundMessage {
        InboundMessage {
            from: Some(user(from)),
            text: Some(text.to_string()),
            ..message(chat_id, ChatKind::Supergroup, message_id)
        }
    }
}
