//! teloxide `Message` → core `InboundMessage`.

use teloxide::types::{Chat, Message, User};

use relaybot_core::{
    domain::{ChatId, MessageId, UserId},
    messaging::types::{ChatInfo, ChatKind, InboundMessage, MediaInfo, ReplyContext, Sender},
};

pub fn inbound_from_message(msg: &Message, me: teloxide::types::UserId) -> InboundMessage {
    InboundMessage {
        chat: chat_info(&msg.chat),
        message_id: MessageId(msg.id.0),
        from: msg.from().map(sender),
        sender_chat: msg.sender_chat().map(|c| ChatId(c.id.0)),
        text: msg.text().map(str::to_string),
        caption: msg.caption().map(str::to_string),
        media: media_info(msg),
        reply_to: msg.reply_to_message().map(|r| ReplyContext {
            message_id: MessageId(r.id.0),
            author: r.from().map(sender),
        }),
        // Channel posts normally carry no `from`, so this only catches our
        // own messages in groups and private chats. Copies the bot makes in a
        // channel arrive as ordinary unsigned posts.
        from_self: msg.from().is_some_and(|u| u.id == me),
    }
}

fn chat_info(chat: &Chat) -> ChatInfo {
    let kind = if chat.is_private() {
        ChatKind::Private
    } else if chat.is_channel() {
        ChatKind::Channel
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else {
        ChatKind::Group
    };
    ChatInfo {
        id: ChatId(chat.id.0),
        kind,
        username: chat.username().map(str::to_string),
    }
}

fn sender(user: &User) -> Sender {
    Sender {
        id: UserId(user.id.0 as i64),
        is_bot: user.is_bot,
        first_name: user.first_name.clone(),
        username: user.username.clone(),
    }
}

/// Documents, videos and audio carry a file name; photos do not.
fn media_info(msg: &Message) -> Option<MediaInfo> {
    if let Some(doc) = msg.document() {
        return Some(MediaInfo {
            file_name: doc.file_name.clone(),
            size: u64::from(doc.file.size),
        });
    }
    if let Some(video) = msg.video() {
        return Some(MediaInfo {
            file_name: video.file_name.clone(),
            size: u64::from(video.file.size),
        });
    }
    if let Some(audio) = msg.audio() {
        return Some(MediaInfo {
            file_name: audio.file_name.clone(),
            size: u64::from(audio.file.size),
        });
    }
    None
}
