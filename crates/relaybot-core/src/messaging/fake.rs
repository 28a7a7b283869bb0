//! Recording in-memory [`PlatformPort`] for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    domain::{ChatId, MemberRole, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{port::PlatformPort, types::UrlButton},
    Result,
};

#[derive(Clone, Debug)]
pub struct TextSend {
    pub chat_id: ChatId,
    pub reply_to: Option<MessageId>,
    pub text: String,
    pub sent: MessageRef,
}

#[derive(Clone, Debug)]
pub struct PhotoSend {
    pub chat_id: ChatId,
    pub reply_to: Option<MessageId>,
    pub photo_url: String,
    pub caption: String,
    pub button: UrlButton,
}

#[derive(Clone, Debug)]
pub struct CopySend {
    pub chat_id: ChatId,
    pub source: MessageRef,
    pub caption: String,
}

#[derive(Default)]
pub struct FakePlatform {
    next_id: Mutex<i32>,
    texts: Mutex<Vec<TextSend>>,
    photos: Mutex<Vec<PhotoSend>>,
    copy_attempts: Mutex<Vec<CopySend>>,
    deletes: Mutex<Vec<MessageRef>>,
    delete_attempts: Mutex<Vec<MessageRef>>,
    role_lookups: Mutex<Vec<(ChatId, UserId)>>,
    roles: Mutex<HashMap<(ChatId, UserId), MemberRole>>,
    send_failures: Mutex<VecDeque<Error>>,
    copy_failures: Mutex<VecDeque<Error>>,
    delete_failures: Mutex<VecDeque<Error>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1000),
            ..Default::default()
        }
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut guard = self.next_id.lock().unwrap();
        let id = *guard;
        *guard += 1;
        MessageRef::new(chat_id, MessageId(id))
    }

    pub fn set_role(&self, chat_id: ChatId, user_id: UserId, role: MemberRole) {
        self.roles.lock().unwrap().insert((chat_id, user_id), role);
    }

    pub fn fail_next_send(&self, err: Error) {
        self.send_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_next_copy(&self, err: Error) {
        self.copy_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_next_delete(&self, err: Error) {
        self.delete_failures.lock().unwrap().push_back(err);
    }

    pub fn texts(&self) -> Vec<TextSend> {
        self.texts.lock().unwrap().clone()
    }

    pub fn photos(&self) -> Vec<PhotoSend> {
        self.photos.lock().unwrap().clone()
    }

    pub fn copy_attempts(&self) -> Vec<CopySend> {
        self.copy_attempts.lock().unwrap().clone()
    }

    /// Successful deletions only.
    pub fn deletes(&self) -> Vec<MessageRef> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn delete_attempts(&self) -> Vec<MessageRef> {
        self.delete_attempts.lock().unwrap().clone()
    }

    pub fn role_lookups(&self) -> Vec<(ChatId, UserId)> {
        self.role_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformPort for FakePlatform {
    async fn send_text_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageRef> {
        if let Some(err) = self.send_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        let sent = self.alloc(chat_id);
        self.texts.lock().unwrap().push(TextSend {
            chat_id,
            reply_to,
            text: text.to_string(),
            sent,
        });
        Ok(sent)
    }

    async fn send_photo_with_button(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        photo_url: &str,
        caption: &str,
        button: UrlButton,
    ) -> Result<MessageRef> {
        if let Some(err) = self.send_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        self.photos.lock().unwrap().push(PhotoSend {
            chat_id,
            reply_to,
            photo_url: photo_url.to_string(),
            caption: caption.to_string(),
            button,
        });
        Ok(self.alloc(chat_id))
    }

    async fn copy_message(
        &self,
        chat_id: ChatId,
        source: MessageRef,
        caption: &str,
    ) -> Result<MessageRef> {
        self.copy_attempts.lock().unwrap().push(CopySend {
            chat_id,
            source,
            caption: caption.to_string(),
        });
        if let Some(err) = self.copy_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.alloc(chat_id))
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.delete_attempts.lock().unwrap().push(msg);
        if let Some(err) = self.delete_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        self.deletes.lock().unwrap().push(msg);
        Ok(())
    }

    async fn member_role(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberRole> {
        self.role_lookups.lock().unwrap().push((chat_id, user_id));
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&(chat_id, user_id))
            .copied()
            .unwrap_or(MemberRole::Member))
    }
}
