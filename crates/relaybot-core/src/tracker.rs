//! Duplicate-request tracker.
//!
//! Remembers the last request text per user. A user repeating the same request
//! inside the window gets their previous acknowledgment replaced by an
//! "already noted" one instead of a fresh "request received".

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    domain::{MessageRef, UserId},
    messaging::{port::PlatformPort, types::InboundMessage},
    routes::MessageHandler,
    Result,
};

pub const ACK_RECEIVED: &str = "ʀᴇQᴜᴇꜱᴛ ʀᴇᴄᴇɪᴠᴇᴅ✅\nᴜᴘʟᴏᴀᴅ ꜱᴏᴏɴ... ᴄʜɪʟʟ✨";
pub const ACK_ALREADY_NOTED: &str = "ᴀʟʀᴇᴀᴅʏ ɴᴏᴛᴇᴅ ✅\nᴘʟᴇᴀꜱᴇ ᴡᴀɪᴛ⏳...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedRequest {
    pub user_id: UserId,
    pub text: String,
    /// The acknowledgment this tracker currently owns for the user.
    pub last_bot_reply: MessageRef,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Fresh,
    Duplicate { stale_ack: MessageRef },
}

/// Same trimmed text, strictly less than `window` old.
pub fn decide(
    prior: Option<&TrackedRequest>,
    text: &str,
    now: DateTime<Utc>,
    window: chrono::Duration,
) -> Decision {
    match prior {
        Some(p) if p.text == text && now - p.timestamp < window => Decision::Duplicate {
            stale_ack: p.last_bot_reply,
        },
        _ => Decision::Fresh,
    }
}

/// One lockable slot per user; hold the lock for the whole check-and-update.
pub type RequestSlot = Arc<Mutex<Option<TrackedRequest>>>;

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn slot(&self, user_id: UserId) -> RequestSlot;

    async fn get(&self, user_id: UserId) -> Option<TrackedRequest>;

    /// Remove idle entries last updated before `cutoff`. Returns how many went.
    async fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize;
}

/// Process-memory store: a map lock for slot lookup, then a lock per user.
#[derive(Default)]
pub struct InMemoryStore {
    slots: Mutex<HashMap<UserId, RequestSlot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for InMemoryStore {
    async fn slot(&self, user_id: UserId) -> RequestSlot {
        let mut map = self.slots.lock().await;
        map.entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }

    async fn get(&self, user_id: UserId) -> Option<TrackedRequest> {
        let slot = self.slots.lock().await.get(&user_id).cloned()?;
        let entry = slot.lock().await;
        entry.clone()
    }

    async fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut map = self.slots.lock().await;
        let before = map.len();
        map.retain(|_, slot| {
            // Handed out to a handler that has not finished with it yet.
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(entry) => entry.as_ref().is_some_and(|r| r.timestamp >= cutoff),
                Err(_) => true,
            }
        });
        before - map.len()
    }
}

pub struct DuplicateTracker {
    port: Arc<dyn PlatformPort>,
    store: Arc<dyn RequestStore>,
    window: chrono::Duration,
}

impl DuplicateTracker {
    pub fn new(port: Arc<dyn PlatformPort>, store: Arc<dyn RequestStore>, window: Duration) -> Self {
        Self {
            port,
            store,
            window: to_chrono(window),
        }
    }

    /// Acknowledge `request` and record it as the user's latest.
    ///
    /// A failed acknowledgment send leaves the stored entry untouched.
    pub async fn observe(
        &self,
        user_id: UserId,
        request: MessageRef,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Decision> {
        let text = text.trim();
        let slot = self.store.slot(user_id).await;
        let mut entry = slot.lock().await;

        let decision = decide(entry.as_ref(), text, now, self.window);
        let ack = match decision {
            Decision::Duplicate { stale_ack } => {
                if let Err(e) = self.port.delete_message(stale_ack).await {
                    debug!(
                        user_id = user_id.0,
                        message_id = stale_ack.message_id.0,
                        error = %e,
                        "could not delete superseded acknowledgment"
                    );
                }
                ACK_ALREADY_NOTED
            }
            Decision::Fresh => ACK_RECEIVED,
        };

        let sent = self
            .port
            .send_text_reply(request.chat_id, Some(request.message_id), ack)
            .await?;

        *entry = Some(TrackedRequest {
            user_id,
            text: text.to_string(),
            last_bot_reply: sent,
            timestamp: now,
        });

        Ok(decision)
    }
}

#[async_trait]
impl MessageHandler for DuplicateTracker {
    async fn handle(&self, msg: &InboundMessage) -> Result<()> {
        let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text.as_deref()) else {
            return Ok(());
        };
        let decision = self
            .observe(user.id, msg.reference(), text, Utc::now())
            .await?;
        debug!(
            chat_id = msg.chat.id.0,
            user_id = user.id.0,
            duplicate = matches!(decision, Decision::Duplicate { .. }),
            "request acknowledged"
        );
        Ok(())
    }
}

/// Periodically drop entries older than `max_age`.
///
/// An entry that old can only take the "window expired" branch, which acts
/// exactly like having no entry, so eviction does not change replies.
pub fn spawn_eviction_sweep(
    store: Arc<dyn RequestStore>,
    max_age: Duration,
    period: Duration,
) -> JoinHandle<()> {
    let max_age = to_chrono(max_age);
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = store.evict_older_than(Utc::now() - max_age).await;
            if evicted > 0 {
                info!(evicted, "evicted expired request entries");
            }
        }
    })
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or_else(|_| chrono::Duration::days(36_500))
}
