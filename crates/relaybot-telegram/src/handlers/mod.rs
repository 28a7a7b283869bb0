//! Telegram update handlers.
//!
//! Messages and channel posts both land here; the core route table decides
//! what runs.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::trace;

use crate::{convert::inbound_from_message, router::AppState};

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let inbound = inbound_from_message(&msg, state.me);
    let ran = state.routes.dispatch(&inbound).await;
    if ran == 0 {
        trace!(
            chat_id = msg.chat.id.0,
            message_id = msg.id.0,
            "no route matched"
        );
    }
    Ok(())
}
