//! Explicit (predicate, handler) routing for inbound messages.
//!
//! Every route whose predicate matches runs, in table order. A failing
//! handler is logged and does not stop the routes after it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::{
    admin_save::SaveFlow,
    commands::StaticReply,
    config::Config,
    messaging::{
        port::PlatformPort,
        types::{ChatKind, InboundMessage},
    },
    republish::RepublishFlow,
    sanitize::CaptionSanitizer,
    tracker::{DuplicateTracker, RequestStore},
    Result,
};

#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, msg: &InboundMessage) -> Result<()>;
}

pub type Predicate = Box<dyn Fn(&InboundMessage) -> bool + Send + Sync>;

pub struct Route {
    pub name: &'static str,
    predicate: Predicate,
    handler: Arc<dyn MessageHandler>,
}

impl Route {
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&InboundMessage) -> bool + Send + Sync + 'static,
        handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            handler,
        }
    }

    pub fn matches(&self, msg: &InboundMessage) -> bool {
        (self.predicate)(msg)
    }
}

pub struct Routes {
    routes: Vec<Route>,
}

impl Routes {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Names of the routes `msg` would run, in order.
    pub fn matching(&self, msg: &InboundMessage) -> Vec<&'static str> {
        self.routes
            .iter()
            .filter(|r| r.matches(msg))
            .map(|r| r.name)
            .collect()
    }

    /// Run every matching route. Returns how many ran.
    pub async fn dispatch(&self, msg: &InboundMessage) -> usize {
        let mut ran = 0;
        for route in self.routes.iter().filter(|r| r.matches(msg)) {
            ran += 1;
            if let Err(e) = route.handler.handle(msg).await {
                warn!(
                    route = route.name,
                    chat_id = msg.chat.id.0,
                    message_id = msg.message_id.0,
                    error = %e,
                    "handler failed"
                );
            }
        }
        ran
    }
}

/// The bot's route table: `start`, `help`, `republish`, `save`, `tracker`.
pub fn build_routes(
    cfg: &Config,
    port: Arc<dyn PlatformPort>,
    store: Arc<dyn RequestStore>,
) -> Routes {
    let sanitizer = Arc::new(CaptionSanitizer::new(cfg.keep_username.clone()));
    let republish = Arc::new(RepublishFlow::new(port.clone(), sanitizer));
    let save = Arc::new(SaveFlow::new(port.clone(), cfg));
    let tracker = Arc::new(DuplicateTracker::new(
        port.clone(),
        store,
        cfg.duplicate_window,
    ));

    let channels = cfg.killme_channels.clone();
    let groups = cfg.replybot_groups.clone();
    let excluded = cfg.group_excluded_ids.clone();
    let claims_save = {
        let save = save.clone();
        move |m: &InboundMessage| {
            m.chat.is_group()
                && m.reply_to.is_some()
                && m.text.as_deref().is_some_and(|t| save.is_trigger(t))
        }
    };
    let tracker_claims_save = claims_save.clone();

    Routes::new(vec![
        Route::new(
            "start",
            |m| private_command(m, "start"),
            Arc::new(StaticReply::start(port.clone())),
        ),
        Route::new(
            "help",
            |m| private_command(m, "help"),
            Arc::new(StaticReply::help(port.clone())),
        ),
        Route::new(
            "republish",
            move |m| {
                m.chat.kind == ChatKind::Channel
                    && !m.from_self
                    && channels.contains(&m.chat.id.0)
            },
            republish,
        ),
        Route::new("save", claims_save, save),
        Route::new(
            "tracker",
            move |m| {
                m.chat.is_group()
                    && groups.contains(&m.chat.id.0)
                    && m.text.is_some()
                    && !m.is_command()
                    // The save flow deletes its trigger; don't acknowledge it too.
                    && !tracker_claims_save(m)
                    // Auto-forwards from the linked channel.
                    && m.sender_chat != Some(m.chat.id)
                    && m
                        .from
                        .as_ref()
                        .is_some_and(|u| !excluded.contains(&u.id.0))
            },
            tracker,
        ),
    ])
}

fn private_command(msg: &InboundMessage, name: &str) -> bool {
    msg.chat.kind == ChatKind::Private && msg.command_name().as_deref() == Some(name)
}
