use std::{convert::Infallible, sync::Arc};

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use relaybot_core::{
    config::Config,
    messaging::port::PlatformPort,
    routes::{build_routes, Routes},
    tracker::{spawn_eviction_sweep, InMemoryStore, RequestStore},
};

use crate::handlers;
use crate::TelegramPlatform;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub routes: Arc<Routes>,
    /// The bot's own user id, to skip its own posts.
    pub me: teloxide::types::UserId,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let me = bot.get_me().await?;
    info!(username = me.username(), "relaybot started");
    info!(
        channels = cfg.killme_channels.len(),
        groups = cfg.replybot_groups.len(),
        excluded_users = cfg.group_excluded_ids.len(),
        "monitoring"
    );

    let platform: Arc<dyn PlatformPort> = Arc::new(TelegramPlatform::new(bot.clone()));
    let store: Arc<dyn RequestStore> = Arc::new(InMemoryStore::new());
    if let Some(period) = cfg.tracker_sweep_interval {
        spawn_eviction_sweep(store.clone(), cfg.duplicate_window, period);
    }

    let state = Arc::new(AppState {
        routes: Arc::new(build_routes(&cfg, platform, store)),
        cfg,
        me: me.id,
    });

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_channel_post().endpoint(handlers::handle_message));

    // No per-chat serialization: every update gets its own task. The tracker
    // does its own per-user locking.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .distribution_function(|_| None::<Infallible>)
        .build()
        .dispatch()
        .await;

    Ok(())
}
