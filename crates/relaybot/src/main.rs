use std::sync::Arc;

use relaybot_core::config::Config;
use tracing::error;

mod health;

fn main() -> Result<(), relaybot_core::Error> {
    // Environment mutation has to happen before any runtime threads exist.
    dotenvy::dotenv().ok();

    relaybot_core::logging::init("relaybot")?;
    let cfg = Arc::new(Config::load()?);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cfg))
}

async fn run(cfg: Arc<Config>) -> Result<(), relaybot_core::Error> {
    let port = cfg.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            error!(error = %e, "health endpoint stopped");
        }
    });

    relaybot_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| relaybot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
