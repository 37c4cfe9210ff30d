//! Client bootstrap: wiring the corpus, registry, and scheduler to the
//! gateway.

use std::sync::{Arc, OnceLock};

use {
    serenity::{all::Client, http::Http},
    tokio::sync::RwLock,
    tracing::warn,
};

use {
    rantcast_channels::BroadcastRegistry,
    rantcast_corpus::RantStore,
    rantcast_cron::{BroadcastFn, RantScheduler},
};

use crate::{broadcast, error::Result, handler::RantHandler};

/// Build the scheduler + handler pair and run the client until it exits.
///
/// The scheduler is armed by the handler on the gateway `ready` event, so
/// no broadcast can fire before the connection is authenticated.
pub async fn run_bot(
    token: &str,
    prefix: String,
    schedule_expr: &str,
    store: Arc<RantStore>,
) -> Result<()> {
    let registry = Arc::new(RwLock::new(BroadcastRegistry::new()));

    // The fire callback needs the HTTP client, which only exists once the
    // serenity client is built; the slot is filled right after.
    let http_slot: Arc<OnceLock<Arc<Http>>> = Arc::new(OnceLock::new());

    let on_fire: BroadcastFn = {
        let http_slot = Arc::clone(&http_slot);
        let store = Arc::clone(&store);
        let registry = Arc::clone(&registry);
        Arc::new(move || {
            let http = http_slot.get().cloned();
            let store = Arc::clone(&store);
            let registry = Arc::clone(&registry);
            Box::pin(async move {
                match http {
                    Some(http) => broadcast::broadcast(&http, &store, &registry).await,
                    None => warn!("broadcast fired before the gateway client existed"),
                }
            })
        })
    };

    let scheduler = RantScheduler::with_expr(schedule_expr, on_fire)?;
    let handler = RantHandler::new(prefix, store, registry, Arc::clone(&scheduler));

    let mut client = Client::builder(token, RantHandler::intents())
        .event_handler(handler)
        .await?;
    let _ = http_slot.set(Arc::clone(&client.http));

    let result = client.start().await;
    scheduler.stop().await;
    result.map_err(Into::into)
}
