//! Scheduled broadcast fan-out.

use std::sync::Arc;

use {
    serenity::{all::ChannelId, http::Http},
    tokio::sync::RwLock,
    tracing::{error, info, warn},
};

use {
    rantcast_channels::BroadcastRegistry,
    rantcast_corpus::{RantStore, Strategy, select},
    rantcast_cron::BROADCAST_TZ,
};

use crate::render;

/// Deliver the scheduled rant to every granted channel.
///
/// Sends are independent and best effort: a failing channel is logged and
/// skipped, the rest still receive the rant. The registry is snapshotted up
/// front, so grants and denies landing mid-broadcast apply to the next one.
pub async fn broadcast(http: &Arc<Http>, store: &RantStore, registry: &RwLock<BroadcastRegistry>) {
    let entry = match select::pick(store.entries(), Strategy::DateIndexed, BROADCAST_TZ) {
        Ok(entry) => entry,
        Err(e) => {
            error!(error = %e, "scheduled broadcast aborted");
            return;
        },
    };

    let targets = registry.read().await.snapshot();
    if targets.is_empty() {
        info!("no granted channels, scheduled rant skipped");
        return;
    }

    info!(
        channels = targets.len(),
        date = %entry.date,
        "broadcasting scheduled rant"
    );
    for handle in targets {
        let channel = match handle.channel_id.parse::<u64>() {
            Ok(id) if id != 0 => ChannelId::new(id),
            _ => {
                warn!(channel = %handle.channel_id, "granted channel id is not a snowflake");
                continue;
            },
        };
        if let Err(e) = channel.send_message(http, render::rant_message(entry)).await {
            warn!(channel = %handle.channel_id, error = %e, "failed to deliver rant");
        }
    }
}
