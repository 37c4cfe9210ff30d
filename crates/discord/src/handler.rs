//! Gateway event handler: readiness gating and command dispatch.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use {
    chrono::Utc,
    serenity::{
        all::{
            ChannelType, Context, CreateMessage, EditMessage, EventHandler, GatewayIntents,
            Message, Permissions, Ready,
        },
        async_trait,
    },
    tokio::sync::RwLock,
    tracing::{debug, error, info, warn},
};

use {
    rantcast_channels::{BroadcastRegistry, ChannelHandle},
    rantcast_corpus::{RantStore, Strategy, select},
    rantcast_cron::{BROADCAST_TZ, RantScheduler},
};

use crate::{
    commands::{self, Command},
    render,
};

/// Holding any one of these is enough to manage the broadcast set and
/// schedule.
const BROADCAST_CAPS: Permissions = Permissions::MANAGE_CHANNELS
    .union(Permissions::MANAGE_MESSAGES)
    .union(Permissions::KICK_MEMBERS);

const NOT_ALLOWED: &str =
    "You need Manage Channels, Manage Messages, or Kick Members to do that.";
const GUILD_ONLY: &str = "That only works in a guild text channel.";

/// Discord epoch (2015-01-01T00:00:00Z), for snowflake timestamps.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Handler for gateway events.
///
/// Stateless between events; everything mutable is shared with the
/// scheduled broadcast through the registry and scheduler.
pub struct RantHandler {
    prefix: String,
    store: Arc<RantStore>,
    registry: Arc<RwLock<BroadcastRegistry>>,
    scheduler: Arc<RantScheduler>,
    started: AtomicBool,
}

impl RantHandler {
    #[must_use]
    pub fn new(
        prefix: String,
        store: Arc<RantStore>,
        registry: Arc<RwLock<BroadcastRegistry>>,
        scheduler: Arc<RantScheduler>,
    ) -> Self {
        Self {
            prefix,
            store,
            registry,
            scheduler,
            started: AtomicBool::new(false),
        }
    }

    /// Gateway intents the bot needs.
    #[must_use]
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for RantHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot = %ready.user.name,
            guilds = ready.guilds.len(),
            "connected to discord"
        );

        // The gateway re-emits ready after reconnects; the trigger must
        // only be armed once.
        if !self.started.swap(true, Ordering::SeqCst) {
            self.scheduler.start().await;
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(command) = commands::parse(&self.prefix, &msg.content) else {
            return;
        };
        debug!(command = ?command, channel = %msg.channel_id, "dispatching command");
        self.dispatch(&ctx, &msg, command).await;
    }
}

impl RantHandler {
    async fn dispatch(&self, ctx: &Context, msg: &Message, command: Command) {
        match command {
            Command::Rant { today } => self.cmd_rant(ctx, msg, today).await,
            Command::Grant => self.cmd_grant(ctx, msg).await,
            Command::GrantList => self.cmd_grant_list(ctx, msg).await,
            Command::Deny => self.cmd_deny(ctx, msg).await,
            Command::SetTime { expr } => self.cmd_settime(ctx, msg, &expr).await,
            Command::Ping => self.cmd_ping(ctx, msg).await,
            Command::Help => self.send(ctx, msg, render::help_message(&self.prefix)).await,
        }
    }

    async fn cmd_rant(&self, ctx: &Context, msg: &Message, today: bool) {
        let strategy = if today {
            Strategy::DateIndexed
        } else {
            Strategy::Random
        };
        match select::pick(self.store.entries(), strategy, BROADCAST_TZ) {
            Ok(entry) => self.send(ctx, msg, render::rant_message(entry)).await,
            Err(e) => {
                error!(error = %e, "rant selection failed");
                self.say(ctx, msg, "The rant archive is unavailable right now.")
                    .await;
            },
        }
    }

    async fn cmd_grant(&self, ctx: &Context, msg: &Message) {
        let Some(handle) = guild_text_channel(ctx, msg) else {
            self.say(ctx, msg, GUILD_ONLY).await;
            return;
        };
        if !has_broadcast_capability(ctx, msg).await {
            self.say(ctx, msg, NOT_ALLOWED).await;
            return;
        }

        let granted = self.registry.write().await.grant(handle);
        let text = if granted {
            "This channel will now receive scheduled rants."
        } else {
            "This channel is already on the rant schedule."
        };
        self.say(ctx, msg, text).await;
    }

    async fn cmd_grant_list(&self, ctx: &Context, msg: &Message) {
        let Some(guild_id) = msg.guild_id else {
            self.say(ctx, msg, GUILD_ONLY).await;
            return;
        };
        let channels = self
            .registry
            .read()
            .await
            .for_guild(&guild_id.to_string());
        self.send(ctx, msg, render::grant_list_message(&channels))
            .await;
    }

    async fn cmd_deny(&self, ctx: &Context, msg: &Message) {
        if msg.guild_id.is_none() {
            self.say(ctx, msg, GUILD_ONLY).await;
            return;
        }
        if !has_broadcast_capability(ctx, msg).await {
            self.say(ctx, msg, NOT_ALLOWED).await;
            return;
        }

        let removed = self
            .registry
            .write()
            .await
            .deny(&msg.channel_id.to_string());
        let text = if removed {
            "This channel will no longer receive scheduled rants."
        } else {
            "This channel was not on the rant schedule."
        };
        self.say(ctx, msg, text).await;
    }

    async fn cmd_settime(&self, ctx: &Context, msg: &Message, expr: &str) {
        if !has_broadcast_capability(ctx, msg).await {
            self.say(ctx, msg, NOT_ALLOWED).await;
            return;
        }

        match self.scheduler.reconfigure(expr).await {
            Ok(next) => {
                let text = format!(
                    "Broadcast schedule updated; next rant at {}.",
                    next.format("%Y-%m-%d %H:%M:%S %Z")
                );
                self.say(ctx, msg, text).await;
            },
            Err(e) => self.say(ctx, msg, e.to_string()).await,
        }
    }

    async fn cmd_ping(&self, ctx: &Context, msg: &Message) {
        // Gateway-event latency from the message snowflake.
        let created_ms = (msg.id.get() >> 22) + DISCORD_EPOCH_MS;
        let event_ms = (Utc::now().timestamp_millis() as u64).saturating_sub(created_ms);

        let started = std::time::Instant::now();
        match msg.channel_id.say(&ctx.http, "Pong!").await {
            Ok(mut pong) => {
                let rest_ms = started.elapsed().as_millis();
                let text = format!(
                    "Pong! REST round-trip {rest_ms} ms · gateway event {event_ms} ms."
                );
                if let Err(e) = pong.edit(ctx, EditMessage::new().content(text)).await {
                    warn!(error = %e, "failed to edit pong");
                }
            },
            Err(e) => warn!(error = %e, "failed to send pong"),
        }
    }

    // ── Reply plumbing ──────────────────────────────────────────────────

    async fn say(&self, ctx: &Context, msg: &Message, text: impl Into<String>) {
        if let Err(e) = msg.channel_id.say(&ctx.http, text.into()).await {
            warn!(channel = %msg.channel_id, error = %e, "failed to send reply");
        }
    }

    async fn send(&self, ctx: &Context, msg: &Message, message: CreateMessage) {
        if let Err(e) = msg.channel_id.send_message(&ctx.http, message).await {
            warn!(channel = %msg.channel_id, error = %e, "failed to send reply");
        }
    }
}

/// The invoking channel as a broadcast handle, if it is a persistent guild
/// text channel. Threads, voice channels, and DMs do not qualify.
fn guild_text_channel(ctx: &Context, msg: &Message) -> Option<ChannelHandle> {
    let guild = msg.guild(&ctx.cache)?;
    let channel = guild.channels.get(&msg.channel_id)?;
    if channel.kind != ChannelType::Text {
        return None;
    }
    Some(ChannelHandle {
        channel_id: msg.channel_id.to_string(),
        guild_id: guild.id.to_string(),
    })
}

/// Whether the caller may manage the broadcast set and schedule.
///
/// Resolves the member's effective permissions in the invoking channel from
/// the cached guild; outside a guild, or when resolution fails, nothing is
/// granted.
async fn has_broadcast_capability(ctx: &Context, msg: &Message) -> bool {
    let Some(guild_id) = msg.guild_id else {
        return false;
    };
    let member = match guild_id.member(ctx, msg.author.id).await {
        Ok(member) => member,
        Err(e) => {
            warn!(user = %msg.author.id, error = %e, "failed to resolve member");
            return false;
        },
    };

    let Some(guild) = msg.guild(&ctx.cache) else {
        return false;
    };
    let Some(channel) = guild.channels.get(&msg.channel_id) else {
        return false;
    };
    guild
        .user_permissions_in(channel, &member)
        .intersects(BROADCAST_CAPS)
}
