//! The authoritative set of channels granted to receive broadcasts.

use {
    serde::{Deserialize, Serialize},
    tracing::debug,
};

/// Opaque platform identity of a grantable channel.
///
/// The registry never interprets the ids; equality of entries is by
/// `channel_id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHandle {
    pub channel_id: String,
    /// The guild/community the channel belongs to, kept for listing.
    pub guild_id: String,
}

/// Ordered, id-unique set of granted channels.
#[derive(Debug, Default)]
pub struct BroadcastRegistry {
    granted: Vec<ChannelHandle>,
}

impl BroadcastRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel, preserving grant order.
    ///
    /// Returns `false` without modifying anything when the channel id is
    /// already granted.
    pub fn grant(&mut self, handle: ChannelHandle) -> bool {
        if self
            .granted
            .iter()
            .any(|h| h.channel_id == handle.channel_id)
        {
            return false;
        }
        debug!(channel = %handle.channel_id, guild = %handle.guild_id, "channel granted");
        self.granted.push(handle);
        true
    }

    /// Remove a channel by id. Returns `false` when it was not granted.
    ///
    /// Matches on channel id alone; snowflake ids are globally unique, so
    /// guild scoping adds nothing.
    pub fn deny(&mut self, channel_id: &str) -> bool {
        let before = self.granted.len();
        self.granted.retain(|h| h.channel_id != channel_id);
        let removed = self.granted.len() != before;
        if removed {
            debug!(channel = %channel_id, "channel denied");
        }
        removed
    }

    /// Granted channels of one guild, in grant order.
    #[must_use]
    pub fn for_guild(&self, guild_id: &str) -> Vec<ChannelHandle> {
        self.granted
            .iter()
            .filter(|h| h.guild_id == guild_id)
            .cloned()
            .collect()
    }

    /// Full copy of the granted set, for the broadcast fan-out.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ChannelHandle> {
        self.granted.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}
