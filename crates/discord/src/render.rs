//! Reply and broadcast rendering.

use serenity::all::{CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp};

use {rantcast_channels::ChannelHandle, rantcast_corpus::RantEntry};

/// Accent colour for rant embeds.
const RANT_COLOUR: u32 = 0xE74C3C;
/// Muted colour for informational embeds.
const INFO_COLOUR: u32 = 0x95A5A6;

/// Render a rant as an embed message.
#[must_use]
pub fn rant_message(entry: &RantEntry) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title(format!("Rant of the day · {}", entry.category.label()))
        .description(entry.text.clone())
        .footer(CreateEmbedFooter::new(format!(
            "{} · {}",
            entry.source, entry.date
        )))
        .colour(RANT_COLOUR)
        .timestamp(Timestamp::now());
    CreateMessage::new().embed(embed)
}

/// Render the granted-channel listing for one guild.
#[must_use]
pub fn grant_list_message(channels: &[ChannelHandle]) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("Channels on the rant schedule")
        .description(grant_list_description(channels))
        .colour(INFO_COLOUR);
    CreateMessage::new().embed(embed)
}

/// Render the help listing.
#[must_use]
pub fn help_message(prefix: &str) -> CreateMessage {
    let mut embed = CreateEmbed::new()
        .title("rantcast commands")
        .colour(INFO_COLOUR);
    for (usage, what) in help_entries(prefix) {
        embed = embed.field(usage, what, false);
    }
    CreateMessage::new().embed(embed)
}

fn grant_list_description(channels: &[ChannelHandle]) -> String {
    if channels.is_empty() {
        return "No channels in this guild receive scheduled rants.".into();
    }
    channels
        .iter()
        .map(|h| format!("<#{}>", h.channel_id))
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_entries(prefix: &str) -> Vec<(String, String)> {
    vec![
        (
            format!("{prefix}rant [today]"),
            "Post a rant here: random, or today's with `today`.".into(),
        ),
        (
            format!("{prefix}grant"),
            "Add this channel to the scheduled broadcast.".into(),
        ),
        (
            format!("{prefix}grant list"),
            "List this guild's granted channels.".into(),
        ),
        (
            format!("{prefix}deny"),
            "Remove this channel from the scheduled broadcast.".into(),
        ),
        (
            format!("{prefix}settime <6-field cron>"),
            "Change the broadcast schedule, e.g. `0 0 7 * * *`.".into(),
        ),
        (format!("{prefix}ping"), "Latency report.".into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(channel: &str) -> ChannelHandle {
        ChannelHandle {
            channel_id: channel.into(),
            guild_id: "g".into(),
        }
    }

    #[test]
    fn empty_grant_list_says_so() {
        let text = grant_list_description(&[]);
        assert!(text.contains("No channels"));
    }

    #[test]
    fn grant_list_mentions_each_channel_in_order() {
        let text = grant_list_description(&[handle("11"), handle("22")]);
        assert_eq!(text, "<#11>\n<#22>");
    }

    #[test]
    fn help_covers_every_command() {
        let entries = help_entries("?");
        let usages: Vec<_> = entries.iter().map(|(usage, _)| usage.as_str()).collect();
        for expected in ["?rant", "?grant", "?grant list", "?deny", "?settime", "?ping"] {
            assert!(
                usages.iter().any(|u| u.starts_with(expected)),
                "missing {expected}"
            );
        }
    }
}
