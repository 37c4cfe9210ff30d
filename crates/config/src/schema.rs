//! Config schema types.

use std::path::PathBuf;

use {
    secrecy::Secret,
    serde::Deserialize,
};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RantcastConfig {
    pub discord: DiscordConfig,
    pub corpus: CorpusConfig,
    pub schedule: ScheduleConfig,
}

impl RantcastConfig {
    /// Resolve the bot token from config or the `DISCORD_TOKEN` environment
    /// variable.
    #[must_use]
    pub fn discord_token(&self) -> Option<Secret<String>> {
        if let Some(token) = &self.discord.token {
            return Some(token.clone());
        }
        std::env::var("DISCORD_TOKEN").ok().map(Secret::new)
    }
}

/// Discord connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token. Usually supplied via `DISCORD_TOKEN` instead; a literal
    /// value here supports `${VAR}` substitution.
    pub token: Option<Secret<String>>,
    /// Command prefix.
    pub prefix: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            prefix: "?".into(),
        }
    }
}

/// Corpus resource location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Path to the JSON corpus resource.
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: "assets/rants.json".into(),
        }
    }
}

/// Boot-time broadcast schedule override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Six-field cron expression used until `settime` changes it.
    /// Unset means the built-in 07:00 daily default.
    pub expr: Option<String>,
}
