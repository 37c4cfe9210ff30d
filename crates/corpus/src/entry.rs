//! Corpus record types.

use serde::{Deserialize, Serialize};

/// Rough subject classification carried by every corpus record.
///
/// Serialized as the single-letter codes used by the corpus resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "C")]
    Code,
    #[serde(rename = "P")]
    Personal,
    #[serde(rename = "B")]
    Both,
    #[serde(rename = "U")]
    Unsure,
}

impl Category {
    /// Human-readable label for replies and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Personal => "personal",
            Self::Both => "code & personal",
            Self::Unsure => "unsure",
        }
    }
}

/// A single rant. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RantEntry {
    /// Calendar date the rant was originally delivered.
    pub date: String,
    /// Where it was delivered (attribution line).
    pub source: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub text: String,
}
