use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid schedule '{expr}': {reason}")]
    InvalidSchedule { expr: String, reason: String },

    #[error("schedule '{expr}' has no future occurrence")]
    Exhausted { expr: String },
}

impl Error {
    #[must_use]
    pub fn invalid_schedule(expr: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSchedule {
            expr: expr.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn exhausted(expr: impl Into<String>) -> Self {
        Self::Exhausted { expr: expr.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
