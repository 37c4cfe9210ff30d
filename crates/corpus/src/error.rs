use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read corpus at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("corpus contains no entries")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, Error>;
