use thiserror::Error;

/// Errors surfaced by linkstat-core.
///
/// Only retrieval and selector parsing can fail. The aggregation pipeline
/// itself resolves every degenerate input to an empty result.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid {kind} '{value}' (expected {expected})")]
    InvalidSelector {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
