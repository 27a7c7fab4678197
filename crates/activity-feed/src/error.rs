use thiserror::Error;

use crate::EntryId;

/// Errors produced while loading or rendering the activity feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request to the logs endpoint failed (transport error or non-2xx status).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body or a fixture file was not a valid list of log records.
    #[error("invalid log payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A sprint-completion record carried an object that is not the expected JSON.
    #[error("log {id} has a malformed sprint object: {source}")]
    SprintObject {
        id: EntryId,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The replay server could not bind its address.
    #[error("failed to bind replay server to {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

impl FeedError {
    pub(crate) fn http(url: impl Into<String>, source: ureq::Error) -> Self {
        FeedError::Http {
            url: url.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
