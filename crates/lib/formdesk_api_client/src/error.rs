//! Client construction errors.
//!
//! Request failures are reported as [`formdesk_core::BackendError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL cannot be used as a base: {0}")]
    NotABase(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
