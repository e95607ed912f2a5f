use std::path::PathBuf;

use formdesk_api_client::ClientError;
use formdesk_core::FormError;
use formdesk_core::field_types::UnknownFieldType;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },

    #[error("Json::{}", .0)]
    Json(#[from] serde_json::Error),

    #[error("Yaml::{}", .0)]
    Yaml(#[from] serde_yaml::Error),

    #[error("{}", .0)]
    Client(#[from] ClientError),

    #[error("{}", .0.user_message())]
    Form(#[from] FormError),

    #[error("{}", .0)]
    FieldType(#[from] UnknownFieldType),
}
