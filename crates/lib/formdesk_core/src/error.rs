//! Error types for the form catalog and step builder.

use thiserror::Error;

use crate::field_types::FieldType;

/// Message shown when an operation fails without a usable server message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Convenience alias for fallible core operations.
pub type Result<T> = core::result::Result<T, FormError>;

/// Local validation failures. Raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Form title is required")]
    MissingFormTitle,

    #[error("Step title is required")]
    MissingStepTitle,

    /// One or more fields lack a label or a name. Holds the zero-based
    /// positions of the offending fields.
    #[error("All fields must have a label and a name")]
    IncompleteFields(Vec<usize>),

    #[error("Field name '{0}' is used more than once in this step")]
    DuplicateFieldName(String),
}

impl ValidationError {
    /// Input the error is attached to, for errors that belong to one input.
    pub fn input(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingFormTitle => Some("formTitle"),
            ValidationError::MissingStepTitle => Some("stepTitle"),
            ValidationError::IncompleteFields(_) | ValidationError::DuplicateFieldName(_) => None,
        }
    }
}

/// Failures reported by a [`crate::backend::FormsBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl BackendError {
    /// Message supplied by the server, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { message, .. } => message.as_deref(),
            BackendError::NotFound(_) | BackendError::Transport(_) | BackendError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

/// Errors raised by catalog, builder and navigation operations.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("A save for {0} is already in progress")]
    SaveInFlight(String),

    #[error("No step is open for editing")]
    NoOpenStep,

    #[error("Step index {index} is out of range ({len} steps)")]
    StepIndexOutOfRange { index: usize, len: usize },

    #[error("Field index {index} is out of range ({len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    #[error("Option index {index} is out of range ({len} options)")]
    OptionIndexOutOfRange { index: usize, len: usize },

    #[error("Field type '{0}' does not take options")]
    OptionsNotSupported(FieldType),

    #[error("Invalid navigation: {0}")]
    InvalidTransition(String),

    #[error("Missing identity: {0}")]
    MissingIdentity(String),
}

impl FormError {
    /// Text for the transient notification shown to the admin.
    ///
    /// Validation errors show their own message; backend rejections show the
    /// server's message when present. Everything else from the backend falls
    /// back to [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(e) => e.to_string(),
            FormError::Backend(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }
}
