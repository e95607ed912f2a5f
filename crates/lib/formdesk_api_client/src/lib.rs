//! # formdesk_api_client
//!
//! HTTP client for the forms REST API. [`ApiClient`] implements
//! [`formdesk_core::backend::FormsBackend`], so the console and the CLI can
//! run against a live server the same way they run against the in-memory
//! backend.

mod client;
pub mod config;
mod envelope;
pub mod error;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
