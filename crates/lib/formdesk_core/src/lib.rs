//! # formdesk_core
//!
//! Core domain logic for Formdesk: the form catalog, the step sequence
//! builder, the field type registry and the lead record contract.
//!
//! Everything that talks to the REST API goes through the
//! [`backend::FormsBackend`] trait; [`memory::MemoryBackend`] is an
//! in-process implementation of it.

pub mod backend;
pub mod builder;
pub mod catalog;
pub mod console;
pub mod error;
pub mod field_types;
pub mod ids;
pub mod lead;
pub mod memory;
pub mod models;
pub mod navigation;
pub mod single_flight;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BackendError, FormError, Result, ValidationError};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
