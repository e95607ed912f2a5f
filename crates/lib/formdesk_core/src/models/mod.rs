//! Domain models for forms, steps, fields and lead records.
//!
//! Field names follow the REST API's camelCase wire format; identities
//! assigned by the persistence layer are carried as `_id`.

pub mod form;
pub mod lead;
pub mod step;

pub use form::{FormDefinition, NewForm};
pub use lead::{DynamicFieldSet, LeadRecord, LeadStatus};
pub use step::{Field, Step, StepPayload};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (the API sends `null` for
/// blank optional text).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn default_visible() -> bool {
    true
}
