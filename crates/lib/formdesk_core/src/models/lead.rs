//! Lead records produced by submitted intake forms.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Processing state of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    Pending,
    Complete,
    /// Rejected or archived; the API has used both spellings.
    #[serde(rename = "Reject", alias = "Archive", alias = "Reject/Archive")]
    Rejected,
}

/// Values submitted through one form.
///
/// `values` is a free-form snapshot keyed by field `name` at the time of
/// submission. Keys are not checked against the form's current fields:
/// forms change after leads arrive, and old leads keep their old keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldSet {
    pub form_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub unique_id: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profit: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dynamic_fields: Vec<DynamicFieldSet>,
    /// References to partner records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub partner_ids: Vec<String>,
    /// References to lead type records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub lead_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl LeadRecord {
    /// Values submitted through the form titled `form_title`.
    pub fn values_for(&self, form_title: &str) -> Option<&DynamicFieldSet> {
        self.dynamic_fields
            .iter()
            .find(|set| set.form_title == form_title)
    }
}
