//! Form catalog entries.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A registered intake form, as listed by `GET /form-select`.
///
/// Older records name the title and description `formName` and
/// `description`; both spellings are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Persisted identity. Handed to the step builder.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Slug derived from the title at creation time.
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_id: String,
    /// Sequential number, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_number: Option<u64>,
    #[serde(alias = "formName")]
    pub form_title: String,
    #[serde(default, alias = "description", deserialize_with = "null_as_default")]
    pub form_description: String,
}

/// Body of `POST /form-select`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewForm {
    pub form_id: String,
    pub form_title: String,
    pub form_description: String,
}

impl FormDefinition {
    /// Persisted identity, or `None` for an entry that was never saved.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_current_shape() {
        let form: FormDefinition = serde_json::from_value(json!({
            "_id": "65f0c1",
            "formId": "contact-us",
            "formNumber": 3,
            "formTitle": "Contact Us",
            "formDescription": "General enquiries"
        }))
        .unwrap();
        assert_eq!(form.identity(), Some("65f0c1"));
        assert_eq!(form.form_id, "contact-us");
        assert_eq!(form.form_number, Some(3));
        assert_eq!(form.form_title, "Contact Us");
        assert_eq!(form.form_description, "General enquiries");
    }

    #[test]
    fn reads_legacy_naming() {
        let form: FormDefinition = serde_json::from_value(json!({
            "_id": "65f0c2",
            "formName": "Valuation",
            "description": null
        }))
        .unwrap();
        assert_eq!(form.form_title, "Valuation");
        assert_eq!(form.form_description, "");
        assert_eq!(form.form_id, "");
    }

    #[test]
    fn empty_identity_counts_as_missing() {
        let form = FormDefinition {
            id: Some(String::new()),
            form_id: "x".into(),
            form_number: None,
            form_title: "X".into(),
            form_description: String::new(),
        };
        assert_eq!(form.identity(), None);
    }

    #[test]
    fn new_form_wire_shape() {
        let body = NewForm {
            form_id: "contact-us".into(),
            form_title: "Contact Us".into(),
            form_description: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"formId": "contact-us", "formTitle": "Contact Us", "formDescription": ""})
        );
    }
}
