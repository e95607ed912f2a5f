//! Steps and fields of a multi-step intake form.

use serde::{Deserialize, Deserializer, Serialize};

use super::{default_visible, null_as_default};
use crate::field_types::FieldType;

/// One input of a step.
///
/// `name` is the key the submitted value is stored under and must be unique
/// within its step; `label` is the caption shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub placeholder: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    /// Choice values. Only meaningful when `field_type.requires_options()`.
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Vec<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            label: String::new(),
            name: String::new(),
            field_type: FieldType::Text,
            placeholder: String::new(),
            required: false,
            options: Vec::new(),
            visible: true,
        }
    }
}

impl Field {
    /// Change the field's type. Options are dropped at once when the new
    /// type does not take them.
    pub fn set_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
        if !field_type.requires_options() {
            self.options.clear();
        }
    }

    pub fn toggle_required(&mut self) {
        self.required = !self.required;
    }

    /// Both `label` and `name` are filled in.
    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.name.trim().is_empty()
    }

    /// Copy of the field as it is sent to the API.
    pub fn normalized(&self) -> Field {
        let mut field = self.clone();
        if !field.field_type.requires_options() {
            field.options.clear();
        }
        field
    }
}

/// One page of a multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Assigned by the API on creation. `None` for a step not yet saved.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step_description: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            id: None,
            step_title: String::new(),
            step_description: String::new(),
            visible: true,
            fields: Vec::new(),
        }
    }
}

impl Step {
    /// Unsaved step holding one blank field.
    pub fn with_blank_field() -> Self {
        Self {
            fields: vec![Field::default()],
            ..Self::default()
        }
    }

    /// Persisted identity, or `None` for a step that was never saved.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_new(&self) -> bool {
        self.identity().is_none()
    }

    /// Request body for create/update, with options normalized.
    pub fn to_payload(&self) -> StepPayload {
        StepPayload {
            step_title: self.step_title.clone(),
            step_description: self.step_description.clone(),
            visible: self.visible,
            fields: self.fields.iter().map(Field::normalized).collect(),
        }
    }
}

/// Body of `POST /forms/form-steps/:formId` and
/// `PUT /forms/form-steps/:formId/:stepId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub step_title: String,
    #[serde(default)]
    pub step_description: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StepPayload {
    /// The step this payload describes once persisted under `id`.
    pub fn into_step(self, id: String) -> Step {
        Step {
            id: Some(id),
            step_title: self.step_title,
            step_description: self.step_description,
            visible: self.visible,
            fields: self.fields,
        }
    }
}

/// An option as stored on the wire: a bare string, or the older
/// `{ "value": ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
    Plain(String),
    Wrapped { value: String },
}

impl From<OptionEntry> for String {
    fn from(entry: OptionEntry) -> Self {
        match entry {
            OptionEntry::Plain(value) | OptionEntry::Wrapped { value } => value,
        }
    }
}

/// Flatten option entries of either shape into bare strings, keeping order.
pub fn normalize_options(entries: impl IntoIterator<Item = OptionEntry>) -> Vec<String> {
    entries.into_iter().map(String::from).collect()
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<OptionEntry>>::deserialize(deserializer)?;
    Ok(normalize_options(entries.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_field_has_documented_defaults() {
        let field = Field::default();
        assert_eq!(field.label, "");
        assert_eq!(field.name, "");
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.placeholder, "");
        assert!(!field.required);
        assert!(field.options.is_empty());
        assert!(field.visible);
    }

    #[test]
    fn switching_away_from_choice_type_clears_options() {
        let mut field = Field {
            field_type: FieldType::Select,
            options: vec!["A".into(), "B".into()],
            ..Field::default()
        };
        field.set_type(FieldType::Text);
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.options.is_empty());
    }

    #[test]
    fn switching_between_choice_types_keeps_options() {
        let mut field = Field {
            field_type: FieldType::Select,
            options: vec!["A".into(), "B".into()],
            ..Field::default()
        };
        field.set_type(FieldType::Radio);
        assert_eq!(field.options, vec!["A", "B"]);
    }

    #[test]
    fn legacy_option_objects_are_flattened() {
        let field: Field = serde_json::from_value(json!({
            "label": "Own a home?",
            "name": "ownsHome",
            "type": "radio",
            "options": [{"value": "Yes"}, "No"]
        }))
        .unwrap();
        assert_eq!(field.options, vec!["Yes", "No"]);
        assert!(field.visible);
    }

    #[test]
    fn null_attributes_read_as_defaults() {
        let step: Step = serde_json::from_value(json!({
            "_id": "s1",
            "stepTitle": "Basics",
            "stepDescription": null,
            "fields": [{"label": "Name", "name": "name", "type": "text",
                        "placeholder": null, "required": null, "options": null}]
        }))
        .unwrap();
        assert_eq!(step.step_description, "");
        assert_eq!(step.fields[0].placeholder, "");
        assert!(!step.fields[0].required);
        assert!(step.fields[0].options.is_empty());
    }

    #[test]
    fn payload_strips_stale_options() {
        let step = Step {
            step_title: "Contact".into(),
            fields: vec![Field {
                label: "Email".into(),
                name: "email".into(),
                field_type: FieldType::Email,
                options: vec!["left over".into()],
                ..Field::default()
            }],
            ..Step::default()
        };
        let payload = step.to_payload();
        assert!(payload.fields[0].options.is_empty());
    }

    #[test]
    fn payload_wire_shape() {
        let step = Step {
            id: Some("s9".into()),
            step_title: "Basic Info".into(),
            step_description: "Who are you".into(),
            visible: true,
            fields: vec![Field {
                label: "Full Name".into(),
                name: "fullName".into(),
                required: true,
                ..Field::default()
            }],
        };
        assert_eq!(
            serde_json::to_value(step.to_payload()).unwrap(),
            json!({
                "stepTitle": "Basic Info",
                "stepDescription": "Who are you",
                "visible": true,
                "fields": [{
                    "label": "Full Name",
                    "name": "fullName",
                    "type": "text",
                    "placeholder": "",
                    "required": true,
                    "options": [],
                    "visible": true
                }]
            })
        );
    }

    #[test]
    fn identity_decides_new_versus_edit() {
        assert!(Step::with_blank_field().is_new());
        let saved = Step {
            id: Some("abc".into()),
            ..Step::default()
        };
        assert!(!saved.is_new());
        let blank_id = Step {
            id: Some(String::new()),
            ..Step::default()
        };
        assert!(blank_id.is_new());
    }
}
