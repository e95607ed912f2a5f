//! Lead contract: how submitted values relate to a form's step schema.
//!
//! Leads are free-form snapshots keyed by field name. Nothing here changes
//! a lead; the checks only report.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use thiserror::Error;

use crate::field_types::ValueError;
use crate::models::{DynamicFieldSet, Step};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionProblem {
    #[error("'{name}' is required")]
    MissingRequired { name: String },

    #[error("'{name}': {reason}")]
    InvalidValue { name: String, reason: ValueError },
}

impl SubmissionProblem {
    pub fn field_name(&self) -> &str {
        match self {
            SubmissionProblem::MissingRequired { name }
            | SubmissionProblem::InvalidValue { name, .. } => name,
        }
    }
}

/// Field names declared anywhere in the schema, hidden fields included.
pub fn declared_names(steps: &[Step]) -> BTreeSet<&str> {
    steps
        .iter()
        .flat_map(|s| s.fields.iter())
        .map(|f| f.name.as_str())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Keys of a lead snapshot that no field of the schema declares.
///
/// Happens after a field is renamed or removed; older leads keep the old key.
pub fn undeclared_keys<'a>(values: &'a DynamicFieldSet, steps: &[Step]) -> Vec<&'a str> {
    let declared = declared_names(steps);
    values
        .values
        .keys()
        .map(String::as_str)
        .filter(|k| !declared.contains(k))
        .collect()
}

/// Check submitted values against the visible part of the schema.
///
/// Hidden steps and hidden fields are not rendered, so they are skipped.
/// Keys the schema does not declare are ignored. Problems are reported in
/// schema order.
pub fn check_submission(steps: &[Step], values: &BTreeMap<String, Value>) -> Vec<SubmissionProblem> {
    let mut problems = Vec::new();
    let visible = steps
        .iter()
        .filter(|s| s.visible)
        .flat_map(|s| s.fields.iter())
        .filter(|f| f.visible && !f.name.is_empty());

    for field in visible {
        match values.get(&field.name).filter(|v| !is_blank(v)) {
            None if field.required => problems.push(SubmissionProblem::MissingRequired {
                name: field.name.clone(),
            }),
            None => {}
            Some(value) => {
                if let Err(reason) = field.field_type.check_value(value, &field.options) {
                    problems.push(SubmissionProblem::InvalidValue {
                        name: field.name.clone(),
                        reason,
                    });
                }
            }
        }
    }
    problems
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::field_types::FieldType;
    use crate::models::Field;

    fn field(name: &str, field_type: FieldType, required: bool) -> Field {
        Field {
            label: name.to_uppercase(),
            name: name.into(),
            field_type,
            required,
            ..Field::default()
        }
    }

    fn schema() -> Vec<Step> {
        let mut owner = field("owner", FieldType::Radio, true);
        owner.options = vec!["Yes".into(), "No".into()];
        let mut hidden = field("campaign", FieldType::Text, true);
        hidden.visible = false;
        vec![
            Step {
                id: Some("s1".into()),
                step_title: "Basic Info".into(),
                fields: vec![
                    field("fullName", FieldType::Text, true),
                    field("email", FieldType::Email, true),
                    field("age", FieldType::Number, false),
                    hidden,
                ],
                ..Step::default()
            },
            Step {
                id: Some("s2".into()),
                step_title: "Ownership".into(),
                fields: vec![owner],
                ..Step::default()
            },
            Step {
                id: Some("s3".into()),
                step_title: "Internal".into(),
                visible: false,
                fields: vec![field("notes", FieldType::TextArea, true)],
                ..Step::default()
            },
        ]
    }

    fn values(v: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn complete_submission_has_no_problems() {
        let submitted = values(json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "owner": "Yes",
            "utm_source": "newsletter"
        }));
        assert!(check_submission(&schema(), &submitted).is_empty());
    }

    #[test]
    fn reports_missing_and_invalid_in_schema_order() {
        let submitted = values(json!({
            "fullName": "  ",
            "email": "not-an-email",
            "age": "forty",
            "owner": "Maybe"
        }));
        let problems = check_submission(&schema(), &submitted);
        let names: Vec<&str> = problems.iter().map(SubmissionProblem::field_name).collect();
        assert_eq!(names, vec!["fullName", "email", "age", "owner"]);
        assert_eq!(
            problems[0],
            SubmissionProblem::MissingRequired {
                name: "fullName".into()
            }
        );
        assert!(matches!(
            &problems[3],
            SubmissionProblem::InvalidValue {
                reason: ValueError::NotAnOption(v),
                ..
            } if v == "Maybe"
        ));
    }

    #[test]
    fn hidden_fields_and_steps_are_skipped() {
        let submitted = values(json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "owner": "No"
        }));
        let problems = check_submission(&schema(), &submitted);
        assert!(problems.is_empty(), "{problems:?}");
    }

    #[test]
    fn undeclared_keys_are_reported_not_removed() {
        let lead = DynamicFieldSet {
            form_title: "Valuation".into(),
            values: values(json!({
                "fullName": "Ada",
                "oldPhone": "0123",
                "notes": "hidden but declared"
            })),
        };
        assert_eq!(undeclared_keys(&lead, &schema()), vec!["oldPhone"]);
        assert_eq!(lead.values.len(), 3);
    }
}
