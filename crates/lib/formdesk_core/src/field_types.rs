//! Field type registry.
//!
//! Enumerates the field kinds a step can hold, which of them carry an
//! option list, and how the runtime form renders and checks each kind.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Kind of a form field. Serialized with the wire names used by the API
/// (`"text"`, `"textArea"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Date,
    TextArea,
    Select,
    Dropdown,
    Checkbox,
    Radio,
    File,
}

/// Widget the runtime form uses for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Single-line `<input>` with the given HTML input type.
    SingleLine(&'static str),
    MultiLine,
    /// One value picked from a list (select, dropdown).
    ChoiceList,
    /// One value picked from a group of radio buttons.
    RadioGroup,
    /// Any number of values ticked from a group of checkboxes.
    CheckboxGroup,
    Upload,
}

/// Why a submitted value is not acceptable for a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected a text value")]
    NotText,

    #[error("'{0}' is not an email address")]
    NotEmail(String),

    #[error("'{0}' is not a number")]
    NotNumber(String),

    #[error("'{0}' is not a date (YYYY-MM-DD)")]
    NotDate(String),

    #[error("'{0}' is not one of the options")]
    NotAnOption(String),

    #[error("only one value may be chosen")]
    MultipleValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FieldType {
    pub const ALL: &[FieldType] = &[
        FieldType::Text,
        FieldType::Email,
        FieldType::Number,
        FieldType::Date,
        FieldType::TextArea,
        FieldType::Select,
        FieldType::Dropdown,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::File,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::TextArea => "textArea",
            FieldType::Select => "select",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::File => "file",
        }
    }

    /// Whether fields of this type carry an option list.
    pub fn requires_options(self) -> bool {
        match self {
            FieldType::Select | FieldType::Dropdown | FieldType::Checkbox | FieldType::Radio => {
                true
            }
            FieldType::Text
            | FieldType::Email
            | FieldType::Number
            | FieldType::Date
            | FieldType::TextArea
            | FieldType::File => false,
        }
    }

    /// Whether a placeholder is rendered for this type.
    pub fn supports_placeholder(self) -> bool {
        !matches!(self, FieldType::Checkbox | FieldType::Radio)
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FieldType::Text => InputKind::SingleLine("text"),
            FieldType::Email => InputKind::SingleLine("email"),
            FieldType::Number => InputKind::SingleLine("number"),
            FieldType::Date => InputKind::SingleLine("date"),
            FieldType::TextArea => InputKind::MultiLine,
            FieldType::Select | FieldType::Dropdown => InputKind::ChoiceList,
            FieldType::Radio => InputKind::RadioGroup,
            FieldType::Checkbox => InputKind::CheckboxGroup,
            FieldType::File => InputKind::Upload,
        }
    }

    /// Check a submitted value against this type and the field's options.
    ///
    /// `Null` is accepted here; presence of required values is checked by
    /// the caller.
    pub fn check_value(self, value: &Value, options: &[String]) -> Result<(), ValueError> {
        if value.is_null() {
            return Ok(());
        }
        match self {
            FieldType::Text | FieldType::TextArea | FieldType::File => {
                as_text(value).map(|_| ())
            }
            FieldType::Email => {
                let text = as_text(value)?;
                if is_email(&text) {
                    Ok(())
                } else {
                    Err(ValueError::NotEmail(text))
                }
            }
            FieldType::Number => match value {
                Value::Number(_) => Ok(()),
                Value::String(s) if s.trim().parse::<f64>().is_ok() => Ok(()),
                other => Err(ValueError::NotNumber(display_value(other))),
            },
            FieldType::Date => {
                let text = as_text(value)?;
                NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| ValueError::NotDate(text))
            }
            FieldType::Select | FieldType::Dropdown | FieldType::Radio => {
                if value.is_array() {
                    return Err(ValueError::MultipleValues);
                }
                check_option(&as_text(value)?, options)
            }
            FieldType::Checkbox => match value {
                Value::Array(items) => items
                    .iter()
                    .try_for_each(|item| check_option(&as_text(item)?, options)),
                // A single checkbox submits a bare value.
                other => check_option(&as_text(other)?, options),
            },
        }
    }
}

fn as_text(value: &Value) -> Result<String, ValueError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(ValueError::NotText),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_option(value: &str, options: &[String]) -> Result<(), ValueError> {
    if options.iter().any(|o| o == value) {
        Ok(())
    } else {
        Err(ValueError::NotAnOption(value.to_string()))
    }
}

fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    /// Case-insensitive; `text-area` and `text_area` are accepted for `textArea`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}
