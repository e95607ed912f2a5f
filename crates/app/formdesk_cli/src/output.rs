//! Output formatting.

use std::fmt::Write as _;

use clap::ValueEnum;
use formdesk_core::catalog::EMPTY_CATALOG;
use formdesk_core::field_types::{FieldType, InputKind};
use formdesk_core::lead::SubmissionProblem;
use formdesk_core::models::{FormDefinition, Step};
use serde::Serialize;

use crate::Result;

pub const NO_STEPS: &str = "No steps yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` as JSON or YAML, or the text from `table`.
    pub fn print<T, F>(self, data: &T, table: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        let text = match self {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Yaml => serde_yaml::to_string(data)?,
            OutputFormat::Table => table(),
        };
        println!("{}", text.trim_end());
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

pub fn forms_table(forms: &[FormDefinition], summary: &str) -> String {
    if forms.is_empty() {
        return EMPTY_CATALOG.to_string();
    }
    let id_width = forms
        .iter()
        .map(|f| f.form_id.len())
        .max()
        .unwrap_or(0)
        .max("FORM ID".len());
    let mut out = format!("{summary}\n");
    let _ = writeln!(out, "{:>4}  {:<id_width$}  {:<24}  _ID", "#", "FORM ID", "TITLE");
    for form in forms {
        let number = form
            .form_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>4}  {:<id_width$}  {:<24}  {}",
            number,
            form.form_id,
            form.form_title,
            form.identity().unwrap_or("-")
        );
    }
    out
}

/// The builder's list view: one numbered block per step.
pub fn steps_table(steps: &[Step]) -> String {
    if steps.is_empty() {
        return NO_STEPS.to_string();
    }
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        let hidden = if step.visible { "" } else { " (hidden)" };
        let _ = writeln!(out, "{}. {}{hidden}", i + 1, step.step_title);
        if let Some(id) = step.identity() {
            let _ = writeln!(out, "   _id: {id}");
        }
        if !step.step_description.is_empty() {
            let _ = writeln!(out, "   {}", step.step_description);
        }
        let _ = writeln!(out, "   Total Fields: {}", step.fields.len());
        for field in &step.fields {
            let hidden = if field.visible { "" } else { ", hidden" };
            let _ = writeln!(
                out,
                "   - {} ({}: {}{hidden}) Required: {}",
                field.label,
                field.name,
                field.field_type,
                yes_no(field.required)
            );
            if field.field_type.requires_options() {
                let _ = writeln!(out, "     Options: {}", field.options.join(", "));
            }
        }
    }
    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeRow {
    pub name: &'static str,
    pub requires_options: bool,
    pub supports_placeholder: bool,
    pub input: String,
}

impl From<FieldType> for FieldTypeRow {
    fn from(field_type: FieldType) -> Self {
        Self {
            name: field_type.as_str(),
            requires_options: field_type.requires_options(),
            supports_placeholder: field_type.supports_placeholder(),
            input: describe_input(field_type.input_kind()),
        }
    }
}

fn describe_input(kind: InputKind) -> String {
    match kind {
        InputKind::SingleLine(html_type) => format!("input[type={html_type}]"),
        InputKind::MultiLine => "textarea".into(),
        InputKind::ChoiceList => "select".into(),
        InputKind::RadioGroup => "radio group".into(),
        InputKind::CheckboxGroup => "checkbox group".into(),
        InputKind::Upload => "file upload".into(),
    }
}

pub fn field_types_table(rows: &[FieldTypeRow]) -> String {
    let mut out = format!(
        "{:<10}  {:<7}  {:<11}  INPUT\n",
        "TYPE", "OPTIONS", "PLACEHOLDER"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<10}  {:<7}  {:<11}  {}",
            row.name,
            yes_no(row.requires_options),
            yes_no(row.supports_placeholder),
            row.input
        );
    }
    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReport<'a> {
    pub problems: Vec<String>,
    pub undeclared_keys: Vec<&'a str>,
}

impl<'a> LeadReport<'a> {
    pub fn new(problems: &[SubmissionProblem], undeclared_keys: Vec<&'a str>) -> Self {
        Self {
            problems: problems.iter().map(ToString::to_string).collect(),
            undeclared_keys,
        }
    }
}

pub fn lead_report_table(report: &LeadReport<'_>) -> String {
    let mut out = String::new();
    if report.problems.is_empty() {
        out.push_str("Submission is complete\n");
    } else {
        for problem in &report.problems {
            let _ = writeln!(out, "- {problem}");
        }
    }
    if !report.undeclared_keys.is_empty() {
        let _ = writeln!(
            out,
            "Not declared by any field: {}",
            report.undeclared_keys.join(", ")
        );
    }
    out
}
