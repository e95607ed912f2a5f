//! Lead contract commands. These work on files only.

use std::collections::BTreeMap;

use formdesk_core::lead::{check_submission, undeclared_keys};
use formdesk_core::models::{DynamicFieldSet, Step};
use serde::Deserialize;
use serde_json::Value;

use crate::cli::LeadCommands;
use crate::output::{LeadReport, lead_report_table};
use crate::{Error, Result};

use super::{Context, read_document};

#[derive(Deserialize)]
#[serde(untagged)]
enum StepsDocument {
    List(Vec<Step>),
    Document { steps: Vec<Step> },
}

impl From<StepsDocument> for Vec<Step> {
    fn from(doc: StepsDocument) -> Self {
        match doc {
            StepsDocument::List(steps) | StepsDocument::Document { steps } => steps,
        }
    }
}

/// Either a stored field set or a bare map of submitted values. The set
/// form needs an explicit `values` key, so a bare map that happens to carry
/// a `formTitle` value stays a bare map.
#[derive(Deserialize)]
#[serde(untagged)]
enum LeadDocument {
    Set(LeadSet),
    Values(BTreeMap<String, Value>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadSet {
    #[serde(default)]
    form_title: String,
    values: BTreeMap<String, Value>,
}

impl From<LeadDocument> for DynamicFieldSet {
    fn from(doc: LeadDocument) -> Self {
        match doc {
            LeadDocument::Set(LeadSet { form_title, values }) => {
                DynamicFieldSet { form_title, values }
            }
            LeadDocument::Values(values) => DynamicFieldSet {
                form_title: String::new(),
                values,
            },
        }
    }
}

pub fn handle(action: &LeadCommands, ctx: &Context) -> Result<()> {
    match action {
        LeadCommands::Check { steps, lead } => {
            let steps: Vec<Step> = read_document::<StepsDocument>(steps)?.into();
            let lead: DynamicFieldSet = read_document::<LeadDocument>(lead)?.into();

            let problems = check_submission(&steps, &lead.values);
            let report = LeadReport::new(&problems, undeclared_keys(&lead, &steps));
            ctx.format.print(&report, || lead_report_table(&report))?;

            if !problems.is_empty() {
                return Err(Error::Custom(format!(
                    "{} problem(s) in submitted values",
                    problems.len()
                )));
            }
        }
    }
    Ok(())
}
