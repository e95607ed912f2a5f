//! Pre-request validation of steps and new forms.
//!
//! Everything here is pure; a failing check means no request is sent.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::Step;

/// Validate a step before it is saved.
///
/// Checks run in order and stop at the first failure:
/// 1. the step title is non-empty,
/// 2. every field has a label and a name,
/// 3. field names are unique within the step.
pub fn validate_step(step: &Step) -> Result<(), ValidationError> {
    if step.step_title.trim().is_empty() {
        return Err(ValidationError::MissingStepTitle);
    }

    let incomplete: Vec<usize> = step
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.is_complete())
        .map(|(i, _)| i)
        .collect();
    if !incomplete.is_empty() {
        return Err(ValidationError::IncompleteFields(incomplete));
    }

    let mut seen = HashSet::new();
    for field in &step.fields {
        let name = field.name.trim();
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateFieldName(name.to_string()));
        }
    }

    Ok(())
}

/// Validate the title of a form about to be created.
pub fn validate_form_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        Err(ValidationError::MissingFormTitle)
    } else {
        Ok(())
    }
}
