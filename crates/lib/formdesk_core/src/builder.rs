//! Step sequence builder.
//!
//! Authors the ordered step → field tree of one form. Edits happen on a
//! private copy held by a [`StepEditor`]; nothing reaches the list view
//! until the copy is saved, and after every save or delete the list is
//! fetched again from the backend rather than patched locally.

use std::sync::Arc;

use crate::backend::FormsBackend;
use crate::error::{FormError, Result};
use crate::field_types::FieldType;
use crate::models::{Field, Step};
use crate::single_flight::{SingleFlight, SlotKey};
use crate::validation::validate_step;

/// Fetch the steps of a form. A failed fetch yields an empty list: a form
/// that has never had a step saved has no steps document at all.
pub async fn list_steps(backend: &dyn FormsBackend, form_id: &str) -> Vec<Step> {
    match backend.list_steps(form_id).await {
        Ok(steps) => steps,
        Err(e) if e.is_not_found() => {
            log::debug!("no steps stored for form {form_id}");
            Vec::new()
        }
        Err(e) => {
            log::warn!("listing steps of form {form_id} failed, showing none: {e}");
            Vec::new()
        }
    }
}

/// Validate and persist one step: update when it carries an identity,
/// create otherwise.
///
/// Validation failures return before any request is made. Only one save per
/// step slot may be in transit across everyone sharing `flights`.
pub async fn save_step(
    backend: &dyn FormsBackend,
    flights: &SingleFlight,
    form_id: &str,
    step: &Step,
) -> Result<Step> {
    validate_step(step)?;
    let payload = step.to_payload();

    let _flight = flights.try_acquire(SlotKey::for_step(form_id, step))?;
    let saved = match step.identity() {
        Some(step_id) => {
            log::debug!("updating step {step_id} of form {form_id}");
            backend.update_step(form_id, step_id, &payload).await?
        }
        None => {
            log::debug!("creating step '{}' in form {form_id}", payload.step_title);
            backend.create_step(form_id, &payload).await?
        }
    };
    Ok(saved)
}

/// Working copy of one step being added or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEditor {
    draft: Step,
}

impl Default for StepEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEditor {
    /// Editor for a new step holding one blank field.
    pub fn new() -> Self {
        Self {
            draft: Step::with_blank_field(),
        }
    }

    /// Editor over a copy of an existing step.
    pub fn from_step(step: &Step) -> Self {
        Self {
            draft: step.clone(),
        }
    }

    pub fn draft(&self) -> &Step {
        &self.draft
    }

    pub fn into_step(self) -> Step {
        self.draft
    }

    pub fn is_new(&self) -> bool {
        self.draft.is_new()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.step_title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.step_description = description.into();
    }

    pub fn toggle_visible(&mut self) {
        self.draft.visible = !self.draft.visible;
    }

    /// Append a blank field; returns its index.
    pub fn add_field(&mut self) -> usize {
        self.draft.fields.push(Field::default());
        self.draft.fields.len() - 1
    }

    /// Remove the field at `index`, keeping the others in order.
    pub fn remove_field(&mut self, index: usize) -> Result<Field> {
        self.check_field(index)?;
        Ok(self.draft.fields.remove(index))
    }

    pub fn field(&self, index: usize) -> Result<&Field> {
        let len = self.draft.fields.len();
        self.draft
            .fields
            .get(index)
            .ok_or(FormError::FieldIndexOutOfRange { index, len })
    }

    pub fn set_field_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        self.field_mut(index)?.label = label.into();
        Ok(())
    }

    pub fn set_field_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.field_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn set_field_placeholder(
        &mut self,
        index: usize,
        placeholder: impl Into<String>,
    ) -> Result<()> {
        self.field_mut(index)?.placeholder = placeholder.into();
        Ok(())
    }

    /// Change a field's type; see [`Field::set_type`].
    pub fn set_field_type(&mut self, index: usize, field_type: FieldType) -> Result<()> {
        self.field_mut(index)?.set_type(field_type);
        Ok(())
    }

    pub fn toggle_field_required(&mut self, index: usize) -> Result<()> {
        self.field_mut(index)?.toggle_required();
        Ok(())
    }

    pub fn toggle_field_visible(&mut self, index: usize) -> Result<()> {
        let field = self.field_mut(index)?;
        field.visible = !field.visible;
        Ok(())
    }

    pub fn add_option(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.choice_field_mut(index)?.options.push(value.into());
        Ok(())
    }

    pub fn update_option(
        &mut self,
        index: usize,
        option: usize,
        value: impl Into<String>,
    ) -> Result<()> {
        let field = self.choice_field_mut(index)?;
        let len = field.options.len();
        let slot = field
            .options
            .get_mut(option)
            .ok_or(FormError::OptionIndexOutOfRange { index: option, len })?;
        *slot = value.into();
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize, option: usize) -> Result<String> {
        let field = self.choice_field_mut(index)?;
        let len = field.options.len();
        if option >= len {
            return Err(FormError::OptionIndexOutOfRange { index: option, len });
        }
        Ok(field.options.remove(option))
    }

    fn check_field(&self, index: usize) -> Result<()> {
        self.field(index).map(|_| ())
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut Field> {
        let len = self.draft.fields.len();
        self.draft
            .fields
            .get_mut(index)
            .ok_or(FormError::FieldIndexOutOfRange { index, len })
    }

    fn choice_field_mut(&mut self, index: usize) -> Result<&mut Field> {
        let field = self.field_mut(index)?;
        if !field.field_type.requires_options() {
            return Err(FormError::OptionsNotSupported(field.field_type));
        }
        Ok(field)
    }
}

/// List view plus at most one open editor for the steps of one form.
pub struct StepBuilder {
    backend: Arc<dyn FormsBackend>,
    flights: Arc<SingleFlight>,
    form_id: String,
    steps: Vec<Step>,
    editor: Option<StepEditor>,
}

impl StepBuilder {
    /// Builder for the form with persisted identity `form_id`. The list is
    /// empty until [`StepBuilder::refresh`] runs.
    pub fn new(
        backend: Arc<dyn FormsBackend>,
        flights: Arc<SingleFlight>,
        form_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            flights,
            form_id: form_id.into(),
            steps: Vec::new(),
            editor: None,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Steps as last fetched from the backend.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Re-fetch the list view from the backend.
    pub async fn refresh(&mut self) -> &[Step] {
        self.steps = list_steps(&*self.backend, &self.form_id).await;
        &self.steps
    }

    /// Open the editor: on a new step for `None`, or on a copy of the listed
    /// step at `existing`. Replaces any editor already open.
    pub fn open_editor(&mut self, existing: Option<usize>) -> Result<&mut StepEditor> {
        let editor = match existing {
            None => StepEditor::new(),
            Some(index) => {
                let len = self.steps.len();
                let step = self
                    .steps
                    .get(index)
                    .ok_or(FormError::StepIndexOutOfRange { index, len })?;
                StepEditor::from_step(step)
            }
        };
        Ok(self.editor.insert(editor))
    }

    pub fn editor(&self) -> Option<&StepEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut StepEditor> {
        self.editor.as_mut()
    }

    /// Discard the open editor, if any. Returns whether one was open.
    pub fn cancel_editor(&mut self) -> bool {
        self.editor.take().is_some()
    }

    /// Save the open editor's step. On success the editor closes and the
    /// list is re-fetched; on failure the editor stays open with its edits.
    pub async fn save(&mut self) -> Result<Step> {
        let editor = self.editor.as_ref().ok_or(FormError::NoOpenStep)?;
        let saved = save_step(
            &*self.backend,
            &self.flights,
            &self.form_id,
            editor.draft(),
        )
        .await?;
        self.editor = None;
        self.refresh().await;
        Ok(saved)
    }

    /// Delete a step by identity, then re-fetch the list.
    pub async fn delete_step(&mut self, step_id: &str) -> Result<()> {
        self.backend.delete_step(&self.form_id, step_id).await?;
        log::debug!("deleted step {step_id} of form {}", self.form_id);
        self.refresh().await;
        Ok(())
    }
}
