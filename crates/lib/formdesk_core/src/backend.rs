//! Persistence seam for forms and steps.
//!
//! Mirrors the REST endpoints under `/form-select` and `/forms/form-steps`.
//! Implementations: [`crate::memory::MemoryBackend`] and the HTTP client in
//! `formdesk_api_client`.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{FormDefinition, NewForm, Step, StepPayload};

/// Storage operations used by the catalog and the step builder.
///
/// `form_id` arguments of step operations are the form's persisted `_id`.
#[async_trait]
pub trait FormsBackend: Send + Sync {
    /// `GET /form-select`
    async fn list_forms(&self) -> Result<Vec<FormDefinition>, BackendError>;

    /// `POST /form-select`
    async fn create_form(&self, form: &NewForm) -> Result<FormDefinition, BackendError>;

    /// `DELETE /form-select/:id`
    async fn delete_form(&self, id: &str) -> Result<(), BackendError>;

    /// `GET /forms/form-steps/:formId`. A form with no steps document may
    /// answer [`BackendError::NotFound`].
    async fn list_steps(&self, form_id: &str) -> Result<Vec<Step>, BackendError>;

    /// `POST /forms/form-steps/:formId`
    async fn create_step(&self, form_id: &str, step: &StepPayload) -> Result<Step, BackendError>;

    /// `PUT /forms/form-steps/:formId/:stepId`
    async fn update_step(
        &self,
        form_id: &str,
        step_id: &str,
        step: &StepPayload,
    ) -> Result<Step, BackendError>;

    /// `DELETE /forms/form-steps/:formId/:stepId`
    async fn delete_step(&self, form_id: &str, step_id: &str) -> Result<(), BackendError>;
}
