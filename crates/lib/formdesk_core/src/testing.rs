//! Test doubles shared by the unit tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use crate::backend::FormsBackend;
use crate::error::BackendError;
use crate::memory::MemoryBackend;
use crate::models::{FormDefinition, NewForm, Step, StepPayload};

/// Wraps [`MemoryBackend`], counting requests and optionally failing or
/// holding writes, or failing form listings.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    inner: MemoryBackend,
    calls: AtomicUsize,
    fail_next_write: Mutex<Option<BackendError>>,
    fail_list_forms: Mutex<Option<BackendError>>,
    gate: Option<Arc<Semaphore>>,
    pub write_started: Arc<Notify>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes block until a permit is added to the returned semaphore.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let backend = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (backend, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_next_write(&self, err: BackendError) {
        *self.fail_next_write.lock().unwrap() = Some(err);
    }

    /// Every `list_forms` call fails with a clone of `err` until reset.
    pub fn fail_list_forms(&self, err: Option<BackendError>) {
        *self.fail_list_forms.lock().unwrap() = err;
    }

    async fn before_write(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.write_started.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        match self.fail_next_write.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FormsBackend for ScriptedBackend {
    async fn list_forms(&self) -> Result<Vec<FormDefinition>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_list_forms.lock().unwrap().clone() {
            return Err(err);
        }
        self.inner.list_forms().await
    }

    async fn create_form(&self, form: &NewForm) -> Result<FormDefinition, BackendError> {
        self.before_write().await?;
        self.inner.create_form(form).await
    }

    async fn delete_form(&self, id: &str) -> Result<(), BackendError> {
        self.before_write().await?;
        self.inner.delete_form(id).await
    }

    async fn list_steps(&self, form_id: &str) -> Result<Vec<Step>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_steps(form_id).await
    }

    async fn create_step(&self, form_id: &str, step: &StepPayload) -> Result<Step, BackendError> {
        self.before_write().await?;
        self.inner.create_step(form_id, step).await
    }

    async fn update_step(
        &self,
        form_id: &str,
        step_id: &str,
        step: &StepPayload,
    ) -> Result<Step, BackendError> {
        self.before_write().await?;
        self.inner.update_step(form_id, step_id, step).await
    }

    async fn delete_step(&self, form_id: &str, step_id: &str) -> Result<(), BackendError> {
        self.before_write().await?;
        self.inner.delete_step(form_id, step_id).await
    }
}
