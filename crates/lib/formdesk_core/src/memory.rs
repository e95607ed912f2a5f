//! In-process [`FormsBackend`].
//!
//! Behaves like the REST API: assigns identities and form numbers, keeps
//! steps in insertion order, and answers `NotFound` for a form whose steps
//! were never saved. The unit tests of this crate run against it, and
//! embedders can use it as a reference store. Nothing is persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::FormsBackend;
use crate::error::BackendError;
use crate::ids::new_record_id;
use crate::models::{FormDefinition, NewForm, Step, StepPayload};

#[derive(Debug, Default)]
struct Store {
    forms: Vec<FormDefinition>,
    /// Steps keyed by the owning form's `_id`.
    steps: HashMap<String, Vec<Step>>,
    next_form_number: u64,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: RwLock<Store>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormsBackend for MemoryBackend {
    async fn list_forms(&self) -> Result<Vec<FormDefinition>, BackendError> {
        Ok(self.store.read().await.forms.clone())
    }

    async fn create_form(&self, form: &NewForm) -> Result<FormDefinition, BackendError> {
        let mut store = self.store.write().await;
        if store.forms.iter().any(|f| f.form_id == form.form_id) {
            return Err(BackendError::Rejected {
                status: 409,
                message: Some(format!("Form '{}' already exists", form.form_id)),
            });
        }
        store.next_form_number += 1;
        let created = FormDefinition {
            id: Some(new_record_id()),
            form_id: form.form_id.clone(),
            form_number: Some(store.next_form_number),
            form_title: form.form_title.clone(),
            form_description: form.form_description.clone(),
        };
        store.forms.push(created.clone());
        Ok(created)
    }

    async fn delete_form(&self, id: &str) -> Result<(), BackendError> {
        let mut store = self.store.write().await;
        let before = store.forms.len();
        store.forms.retain(|f| f.id.as_deref() != Some(id));
        if store.forms.len() == before {
            return Err(BackendError::NotFound(format!("form {id}")));
        }
        store.steps.remove(id);
        Ok(())
    }

    async fn list_steps(&self, form_id: &str) -> Result<Vec<Step>, BackendError> {
        self.store
            .read()
            .await
            .steps
            .get(form_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("steps for form {form_id}")))
    }

    async fn create_step(&self, form_id: &str, step: &StepPayload) -> Result<Step, BackendError> {
        let created = step.clone().into_step(new_record_id());
        self.store
            .write()
            .await
            .steps
            .entry(form_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_step(
        &self,
        form_id: &str,
        step_id: &str,
        step: &StepPayload,
    ) -> Result<Step, BackendError> {
        let mut store = self.store.write().await;
        let slot = store
            .steps
            .get_mut(form_id)
            .and_then(|steps| steps.iter_mut().find(|s| s.id.as_deref() == Some(step_id)))
            .ok_or_else(|| BackendError::NotFound(format!("step {step_id}")))?;
        *slot = step.clone().into_step(step_id.to_string());
        Ok(slot.clone())
    }

    async fn delete_step(&self, form_id: &str, step_id: &str) -> Result<(), BackendError> {
        let mut store = self.store.write().await;
        let steps = store
            .steps
            .get_mut(form_id)
            .ok_or_else(|| BackendError::NotFound(format!("steps for form {form_id}")))?;
        let before = steps.len();
        steps.retain(|s| s.id.as_deref() != Some(step_id));
        if steps.len() == before {
            return Err(BackendError::NotFound(format!("step {step_id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_form(title: &str, id: &str) -> NewForm {
        NewForm {
            form_id: id.into(),
            form_title: title.into(),
            form_description: String::new(),
        }
    }

    fn payload(title: &str) -> StepPayload {
        StepPayload {
            step_title: title.into(),
            step_description: String::new(),
            visible: true,
            fields: Vec::new(),
        }
    }

    #[tokio::test]
    async fn forms_are_numbered_in_creation_order() {
        let backend = MemoryBackend::new();
        let a = backend.create_form(&new_form("A", "a")).await.unwrap();
        let b = backend.create_form(&new_form("B", "b")).await.unwrap();
        assert_eq!(a.form_number, Some(1));
        assert_eq!(b.form_number, Some(2));
        assert_ne!(a.id, b.id);
        assert_eq!(backend.list_forms().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_form_id_is_rejected() {
        let backend = MemoryBackend::new();
        backend.create_form(&new_form("A", "a")).await.unwrap();
        let err = backend.create_form(&new_form("A", "a")).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Form 'a' already exists"));
    }

    #[tokio::test]
    async fn steps_of_unknown_form_are_not_found() {
        let backend = MemoryBackend::new();
        assert!(backend.list_steps("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let backend = MemoryBackend::new();
        let first = backend.create_step("f", &payload("One")).await.unwrap();
        backend.create_step("f", &payload("Two")).await.unwrap();
        let id = first.id.clone().unwrap();
        backend.update_step("f", &id, &payload("Uno")).await.unwrap();

        let titles: Vec<String> = backend
            .list_steps("f")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.step_title)
            .collect();
        assert_eq!(titles, vec!["Uno", "Two"]);
    }

    #[tokio::test]
    async fn deleting_form_drops_its_steps() {
        let backend = MemoryBackend::new();
        let form = backend.create_form(&new_form("A", "a")).await.unwrap();
        let id = form.id.unwrap();
        backend.create_step(&id, &payload("One")).await.unwrap();
        backend.delete_form(&id).await.unwrap();
        assert!(backend.list_steps(&id).await.is_err());
        assert!(backend.delete_form(&id).await.unwrap_err().is_not_found());
    }
}
