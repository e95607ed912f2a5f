//! Console session: catalog, navigation and step builder behind one
//! façade that reports every outcome as a transient notice.
//!
//! Operations never return errors to the caller. A failure becomes an
//! error [`Notice`] and leaves the session in the state it was in before
//! the operation (an open step editor keeps its edits).

use std::sync::Arc;

use crate::backend::FormsBackend;
use crate::builder::{StepBuilder, StepEditor};
use crate::catalog::FormCatalog;
use crate::error::{FormError, Result};
use crate::models::{FormDefinition, Step};
use crate::navigation::{Navigator, View};
use crate::single_flight::SingleFlight;

pub const FORM_CREATED: &str = "Form created successfully";
pub const FORM_DELETED: &str = "Form deleted successfully";
pub const STEP_SAVED: &str = "Step saved successfully";
pub const STEP_DELETED: &str = "Step deleted successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

pub struct Console {
    backend: Arc<dyn FormsBackend>,
    flights: Arc<SingleFlight>,
    catalog: FormCatalog,
    nav: Navigator,
    builder: Option<StepBuilder>,
    notices: Vec<Notice>,
}

impl Console {
    pub fn new(backend: Arc<dyn FormsBackend>) -> Self {
        Self::with_flights(backend, Arc::new(SingleFlight::new()))
    }

    /// Session sharing a save guard with other sessions.
    pub fn with_flights(backend: Arc<dyn FormsBackend>, flights: Arc<SingleFlight>) -> Self {
        Self {
            catalog: FormCatalog::new(backend.clone()),
            backend,
            flights,
            nav: Navigator::new(),
            builder: None,
            notices: Vec::new(),
        }
    }

    pub fn view(&self) -> &View {
        self.nav.view()
    }

    pub fn catalog(&self) -> &FormCatalog {
        &self.catalog
    }

    /// Step builder of the open form, while in the building view.
    pub fn builder(&self) -> Option<&StepBuilder> {
        self.builder.as_ref()
    }

    pub fn builder_mut(&mut self) -> Option<&mut StepBuilder> {
        self.builder.as_mut()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn load_catalog(&mut self) -> bool {
        let result = self.catalog.refresh().await.map(|_| ());
        self.report(result, None).is_some()
    }

    pub async fn create_form(&mut self, title: &str, description: &str) -> Option<FormDefinition> {
        let result = self.catalog.create(title, description).await;
        self.report(result, Some(FORM_CREATED))
    }

    /// Delete a form. Leaves the building view if it was the open form.
    pub async fn delete_form(&mut self, id: &str) -> bool {
        let result = self.catalog.delete(id).await;
        let deleted = self.report(result, Some(FORM_DELETED)).is_some();
        if deleted && self.nav.current_form() == Some(id) {
            self.leave_builder();
        }
        deleted
    }

    /// Enter the step builder of a listed form and fetch its steps.
    pub async fn open_form(&mut self, id: &str) -> bool {
        let opened = match self.catalog.find(id) {
            Some(form) => self.nav.open_builder(form).map(|_| ()),
            None => Err(FormError::MissingIdentity(format!(
                "form {id} is not in the catalog"
            ))),
        };
        if self.report(opened, None).is_none() {
            return false;
        }

        let mut builder = StepBuilder::new(self.backend.clone(), self.flights.clone(), id);
        builder.refresh().await;
        self.builder = Some(builder);
        true
    }

    /// Return to the catalog, discarding any open step editor.
    pub fn back(&mut self) -> bool {
        let result = self.nav.back().map(|_| ());
        let moved = self.report(result, None).is_some();
        if moved {
            self.builder = None;
        }
        moved
    }

    /// Open the step editor on a new step (`None`) or a copy of a listed one.
    pub fn open_step_editor(&mut self, existing: Option<usize>) -> Option<&mut StepEditor> {
        let opened = match self.builder.as_mut() {
            Some(builder) => builder.open_editor(existing).map(|_| ()),
            None => Err(no_open_form()),
        };
        self.report(opened, None)?;
        self.builder.as_mut().and_then(StepBuilder::editor_mut)
    }

    /// Close the step editor without saving. Returns whether one was open.
    pub fn cancel_step_editor(&mut self) -> bool {
        self.builder
            .as_mut()
            .is_some_and(StepBuilder::cancel_editor)
    }

    pub async fn save_step(&mut self) -> Option<Step> {
        let result = match self.builder.as_mut() {
            Some(builder) => builder.save().await,
            None => Err(no_open_form()),
        };
        self.report(result, Some(STEP_SAVED))
    }

    pub async fn delete_step(&mut self, step_id: &str) -> bool {
        let result = match self.builder.as_mut() {
            Some(builder) => builder.delete_step(step_id).await,
            None => Err(no_open_form()),
        };
        self.report(result, Some(STEP_DELETED)).is_some()
    }

    fn leave_builder(&mut self) {
        self.builder = None;
        // Only fails when already at the catalog.
        let _ = self.nav.back();
    }

    fn report<T>(&mut self, result: Result<T>, success: Option<&str>) -> Option<T> {
        match result {
            Ok(value) => {
                if let Some(message) = success {
                    self.notices.push(Notice::success(message));
                }
                Some(value)
            }
            Err(e) => {
                log::debug!("{e}");
                self.notices.push(Notice::error(e.user_message()));
                None
            }
        }
    }
}

fn no_open_form() -> FormError {
    FormError::InvalidTransition("no form is open".to_string())
}
