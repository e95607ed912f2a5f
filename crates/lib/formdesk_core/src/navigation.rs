//! Console navigation between the catalog and a form's step builder.

use crate::error::{FormError, Result};
use crate::models::FormDefinition;

/// Screen the console shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Building {
        /// Persisted identity of the form being built.
        form_id: String,
        form_title: String,
    },
}

#[derive(Debug, Default)]
pub struct Navigator {
    view: View,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Identity of the form being built, if any.
    pub fn current_form(&self) -> Option<&str> {
        match &self.view {
            View::Catalog => None,
            View::Building { form_id, .. } => Some(form_id),
        }
    }

    /// Catalog → Building. The entry must carry its persisted identity.
    pub fn open_builder(&mut self, form: &FormDefinition) -> Result<&View> {
        if let View::Building { form_title, .. } = &self.view {
            return Err(FormError::InvalidTransition(format!(
                "already building '{form_title}'"
            )));
        }
        let form_id = form.identity().ok_or_else(|| {
            FormError::MissingIdentity(format!("form '{}' has no _id", form.form_title))
        })?;
        self.view = View::Building {
            form_id: form_id.to_string(),
            form_title: form.form_title.clone(),
        };
        Ok(&self.view)
    }

    /// Building → Catalog.
    pub fn back(&mut self) -> Result<&View> {
        match self.view {
            View::Catalog => Err(FormError::InvalidTransition(
                "already at the catalog".to_string(),
            )),
            View::Building { .. } => {
                self.view = View::Catalog;
                Ok(&self.view)
            }
        }
    }
}
