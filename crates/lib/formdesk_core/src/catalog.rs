//! Form catalog: list, create and delete form definitions.

use std::sync::Arc;

use crate::backend::FormsBackend;
use crate::error::Result;
use crate::models::{FormDefinition, NewForm};
use crate::validation::validate_form_title;

/// Text shown in place of the table when the catalog is empty.
pub const EMPTY_CATALOG: &str = "No forms found";

/// Derive the stable external id of a form from its title: lowercase, with
/// each run of whitespace collapsed to one hyphen and no leading or
/// trailing hyphen. `"Contact Us"` becomes `"contact-us"`.
pub fn form_id_from_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the creation request for a form, deriving its id.
pub fn new_form(title: &str, description: &str) -> Result<NewForm> {
    validate_form_title(title)?;
    let form_title = title.trim().to_string();
    Ok(NewForm {
        form_id: form_id_from_title(&form_title),
        form_title,
        form_description: description.trim().to_string(),
    })
}

/// Cached catalog listing.
pub struct FormCatalog {
    backend: Arc<dyn FormsBackend>,
    forms: Vec<FormDefinition>,
}

impl FormCatalog {
    pub fn new(backend: Arc<dyn FormsBackend>) -> Self {
        Self {
            backend,
            forms: Vec::new(),
        }
    }

    /// Forms as last fetched.
    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    /// Look up a listed form by persisted identity.
    pub fn find(&self, id: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|f| f.identity() == Some(id))
    }

    /// One-line summary for the list header.
    pub fn summary(&self) -> String {
        match self.forms.len() {
            0 => EMPTY_CATALOG.to_string(),
            1 => "1 form".to_string(),
            n => format!("{n} forms"),
        }
    }

    pub async fn refresh(&mut self) -> Result<&[FormDefinition]> {
        self.forms = self.backend.list_forms().await?;
        Ok(&self.forms)
    }

    /// Create a form from a title and description, then re-fetch the list.
    ///
    /// The result is the outcome of the create alone. A failed re-fetch is
    /// logged and the cached list is patched with the new form instead.
    pub async fn create(&mut self, title: &str, description: &str) -> Result<FormDefinition> {
        let form = new_form(title, description)?;
        let created = self.backend.create_form(&form).await?;
        log::debug!("created form {} ({})", created.form_id, created.form_title);
        if !self.refresh_after_write().await && !self.forms.contains(&created) {
            self.forms.push(created.clone());
        }
        Ok(created)
    }

    /// Delete a form by persisted identity, then re-fetch the list.
    ///
    /// As with [`FormCatalog::create`], only the delete decides the result.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.backend.delete_form(id).await?;
        log::debug!("deleted form {id}");
        if !self.refresh_after_write().await {
            self.forms.retain(|f| f.identity() != Some(id));
        }
        Ok(())
    }

    /// Returns false when the listing could not be fetched.
    async fn refresh_after_write(&mut self) -> bool {
        match self.backend.list_forms().await {
            Ok(forms) => {
                self.forms = forms;
                true
            }
            Err(e) => {
                log::warn!("refreshing form list failed, keeping previous listing: {e}");
                false
            }
        }
    }
}
