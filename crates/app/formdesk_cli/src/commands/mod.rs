//! Command handlers.

pub mod field_types;
pub mod forms;
pub mod leads;
pub mod steps;

use std::path::Path;
use std::sync::Arc;

use formdesk_api_client::{ApiClient, ClientConfig};
use formdesk_core::console::{Console, NoticeLevel};
use serde::de::DeserializeOwned;

use crate::output::OutputFormat;
use crate::{Error, Result};

/// What every handler gets: where the API is and how to print.
pub struct Context {
    pub config: ClientConfig,
    pub format: OutputFormat,
}

impl Context {
    /// A console session over the HTTP client.
    pub fn console(&self) -> Result<Console> {
        let client = ApiClient::new(&self.config)?;
        log::debug!("using forms API at {}", client.base_url());
        Ok(Console::new(Arc::new(client)))
    }

    /// A console session with the catalog loaded and `form` open in the
    /// step builder.
    pub async fn console_on_form(&self, form: &str) -> Result<Console> {
        let mut console = self.console()?;
        if console.load_catalog().await {
            console.open_form(form).await;
        }
        report(&mut console)?;
        Ok(console)
    }
}

/// Log the console's pending notices. The first error notice fails the
/// command.
pub fn report(console: &mut Console) -> Result<()> {
    let mut failure = None;
    for notice in console.take_notices() {
        match notice.level {
            NoticeLevel::Success => log::info!("{}", notice.message),
            NoticeLevel::Error => {
                failure.get_or_insert(notice.message);
            }
        }
    }
    match failure {
        Some(message) => Err(Error::Custom(message)),
        None => Ok(()),
    }
}

/// Read a JSON or YAML document; `.yaml` and `.yml` files are YAML.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| Error::Parse {
        path: path.to_path_buf(),
        message,
    })
}
