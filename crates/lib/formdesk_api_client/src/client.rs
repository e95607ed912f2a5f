//! REST implementation of [`FormsBackend`].

use async_trait::async_trait;
use formdesk_core::BackendError;
use formdesk_core::backend::FormsBackend;
use formdesk_core::models::{FormDefinition, NewForm, Step, StepPayload};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ClientError;

const FORMS_PATH: &str = "form-select";
const STEPS_PATH: [&str; 2] = ["forms", "form-steps"];

/// HTTP client for the forms API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::NotABase(config.base_url.clone()));
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base,
            token: config.token.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn steps_url<'a>(&self, rest: impl IntoIterator<Item = &'a str>) -> Url {
        self.url(STEPS_PATH.into_iter().chain(rest))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn request_json(&self, method: Method, url: Url, body: &impl Serialize) -> RequestBuilder {
        self.request(method, url).json(body)
    }

    /// Send and read the body. 404 becomes `NotFound(what)`; any other
    /// non-2xx status becomes `Rejected` with the server's message.
    async fn execute(&self, request: RequestBuilder, what: &str) -> Result<Value, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        log::debug!("{what}: {status}");

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message: envelope::error_message(&body),
            });
        }
        envelope::parse_body(&body)
    }
}

#[async_trait]
impl FormsBackend for ApiClient {
    async fn list_forms(&self) -> Result<Vec<FormDefinition>, BackendError> {
        let request = self.request(Method::GET, self.url([FORMS_PATH]));
        let body = self.execute(request, "forms").await?;
        envelope::decode_list(body, "forms")
    }

    async fn create_form(&self, form: &NewForm) -> Result<FormDefinition, BackendError> {
        let request = self.request_json(Method::POST, self.url([FORMS_PATH]), form);
        let body = self.execute(request, "form").await?;
        envelope::decode(envelope::unwrap_data(body), "form")
    }

    async fn delete_form(&self, id: &str) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, self.url([FORMS_PATH, id]));
        self.execute(request, &format!("form {id}")).await?;
        Ok(())
    }

    async fn list_steps(&self, form_id: &str) -> Result<Vec<Step>, BackendError> {
        let request = self.request(Method::GET, self.steps_url([form_id]));
        let body = self
            .execute(request, &format!("steps for form {form_id}"))
            .await?;
        envelope::steps_from(body)
    }

    async fn create_step(&self, form_id: &str, step: &StepPayload) -> Result<Step, BackendError> {
        let request = self.request_json(Method::POST, self.steps_url([form_id]), step);
        let body = self.execute(request, &format!("form {form_id}")).await?;
        envelope::step_from(body)
    }

    async fn update_step(
        &self,
        form_id: &str,
        step_id: &str,
        step: &StepPayload,
    ) -> Result<Step, BackendError> {
        let request = self.request_json(Method::PUT, self.steps_url([form_id, step_id]), step);
        let body = self.execute(request, &format!("step {step_id}")).await?;
        envelope::step_from(body)
    }

    async fn delete_step(&self, form_id: &str, step_id: &str) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, self.steps_url([form_id, step_id]));
        self.execute(request, &format!("step {step_id}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn joins_paths_onto_base() {
        let c = client("http://localhost:3100");
        assert_eq!(c.url([FORMS_PATH]).as_str(), "http://localhost:3100/form-select");

        let c = client("https://api.example.com/v1/");
        assert_eq!(
            c.steps_url(["f1", "s2"]).as_str(),
            "https://api.example.com/v1/forms/form-steps/f1/s2"
        );
    }

    #[test]
    fn path_segments_are_encoded() {
        let c = client("http://localhost:3100");
        assert_eq!(
            c.url([FORMS_PATH, "a/b c"]).as_str(),
            "http://localhost:3100/form-select/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ApiClient::new(&ClientConfig::new("not a url")),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new(&ClientConfig::new("mailto:admin@example.com")),
            Err(ClientError::NotABase(_))
        ));
    }
}
