//! Admin API client implementation using reqwest.

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::domain::prompt::{ChatRequest, ChatResponse};
use crate::domain::{
    ApiConfig, AppError, JobKind, JobRef, PromptTemplate, Resource, RestartMode, StatusSnapshot,
    SystemDefaults,
};
use crate::ports::{JobApi, PromptApi, ResourceApi};

/// Page size used when listing running jobs.
const RUNNING_JOBS_LIMIT: u32 = 100;

/// HTTP client for the admin API.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    client: Client,
}

impl HttpApiClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url: config.base_url.clone(), client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let joined = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|e| AppError::Configuration(format!("Invalid request URL {}: {}", joined, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = self.url(path)?;
        debug!(%method, %url, "API request");
        Ok(self.client.request(method, url).header(CONTENT_TYPE, "application/json"))
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request
            .send()
            .map_err(|e| AppError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AppError::Transport(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            if status.as_u16() == 204 || body.trim().is_empty() {
                return Ok(json!({ "success": true }));
            }
            return serde_json::from_str(&body)
                .map_err(|e| AppError::Transport(format!("Failed to parse response: {}", e)));
        }

        Err(AppError::Api { status: status.as_u16(), detail: error_detail(status.as_u16(), &body) })
    }

    fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, AppError> {
        let value = self.send(request)?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Transport(format!("Unexpected {} payload: {}", what, e)))
    }
}

/// Prefer the backend's `detail` message, then the raw body.
fn error_detail(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    if body.trim().is_empty() {
        format!("HTTP error! status: {}", status)
    } else {
        body.trim().to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SystemConfigItem {
    config_code: String,
    #[serde(default)]
    config_content: String,
}

#[derive(Debug, Deserialize)]
struct SystemConfigBatch {
    #[serde(default)]
    items: Vec<SystemConfigItem>,
}

impl JobApi for HttpApiClient {
    fn start(&self, job: &JobRef) -> Result<(), AppError> {
        job.validate()?;
        self.send(self.request(Method::POST, &format!("{}/start", job.path()))?)?;
        Ok(())
    }

    fn status(&self, job: &JobRef) -> Result<StatusSnapshot, AppError> {
        job.validate()?;
        let value = self.send(self.request(Method::GET, &format!("{}/status", job.path()))?)?;
        StatusSnapshot::from_json(job, value)
    }

    fn restart(&self, job: &JobRef, mode: RestartMode) -> Result<(), AppError> {
        job.validate()?;
        let request = self
            .request(Method::POST, &format!("{}/restart", job.path()))?
            .query(&[("force", mode.is_force())]);
        self.send(request)?;
        Ok(())
    }

    fn cancel(&self, job: &JobRef) -> Result<(), AppError> {
        job.validate()?;
        if !job.kind.supports_cancel() {
            return Err(AppError::Validation(format!(
                "Cancelling is not supported for {}s",
                job.kind.display_name()
            )));
        }
        self.send(self.request(Method::POST, &format!("{}/cancel", job.path()))?)?;
        Ok(())
    }

    fn running(&self, kind: JobKind) -> Result<Vec<String>, AppError> {
        let request = self
            .request(Method::GET, kind.collection())?
            .query(&[("status", "running".to_string()), ("limit", RUNNING_JOBS_LIMIT.to_string())]);
        let list: ListResponse = self.send_json(request, "job list")?;

        Ok(list
            .items
            .iter()
            .filter_map(|item| match item.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
            .collect())
    }

    fn check_timeouts(&self, kind: JobKind) -> Result<Value, AppError> {
        let path = format!("{}/check-timeout", kind.collection());
        self.send(self.request(Method::POST, &path)?)
    }
}

impl PromptApi for HttpApiClient {
    fn template(&self, id: &str) -> Result<PromptTemplate, AppError> {
        if id.trim().is_empty() {
            return Err(AppError::validation("template id must not be empty"));
        }
        let path = format!("{}/{}", Resource::PromptTemplates.path(), id);
        self.send_json(self.request(Method::GET, &path)?, "prompt template")
    }

    fn system_defaults(&self, codes: &[&str]) -> Result<SystemDefaults, AppError> {
        let path = format!("{}/batch", Resource::SystemConfigs.path());
        let request = self.request(Method::POST, &path)?.json(&json!({ "config_codes": codes }));
        let batch: SystemConfigBatch = self.send_json(request, "system config batch")?;

        Ok(batch.items.into_iter().map(|item| (item.config_code, item.config_content)).collect())
    }

    fn chat(&self, model_id: &str, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        if model_id.trim().is_empty() {
            return Err(AppError::validation("model id must not be empty"));
        }
        let path = format!("{}/{}/chat", Resource::AiModels.path(), model_id);
        self.send_json(self.request(Method::POST, &path)?.json(request), "chat completion")
    }
}

impl ResourceApi for HttpApiClient {
    fn list(&self, resource: Resource, query: &[(String, String)]) -> Result<Value, AppError> {
        self.send(self.request(Method::GET, resource.path())?.query(query))
    }

    fn get(&self, resource: Resource, id: &str) -> Result<Value, AppError> {
        self.send(self.request(Method::GET, &item_path(resource, id)?)?)
    }

    fn create(&self, resource: Resource, body: &Value) -> Result<Value, AppError> {
        self.send(self.request(Method::POST, resource.path())?.json(body))
    }

    fn update(&self, resource: Resource, id: &str, body: &Value) -> Result<Value, AppError> {
        self.send(self.request(Method::PUT, &item_path(resource, id)?)?.json(body))
    }

    fn delete(&self, resource: Resource, id: &str) -> Result<Value, AppError> {
        self.send(self.request(Method::DELETE, &item_path(resource, id)?)?)
    }
}

fn item_path(resource: Resource, id: &str) -> Result<String, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Validation(format!("{} id must not be empty", resource)));
    }
    Ok(format!("{}/{}", resource.path(), id))
}
