//! Prompt-related API port definition.

use crate::domain::prompt::{ChatRequest, ChatResponse};
use crate::domain::{AppError, PromptTemplate, SystemDefaults};

/// Port for the endpoints the template renderer depends on.
pub trait PromptApi {
    /// Fetch a prompt template by id.
    fn template(&self, id: &str) -> Result<PromptTemplate, AppError>;

    /// Fetch the system configs for `codes`. Missing codes are simply absent.
    fn system_defaults(&self, codes: &[&str]) -> Result<SystemDefaults, AppError>;

    /// Run a chat completion through an AI model configured on the backend.
    fn chat(&self, model_id: &str, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
