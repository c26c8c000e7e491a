//! Chat completion payloads built from a rendered template.

use serde::{Deserialize, Serialize};

use super::render::{Bindings, render_for_machine};
use super::system_defaults::{SystemDefaults, TemplateField};
use super::template::{ModelParams, PromptTemplate};
use crate::domain::AppError;

/// User message sent when a template renders to nothing at all.
pub const FALLBACK_USER_PROMPT: &str = "Generate a reference answer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Body of `POST /ai-models/{id}/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub params: ModelParams,
}

impl ChatRequest {
    /// Render `template` for the model and attach its resolved parameters.
    pub fn from_template(
        template: &PromptTemplate,
        defaults: &SystemDefaults,
        bindings: &Bindings,
    ) -> Result<Self, AppError> {
        let params = ModelParams::from_template(template, defaults)?;

        let system = render_for_machine(
            &template.system_prompt,
            TemplateField::SystemPrompt,
            defaults,
            bindings,
        );
        let user =
            render_for_machine(&template.user_prompt, TemplateField::UserPrompt, defaults, bindings);

        let mut messages = Vec::with_capacity(2);
        if !system.trim().is_empty() {
            messages.push(ChatMessage { role: ChatRole::System, content: system });
        }
        if !user.trim().is_empty() {
            messages.push(ChatMessage { role: ChatRole::User, content: user });
        }
        if messages.is_empty() {
            messages.push(ChatMessage {
                role: ChatRole::User,
                content: FALLBACK_USER_PROMPT.to_string(),
            });
        }

        Ok(Self { messages, params })
    }
}

/// Response of the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub raw_response: Option<serde_json::Value>,
}
