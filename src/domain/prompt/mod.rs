//! Prompt templates: placeholder extraction, sentinel resolution and rendering.

pub mod chat;
pub mod placeholder;
pub mod prompt_value;
pub mod render;
pub mod system_defaults;
pub mod template;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
pub use placeholder::{extract_placeholders, placeholder_token};
pub use prompt_value::{NONE_VALUE, PromptValue, USE_SYSTEM_DEFAULT};
pub use render::{
    Bindings, HtmlMarkup, Markup, PlainMarkup, RenderedTemplate, ResolvedPrompt, render,
    render_for_machine, render_preview, resolve_sentinel,
};
pub use system_defaults::{SystemDefaults, TemplateField, default_config_codes};
pub use template::{ModelParams, PromptTemplate};
