//! Prompt template commands: placeholder listing, rendering and generation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::AppContext;
use crate::domain::prompt::{
    ChatRequest, ChatResponse, Markup, PlainMarkup, RenderedTemplate, default_config_codes,
    render_for_machine, render_preview,
};
use crate::domain::{AppError, Bindings, PromptTemplate, PromptValue, SystemDefaults, TemplateField};
use crate::ports::PromptApi;

/// Where a template is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A JSON record in the admin API's template shape.
    File(PathBuf),
    /// A template stored on the backend.
    Id(String),
}

/// Where system defaults are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultsSource {
    /// A TOML table of config codes.
    File(PathBuf),
    /// `POST /system-configs/batch`, only when the template uses a default.
    #[default]
    Remote,
}

/// Options for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub bindings: Bindings,
    pub defaults: DefaultsSource,
    /// Render plain text for a model instead of display text.
    pub machine: bool,
}

pub fn load_template<A: PromptApi>(
    ctx: &AppContext<A>,
    source: &TemplateSource,
) -> Result<PromptTemplate, AppError> {
    match source {
        TemplateSource::File(path) => {
            debug!(path = %path.display(), "Reading template file");
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        TemplateSource::Id(id) => ctx.api().template(id),
    }
}

/// Placeholders of the template in first-occurrence order.
pub fn variables<A: PromptApi>(
    ctx: &AppContext<A>,
    source: &TemplateSource,
) -> Result<Vec<String>, AppError> {
    Ok(load_template(ctx, source)?.placeholders())
}

pub fn load_defaults<A: PromptApi>(
    ctx: &AppContext<A>,
    template: &PromptTemplate,
    source: &DefaultsSource,
) -> Result<SystemDefaults, AppError> {
    match source {
        DefaultsSource::File(path) => read_defaults_file(path),
        DefaultsSource::Remote if uses_defaults(template) => {
            ctx.api().system_defaults(&default_config_codes())
        }
        DefaultsSource::Remote => Ok(SystemDefaults::new()),
    }
}

/// Render both prompts of the template at `source`.
pub fn render<A: PromptApi>(
    ctx: &AppContext<A>,
    source: &TemplateSource,
    options: &RenderOptions,
) -> Result<RenderedTemplate, AppError> {
    let template = load_template(ctx, source)?;
    let defaults = load_defaults(ctx, &template, &options.defaults)?;
    Ok(render_template(&template, &defaults, &options.bindings, options.machine, &PlainMarkup))
}

pub fn render_template(
    template: &PromptTemplate,
    defaults: &SystemDefaults,
    bindings: &Bindings,
    machine: bool,
    markup: &impl Markup,
) -> RenderedTemplate {
    let preview = render_preview(template, defaults, bindings, markup);
    if !machine {
        return preview;
    }

    RenderedTemplate {
        system_prompt: render_for_machine(
            &template.system_prompt,
            TemplateField::SystemPrompt,
            defaults,
            bindings,
        ),
        user_prompt: render_for_machine(
            &template.user_prompt,
            TemplateField::UserPrompt,
            defaults,
            bindings,
        ),
        awaiting: preview.awaiting,
    }
}

/// Render a stored template for `model_id` and run it through the chat endpoint.
pub fn generate<A: PromptApi>(
    ctx: &AppContext<A>,
    template_id: &str,
    model_id: &str,
    bindings: &Bindings,
) -> Result<ChatResponse, AppError> {
    if model_id.trim().is_empty() {
        return Err(AppError::validation("model id must not be empty"));
    }
    let template = ctx.api().template(template_id)?;
    let defaults = ctx.api().system_defaults(&default_config_codes())?;
    let request = ChatRequest::from_template(&template, &defaults, bindings)?;
    debug!(messages = request.messages.len(), model = model_id, "Sending chat request");
    ctx.api().chat(model_id, &request)
}

/// Parse `name=value` pairs. A value may be empty; the name may not.
pub fn parse_bindings(pairs: &[String]) -> Result<Bindings, AppError> {
    let mut bindings = Bindings::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(AppError::Validation(format!(
                "Invalid binding '{}': expected name=value",
                pair
            )));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(format!("Invalid binding '{}': empty name", pair)));
        }
        bindings.insert(name.to_string(), value.to_string());
    }
    Ok(bindings)
}

fn read_defaults_file(path: &Path) -> Result<SystemDefaults, AppError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn uses_defaults(template: &PromptTemplate) -> bool {
    [
        &template.system_prompt,
        &template.user_prompt,
        &template.max_tokens,
        &template.temperature,
        &template.top_p,
        &template.top_k,
    ]
    .into_iter()
    .any(|value| *value == PromptValue::UseDefault)
}
