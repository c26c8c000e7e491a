//! evalctl: prompt template rendering and job polling for an LLM evaluation backend.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::commands::prompt::render_template;
use domain::prompt::{PlainMarkup, RenderedTemplate};

pub use app::AppContext;
pub use app::commands::job::{RestartOutcome, WatchOutcome, WatchReport};
pub use app::poller::{PollObserver, Poller, PollerControl, PollerHandle, PollerScope};
pub use domain::configuration::load_config;
pub use domain::prompt::extract_placeholders;
pub use domain::{
    AppError, Bindings, ConsoleConfig, JobKind, JobRef, JobStatus, PromptTemplate, PromptValue,
    RestartChoice, RestartMode, StatusSnapshot, SystemDefaults,
};
pub use services::{HttpApiClient, SystemClock};

/// Render a template JSON file for terminal display.
pub fn render_file(
    path: &Path,
    defaults: &SystemDefaults,
    bindings: &Bindings,
) -> Result<RenderedTemplate, AppError> {
    let template = read_template(path)?;
    Ok(render_template(&template, defaults, bindings, false, &PlainMarkup))
}

/// Render a template JSON file as plain text for a model.
pub fn render_file_for_machine(
    path: &Path,
    defaults: &SystemDefaults,
    bindings: &Bindings,
) -> Result<RenderedTemplate, AppError> {
    let template = read_template(path)?;
    Ok(render_template(&template, defaults, bindings, true, &PlainMarkup))
}

fn read_template(path: &Path) -> Result<PromptTemplate, AppError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
