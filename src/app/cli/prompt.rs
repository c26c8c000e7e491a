use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::json;

use crate::app::commands::prompt::{
    self, DefaultsSource, RenderOptions, TemplateSource, parse_bindings,
};
use crate::domain::AppError;

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Template JSON file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Prompt template id on the backend
    #[arg(long)]
    id: Option<String>,
}

impl SourceArgs {
    fn into_source(self) -> Result<TemplateSource, AppError> {
        match (self.file, self.id) {
            (Some(path), _) => Ok(TemplateSource::File(path)),
            (None, Some(id)) => Ok(TemplateSource::Id(id)),
            (None, None) => Err(AppError::validation("either --file or --id is required")),
        }
    }
}

pub fn run_vars(config: Option<&Path>, source: SourceArgs) -> Result<(), AppError> {
    let ctx = super::connect(config)?;
    for name in prompt::variables(&ctx, &source.into_source()?)? {
        println!("{}", name);
    }
    Ok(())
}

pub fn run_render(
    config: Option<&Path>,
    source: SourceArgs,
    vars: Vec<String>,
    machine: bool,
    defaults: Option<PathBuf>,
) -> Result<(), AppError> {
    let ctx = super::connect(config)?;
    let options = RenderOptions {
        bindings: parse_bindings(&vars)?,
        defaults: defaults.map(DefaultsSource::File).unwrap_or_default(),
        machine,
    };
    let rendered = prompt::render(&ctx, &source.into_source()?, &options)?;

    if machine {
        let output = json!({
            "system_prompt": rendered.system_prompt,
            "user_prompt": rendered.user_prompt,
        });
        return super::print_json(&output);
    }

    println!("System prompt:");
    println!("{}", rendered.system_prompt);
    println!();
    println!("User prompt:");
    println!("{}", rendered.user_prompt);
    if !rendered.awaiting.is_empty() {
        println!();
        println!("⚠️  Awaiting input: {}", rendered.awaiting.join(", "));
    }
    Ok(())
}

pub fn run_generate(
    config: Option<&Path>,
    template_id: &str,
    model_id: &str,
    vars: Vec<String>,
) -> Result<(), AppError> {
    let ctx = super::connect(config)?;
    let response = prompt::generate(&ctx, template_id, model_id, &parse_bindings(&vars)?)?;
    println!("{}", response.content);
    Ok(())
}
