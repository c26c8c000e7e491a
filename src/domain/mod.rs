pub mod configuration;
pub mod error;
pub mod job;
pub mod prompt;
pub mod resource;

pub use configuration::{ApiConfig, ConsoleConfig, PollingConfig};
pub use error::AppError;
pub use job::{JobKind, JobRef, JobStatus, RestartChoice, RestartMode, StatusSnapshot};
pub use prompt::{
    Bindings, PromptTemplate, PromptValue, ResolvedPrompt, SystemDefaults, TemplateField,
};
pub use resource::Resource;
