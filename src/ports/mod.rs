mod clock;
mod job_api;
mod prompt_api;
mod resource_api;

pub use clock::Clock;
pub use job_api::JobApi;
pub use prompt_api::PromptApi;
pub use resource_api::ResourceApi;
