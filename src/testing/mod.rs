mod fake_job_api;
mod fake_prompt_api;
mod fake_resource_api;
mod manual_clock;
mod recording_observer;

pub use fake_job_api::FakeJobApi;
pub use fake_prompt_api::FakePromptApi;
pub use fake_resource_api::FakeResourceApi;
pub use manual_clock::ManualClock;
pub use recording_observer::{PollEvent, RecordingObserver};
