//! Long-running jobs started on and observed through the admin API.

mod job_ref;
mod restart;
mod status;

pub use job_ref::{JobKind, JobRef};
pub use restart::{RestartChoice, RestartMode};
pub use status::{JobStatus, StatusSnapshot};
