//! Job API port definition.

use serde_json::Value;

use crate::domain::{AppError, JobKind, JobRef, RestartMode, StatusSnapshot};

/// Port for the asynchronous job endpoints.
pub trait JobApi {
    /// Begin executing a job. Returns once the backend accepted the request.
    fn start(&self, job: &JobRef) -> Result<(), AppError>;

    /// Query the current status of a job.
    fn status(&self, job: &JobRef) -> Result<StatusSnapshot, AppError>;

    /// Re-arm a stalled or failed job.
    fn restart(&self, job: &JobRef, mode: RestartMode) -> Result<(), AppError>;

    /// Cancel a running job.
    fn cancel(&self, job: &JobRef) -> Result<(), AppError>;

    /// Identifiers of jobs of `kind` currently running.
    fn running(&self, kind: JobKind) -> Result<Vec<String>, AppError>;

    /// Ask the backend to mark stale running jobs of `kind` as failed.
    fn check_timeouts(&self, kind: JobKind) -> Result<Value, AppError>;
}

impl<T: JobApi + ?Sized> JobApi for &T {
    fn start(&self, job: &JobRef) -> Result<(), AppError> {
        (**self).start(job)
    }

    fn status(&self, job: &JobRef) -> Result<StatusSnapshot, AppError> {
        (**self).status(job)
    }

    fn restart(&self, job: &JobRef, mode: RestartMode) -> Result<(), AppError> {
        (**self).restart(job, mode)
    }

    fn cancel(&self, job: &JobRef) -> Result<(), AppError> {
        (**self).cancel(job)
    }

    fn running(&self, kind: JobKind) -> Result<Vec<String>, AppError> {
        (**self).running(kind)
    }

    fn check_timeouts(&self, kind: JobKind) -> Result<Value, AppError> {
        (**self).check_timeouts(kind)
    }
}
