//! Job status values and the status payload of `GET /{resource}/{id}/status`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::job_ref::JobRef;
use crate::domain::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    /// Stopped with some work done; restartable.
    Partial,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Parse a wire value. Unknown values fail closed.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "partial" => Ok(JobStatus::Partial),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            "cancelled" => Ok(JobStatus::Cancelled),
            other => Err(AppError::MalformedStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Partial => "partial",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// No further transitions happen without an explicit restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a job's status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub job: String,
    pub status: JobStatus,
    pub completed: u64,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    pub progress_percentage: f64,
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    #[serde(default, alias = "task_id", alias = "comparison_id")]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "completed_cases", alias = "completed_pairs", alias = "completed_count")]
    completed: Option<u64>,
    #[serde(default, alias = "total_cases", alias = "total_pairs", alias = "total_count")]
    total: Option<u64>,
    #[serde(default)]
    success_cases: Option<u64>,
    #[serde(default)]
    failed_cases: Option<u64>,
    #[serde(default)]
    progress_percentage: Option<f64>,
}

impl StatusSnapshot {
    /// Decode a status payload for `job`.
    ///
    /// A payload that is not an object or lacks `status` is a transport error; an
    /// unknown status value is a malformed status.
    pub fn from_json(job: &JobRef, value: serde_json::Value) -> Result<Self, AppError> {
        let payload: StatusPayload = serde_json::from_value(value).map_err(|e| {
            AppError::Transport(format!("Failed to parse status for {}: {}", job, e))
        })?;

        let raw_status = payload.status.ok_or_else(|| {
            AppError::Transport(format!("Status payload for {} has no 'status' field", job))
        })?;
        let status = JobStatus::parse(&raw_status)?;

        let completed = payload.completed.unwrap_or(0);
        let total = payload.total.unwrap_or(0);
        let progress_percentage =
            payload.progress_percentage.unwrap_or_else(|| progress(completed, total));

        Ok(Self {
            job: payload.id.unwrap_or_else(|| job.id.clone()),
            status,
            completed,
            total,
            succeeded: payload.success_cases,
            failed: payload.failed_cases,
            progress_percentage,
        })
    }

    /// One-line progress summary for terminal output.
    pub fn summary(&self) -> String {
        format!(
            "{} {:.0}% ({}/{})",
            self.status, self.progress_percentage, self.completed, self.total
        )
    }
}

fn progress(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
