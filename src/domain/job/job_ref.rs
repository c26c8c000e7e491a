use std::fmt;

use crate::domain::AppError;

/// Kinds of asynchronous jobs the backend runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobKind {
    TestTask,
    Evaluation,
}

impl JobKind {
    pub const ALL: [JobKind; 2] = [JobKind::TestTask, JobKind::Evaluation];

    /// Collection path segment on the API.
    pub fn collection(&self) -> &'static str {
        match self {
            JobKind::TestTask => "test-tasks",
            JobKind::Evaluation => "evaluations",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            JobKind::TestTask => "test task",
            JobKind::Evaluation => "evaluation",
        }
    }

    /// Whether the backend exposes a cancel endpoint for this kind.
    pub fn supports_cancel(&self) -> bool {
        matches!(self, JobKind::TestTask)
    }

    /// Parse a user-supplied kind name.
    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "test-task" | "test-tasks" | "task" | "tasks" => Ok(JobKind::TestTask),
            "evaluation" | "evaluations" | "eval" | "evals" => Ok(JobKind::Evaluation),
            _ => Err(AppError::Validation(format!(
                "Invalid job kind '{}': must be one of test-task, evaluation",
                name
            ))),
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identifies one server-side job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobRef {
    pub kind: JobKind,
    pub id: String,
}

impl JobRef {
    pub fn new(kind: JobKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn test_task(id: impl Into<String>) -> Self {
        Self::new(JobKind::TestTask, id)
    }

    pub fn evaluation(id: impl Into<String>) -> Self {
        Self::new(JobKind::Evaluation, id)
    }

    /// Reject blank identifiers before anything touches the network.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{} id must not be empty",
                self.kind.display_name()
            )));
        }
        Ok(())
    }

    /// Resource path, e.g. `test-tasks/42`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind.collection(), self.id)
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.display_name(), self.id)
    }
}
