//! Restart modes for stalled or failed jobs.

/// How a restart request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartMode {
    /// Subject to the backend's staleness guard for running jobs.
    #[default]
    Normal,
    /// Bypass the staleness guard.
    Force,
}

impl RestartMode {
    pub fn is_force(&self) -> bool {
        matches!(self, RestartMode::Force)
    }
}

/// Answer to "restart a running job?". Declining is its own choice rather than a
/// missing answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartChoice {
    Force,
    Normal,
    Abort,
}

impl RestartChoice {
    pub const ALL: [RestartChoice; 3] =
        [RestartChoice::Normal, RestartChoice::Force, RestartChoice::Abort];

    pub fn label(&self) -> &'static str {
        match self {
            RestartChoice::Normal => "Normal restart (only if the job has gone stale)",
            RestartChoice::Force => "Force restart (ignore the staleness guard)",
            RestartChoice::Abort => "Abort",
        }
    }

    /// Mode to send, or `None` when nothing should be sent.
    pub fn mode(&self) -> Option<RestartMode> {
        match self {
            RestartChoice::Force => Some(RestartMode::Force),
            RestartChoice::Normal => Some(RestartMode::Normal),
            RestartChoice::Abort => None,
        }
    }

    /// Choice implied by command-line flags, if any.
    pub fn from_flags(force: bool, normal: bool) -> Option<Self> {
        match (force, normal) {
            (true, _) => Some(RestartChoice::Force),
            (false, true) => Some(RestartChoice::Normal),
            (false, false) => None,
        }
    }
}
