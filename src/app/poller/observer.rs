use crate::domain::{AppError, StatusSnapshot};

/// Receives the outcome of each status query for one poll session.
///
/// Exactly one of `on_terminal` and `on_error` fires per session unless the
/// session is stopped first, in which case neither does.
pub trait PollObserver {
    /// A non-terminal status was observed.
    fn on_tick(&mut self, snapshot: &StatusSnapshot);

    /// The job reached a terminal status. Polling has already stopped.
    fn on_terminal(&mut self, snapshot: StatusSnapshot);

    /// The status query failed. Polling has already stopped and is not retried.
    fn on_error(&mut self, error: AppError);
}
