use std::time::Duration;

use super::{PollObserver, Poller, PollerHandle};
use crate::domain::{AppError, JobRef};
use crate::ports::{Clock, JobApi};

/// Owns the poll sessions started through it.
///
/// `unmount` stops exactly those sessions. Sessions started elsewhere on the same
/// poller, including replacements of this scope's jobs, are left alone.
pub struct PollerScope<'p, A: JobApi, C: Clock> {
    poller: &'p Poller<A, C>,
    handles: Vec<PollerHandle>,
}

impl<'p, A: JobApi, C: Clock> PollerScope<'p, A, C> {
    pub fn mount(poller: &'p Poller<A, C>) -> Self {
        Self { poller, handles: Vec::new() }
    }

    pub fn start(
        &mut self,
        job: JobRef,
        interval: Duration,
        observer: impl PollObserver + 'static,
    ) -> Result<PollerHandle, AppError> {
        let handle = self.poller.start(job, interval, observer)?;
        self.handles.retain(|owned| self.poller.is_active(owned));
        self.handles.push(handle.clone());
        Ok(handle)
    }

    pub fn handles(&self) -> &[PollerHandle] {
        &self.handles
    }

    /// Stop every session this scope started. Returns how many were still active.
    pub fn unmount(&mut self) -> usize {
        self.handles.drain(..).filter(|handle| self.poller.stop(handle)).count()
    }
}

impl<A: JobApi, C: Clock> Drop for PollerScope<'_, A, C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
