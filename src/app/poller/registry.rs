use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::PollObserver;
use crate::domain::{AppError, JobRef};
use crate::ports::{Clock, JobApi};

/// Identifies one poll session. Restarting a job yields a new handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PollerHandle {
    job: JobRef,
    generation: u64,
}

impl PollerHandle {
    pub fn job(&self) -> &JobRef {
        &self.job
    }
}

impl fmt::Display for PollerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.job, self.generation)
    }
}

struct Entry {
    generation: u64,
    interval: Duration,
    due_at: Duration,
    /// Taken out while its callback runs.
    observer: Option<Box<dyn PollObserver>>,
}

#[derive(Default)]
struct Registry {
    next_generation: u64,
    entries: HashMap<JobRef, Entry>,
}

impl Registry {
    fn is_current(&self, job: &JobRef, generation: u64) -> bool {
        self.entries.get(job).is_some_and(|entry| entry.generation == generation)
    }

    fn remove_current(&mut self, job: &JobRef, generation: u64) -> Option<Entry> {
        if self.is_current(job, generation) { self.entries.remove(job) } else { None }
    }
}

/// Stops poll sessions without access to the [`Poller`] itself.
///
/// Cheap to clone; observers may hold one to stop their own session.
#[derive(Clone, Default)]
pub struct PollerControl {
    registry: Rc<RefCell<Registry>>,
}

impl PollerControl {
    /// Stop the session behind `handle`.
    ///
    /// Returns `false` when the session already ended or was replaced. A query in
    /// flight for the stopped session is discarded when it returns.
    pub fn stop(&self, handle: &PollerHandle) -> bool {
        let removed = self.registry.borrow_mut().remove_current(&handle.job, handle.generation);
        if removed.is_some() {
            debug!(handle = %handle, "Poller stopped");
        }
        removed.is_some()
    }

    pub fn is_active(&self, handle: &PollerHandle) -> bool {
        self.registry.borrow().is_current(&handle.job, handle.generation)
    }

    pub fn active_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Single-threaded status poller over a [`JobApi`].
pub struct Poller<A: JobApi, C: Clock> {
    api: A,
    clock: C,
    control: PollerControl,
}

impl<A: JobApi, C: Clock> Poller<A, C> {
    pub fn new(api: A, clock: C) -> Self {
        Self { api, clock, control: PollerControl::default() }
    }

    pub fn control(&self) -> PollerControl {
        self.control.clone()
    }

    /// Begin polling `job` every `interval`, first query one interval from now.
    ///
    /// Any existing session for the same job is stopped without callbacks.
    pub fn start(
        &self,
        job: JobRef,
        interval: Duration,
        observer: impl PollObserver + 'static,
    ) -> Result<PollerHandle, AppError> {
        job.validate()?;
        if interval.is_zero() {
            return Err(AppError::validation("poll interval must be greater than zero"));
        }

        let mut registry = self.control.registry.borrow_mut();
        registry.next_generation += 1;
        let generation = registry.next_generation;
        let entry = Entry {
            generation,
            interval,
            due_at: self.clock.now() + interval,
            observer: Some(Box::new(observer)),
        };
        if let Some(previous) = registry.entries.insert(job.clone(), entry) {
            debug!(job = %job, replaced = previous.generation, "Replaced existing poller");
        }

        let handle = PollerHandle { job, generation };
        info!(handle = %handle, interval_ms = interval.as_millis() as u64, "Polling started");
        Ok(handle)
    }

    pub fn stop(&self, handle: &PollerHandle) -> bool {
        self.control.stop(handle)
    }

    pub fn is_active(&self, handle: &PollerHandle) -> bool {
        self.control.is_active(handle)
    }

    pub fn active_count(&self) -> usize {
        self.control.active_count()
    }

    /// Earliest pending deadline, if any session is active.
    pub fn next_due(&self) -> Option<Duration> {
        self.control.registry.borrow().entries.values().map(|entry| entry.due_at).min()
    }

    /// Run every session whose deadline has passed, earliest first.
    ///
    /// Returns the number of status queries issued.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<(Duration, u64, JobRef)> = self
            .control
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|(_, entry)| entry.due_at <= now)
            .map(|(job, entry)| (entry.due_at, entry.generation, job.clone()))
            .collect();
        due.sort();

        let mut queried = 0;
        for (_, generation, job) in due {
            if self.tick(&job, generation) {
                queried += 1;
            }
        }
        queried
    }

    /// Sleep until the next deadline and run what is due.
    ///
    /// Returns `false` without sleeping when no session is active.
    pub fn step(&self) -> bool {
        let Some(due_at) = self.next_due() else {
            return false;
        };
        let now = self.clock.now();
        if due_at > now {
            self.clock.sleep(due_at - now);
        }
        self.run_due();
        true
    }

    /// Drive all sessions until none remain active.
    pub fn run_until_idle(&self) {
        while self.step() {}
    }

    fn tick(&self, job: &JobRef, generation: u64) -> bool {
        // An earlier callback in this pass may have stopped the session.
        if !self.control.registry.borrow().is_current(job, generation) {
            return false;
        }

        debug!(job = %job, "Querying job status");
        let result = self.api.status(job);

        let mut registry = self.control.registry.borrow_mut();
        if !registry.is_current(job, generation) {
            warn!(job = %job, "Discarding status response for a stopped poller");
            return true;
        }

        match result {
            Ok(snapshot) if snapshot.status.is_terminal() => {
                let entry = registry.remove_current(job, generation);
                drop(registry);
                info!(job = %job, status = snapshot.status.as_str(), "Job reached terminal status");
                if let Some(mut observer) = entry.and_then(|entry| entry.observer) {
                    observer.on_terminal(snapshot);
                }
            }
            Ok(snapshot) => {
                let now = self.clock.now();
                let observer = registry.entries.get_mut(job).and_then(|entry| {
                    entry.due_at = now + entry.interval;
                    entry.observer.take()
                });
                drop(registry);
                debug!(job = %job, progress = %snapshot.summary(), "Job still in progress");
                if let Some(mut observer) = observer {
                    observer.on_tick(&snapshot);
                    self.restore_observer(job, generation, observer);
                }
            }
            Err(err) => {
                let entry = registry.remove_current(job, generation);
                drop(registry);
                warn!(job = %job, error = %err, "Polling failed");
                if let Some(mut observer) = entry.and_then(|entry| entry.observer) {
                    observer.on_error(err);
                }
            }
        }
        true
    }

    fn restore_observer(&self, job: &JobRef, generation: u64, observer: Box<dyn PollObserver>) {
        let mut registry = self.control.registry.borrow_mut();
        if let Some(entry) = registry.entries.get_mut(job)
            && entry.generation == generation
        {
            entry.observer = Some(observer);
        }
    }
}
