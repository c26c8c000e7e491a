use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::{Value, json};

use crate::domain::{AppError, JobKind, JobRef, JobStatus, RestartMode, StatusSnapshot};
use crate::ports::JobApi;

enum Scripted {
    Status(JobStatus),
    Failure(String),
    Malformed(String),
}

type QueryHook = Box<dyn Fn(&JobRef)>;

#[derive(Default)]
struct State {
    scripts: HashMap<JobRef, VecDeque<Scripted>>,
    queried: Vec<JobRef>,
    started: Vec<JobRef>,
    restarted: Vec<(JobRef, RestartMode)>,
    cancelled: Vec<JobRef>,
    running: HashMap<JobKind, Vec<String>>,
}

/// Scripted in-memory job API. Clones share state.
#[derive(Clone, Default)]
pub struct FakeJobApi {
    state: Rc<RefCell<State>>,
    hook: Rc<RefCell<Option<QueryHook>>>,
}

impl FakeJobApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_statuses(&self, job: &JobRef, statuses: impl IntoIterator<Item = JobStatus>) {
        let mut state = self.state.borrow_mut();
        let queue = state.scripts.entry(job.clone()).or_default();
        queue.extend(statuses.into_iter().map(Scripted::Status));
    }

    pub fn script_failure(&self, job: &JobRef, message: &str) {
        self.push(job, Scripted::Failure(message.to_string()));
    }

    pub fn script_malformed(&self, job: &JobRef, raw_status: &str) {
        self.push(job, Scripted::Malformed(raw_status.to_string()));
    }

    pub fn set_running(&self, kind: JobKind, ids: &[&str]) {
        self.state
            .borrow_mut()
            .running
            .insert(kind, ids.iter().map(|id| id.to_string()).collect());
    }

    /// Run `hook` inside every status query, before the response is returned.
    pub fn on_query(&self, hook: impl Fn(&JobRef) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn queried(&self) -> Vec<JobRef> {
        self.state.borrow().queried.clone()
    }

    pub fn query_count(&self, job: &JobRef) -> usize {
        self.state.borrow().queried.iter().filter(|queried| *queried == job).count()
    }

    pub fn started(&self) -> Vec<JobRef> {
        self.state.borrow().started.clone()
    }

    pub fn restarted(&self) -> Vec<(JobRef, RestartMode)> {
        self.state.borrow().restarted.clone()
    }

    pub fn cancelled(&self) -> Vec<JobRef> {
        self.state.borrow().cancelled.clone()
    }

    fn push(&self, job: &JobRef, scripted: Scripted) {
        self.state.borrow_mut().scripts.entry(job.clone()).or_default().push_back(scripted);
    }
}

impl JobApi for FakeJobApi {
    fn start(&self, job: &JobRef) -> Result<(), AppError> {
        job.validate()?;
        self.state.borrow_mut().started.push(job.clone());
        Ok(())
    }

    fn status(&self, job: &JobRef) -> Result<StatusSnapshot, AppError> {
        let next = {
            let mut state = self.state.borrow_mut();
            state.queried.push(job.clone());
            state.scripts.get_mut(job).and_then(VecDeque::pop_front)
        };

        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(job);
        }

        match next {
            Some(Scripted::Status(status)) => Ok(StatusSnapshot {
                job: job.id.clone(),
                status,
                completed: 0,
                total: 0,
                succeeded: None,
                failed: None,
                progress_percentage: 0.0,
            }),
            Some(Scripted::Failure(message)) => Err(AppError::Transport(message)),
            Some(Scripted::Malformed(raw)) => Err(AppError::MalformedStatus(raw)),
            None => Err(AppError::Transport(format!("no scripted status for {}", job))),
        }
    }

    fn restart(&self, job: &JobRef, mode: RestartMode) -> Result<(), AppError> {
        self.state.borrow_mut().restarted.push((job.clone(), mode));
        Ok(())
    }

    fn cancel(&self, job: &JobRef) -> Result<(), AppError> {
        if !job.kind.supports_cancel() {
            return Err(AppError::validation("cancel is not supported"));
        }
        self.state.borrow_mut().cancelled.push(job.clone());
        Ok(())
    }

    fn running(&self, kind: JobKind) -> Result<Vec<String>, AppError> {
        Ok(self.state.borrow().running.get(&kind).cloned().unwrap_or_default())
    }

    fn check_timeouts(&self, _kind: JobKind) -> Result<Value, AppError> {
        Ok(json!({ "timed_out": 0 }))
    }
}
