use std::cell::RefCell;
use std::rc::Rc;

use crate::app::poller::PollObserver;
use crate::domain::{AppError, JobStatus, StatusSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Tick(JobStatus),
    Terminal(JobStatus),
    Error(String),
}

/// Observer that records every callback. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<PollEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PollEvent> {
        self.events.borrow().clone()
    }
}

impl PollObserver for RecordingObserver {
    fn on_tick(&mut self, snapshot: &StatusSnapshot) {
        self.events.borrow_mut().push(PollEvent::Tick(snapshot.status));
    }

    fn on_terminal(&mut self, snapshot: StatusSnapshot) {
        self.events.borrow_mut().push(PollEvent::Terminal(snapshot.status));
    }

    fn on_error(&mut self, error: AppError) {
        self.events.borrow_mut().push(PollEvent::Error(error.to_string()));
    }
}
