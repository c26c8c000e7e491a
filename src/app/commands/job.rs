//! Job lifecycle commands for test tasks and evaluations.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::app::poller::{PollObserver, Poller, PollerScope};
use crate::domain::{AppError, JobKind, JobRef, JobStatus, RestartChoice, StatusSnapshot};
use crate::ports::{Clock, JobApi};

pub fn start<A: JobApi>(ctx: &AppContext<A>, job: &JobRef) -> Result<(), AppError> {
    ctx.api().start(job)?;
    info!(job = %job, "Job started");
    Ok(())
}

pub fn status<A: JobApi>(ctx: &AppContext<A>, job: &JobRef) -> Result<StatusSnapshot, AppError> {
    ctx.api().status(job)
}

/// Cancel a test task. Evaluations cannot be cancelled.
pub fn cancel<A: JobApi>(ctx: &AppContext<A>, job: &JobRef) -> Result<(), AppError> {
    job.validate()?;
    if !job.kind.supports_cancel() {
        return Err(AppError::Validation(format!(
            "Cancelling is not supported for {}s",
            job.kind.display_name()
        )));
    }
    ctx.api().cancel(job)
}

pub fn check_timeouts<A: JobApi>(ctx: &AppContext<A>, kind: JobKind) -> Result<Value, AppError> {
    ctx.api().check_timeouts(kind)
}

/// Result of a restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    Restarted(RestartChoice),
    Aborted,
}

/// Restart a job.
///
/// With no `preset`, a running job asks `choose` how to proceed; any other
/// status restarts normally without asking.
pub fn restart<A, F>(
    ctx: &AppContext<A>,
    job: &JobRef,
    preset: Option<RestartChoice>,
    choose: F,
) -> Result<RestartOutcome, AppError>
where
    A: JobApi,
    F: FnOnce(&StatusSnapshot) -> Result<RestartChoice, AppError>,
{
    job.validate()?;
    let choice = match preset {
        Some(choice) => choice,
        None => {
            let snapshot = ctx.api().status(job)?;
            if snapshot.status == JobStatus::Running {
                choose(&snapshot)?
            } else {
                RestartChoice::Normal
            }
        }
    };

    let Some(mode) = choice.mode() else {
        debug!(job = %job, "Restart aborted");
        return Ok(RestartOutcome::Aborted);
    };
    ctx.api().restart(job, mode)?;
    info!(job = %job, force = mode.is_force(), "Job restarted");
    Ok(RestartOutcome::Restarted(choice))
}

/// How a watch ended.
#[derive(Debug)]
pub enum WatchOutcome {
    Terminal(StatusSnapshot),
    Failed(AppError),
    /// The caller's tick limit was reached first. Polling was stopped.
    TickLimit,
}

#[derive(Debug)]
pub struct WatchReport {
    pub ticks: usize,
    pub outcome: WatchOutcome,
}

#[derive(Default)]
struct WatchState {
    ticks: usize,
    outcome: Option<WatchOutcome>,
}

struct WatchObserver<F> {
    state: Rc<RefCell<WatchState>>,
    on_progress: F,
}

impl<F: FnMut(&StatusSnapshot)> PollObserver for WatchObserver<F> {
    fn on_tick(&mut self, snapshot: &StatusSnapshot) {
        self.state.borrow_mut().ticks += 1;
        (self.on_progress)(snapshot);
    }

    fn on_terminal(&mut self, snapshot: StatusSnapshot) {
        self.state.borrow_mut().outcome = Some(WatchOutcome::Terminal(snapshot));
    }

    fn on_error(&mut self, error: AppError) {
        self.state.borrow_mut().outcome = Some(WatchOutcome::Failed(error));
    }
}

/// Poll `job` until it ends or `max_ticks` non-terminal ticks were observed.
pub fn watch<A, C, F>(
    poller: &Poller<A, C>,
    job: JobRef,
    interval: Duration,
    max_ticks: Option<usize>,
    on_progress: F,
) -> Result<WatchReport, AppError>
where
    A: JobApi,
    C: Clock,
    F: FnMut(&StatusSnapshot) + 'static,
{
    let state = Rc::new(RefCell::new(WatchState::default()));
    let mut scope = PollerScope::mount(poller);
    let handle =
        scope.start(job, interval, WatchObserver { state: Rc::clone(&state), on_progress })?;

    let limit_reached = || max_ticks.is_some_and(|max| state.borrow().ticks >= max);
    while poller.is_active(&handle) && !limit_reached() && poller.step() {}
    scope.unmount();

    let mut state = state.borrow_mut();
    let outcome = state.outcome.take().unwrap_or(WatchOutcome::TickLimit);
    Ok(WatchReport { ticks: state.ticks, outcome })
}

/// Follow the first running job of `kind` until it ends.
///
/// Returns `None` when nothing of that kind is running.
pub fn watch_running<A, P, C>(
    ctx: &AppContext<A>,
    poller: &Poller<P, C>,
    kind: JobKind,
) -> Result<Option<(JobRef, WatchReport)>, AppError>
where
    A: JobApi,
    P: JobApi,
    C: Clock,
{
    let running = ctx.api().running(kind)?;
    let Some(id) = running.into_iter().next() else {
        return Ok(None);
    };

    let job = JobRef::new(kind, id);
    info!(job = %job, "Following running job");
    let report = watch(
        poller,
        job.clone(),
        ctx.config().polling.background_interval(),
        None,
        |_: &StatusSnapshot| {},
    )?;
    Ok(Some((job, report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConsoleConfig, RestartMode};
    use crate::testing::{FakeJobApi, ManualClock};

    const INTERVAL: Duration = Duration::from_millis(10);

    fn context(api: &FakeJobApi) -> AppContext<FakeJobApi> {
        AppContext::new(api.clone(), ConsoleConfig::default())
    }

    #[test]
    fn restart_asks_only_for_running_jobs() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        api.script_statuses(&job, [JobStatus::Running]);
        let ctx = context(&api);

        let outcome = restart(&ctx, &job, None, |snapshot| {
            assert_eq!(snapshot.status, JobStatus::Running);
            Ok(RestartChoice::Force)
        })
        .unwrap();

        assert_eq!(outcome, RestartOutcome::Restarted(RestartChoice::Force));
        assert_eq!(api.restarted(), vec![(job, RestartMode::Force)]);
    }

    #[test]
    fn restart_of_failed_job_is_normal_without_asking() {
        let api = FakeJobApi::new();
        let job = JobRef::evaluation("e-1");
        api.script_statuses(&job, [JobStatus::Failed]);
        let ctx = context(&api);

        let outcome =
            restart(&ctx, &job, None, |_| panic!("chooser must not be called")).unwrap();

        assert_eq!(outcome, RestartOutcome::Restarted(RestartChoice::Normal));
        assert_eq!(api.restarted(), vec![(job, RestartMode::Normal)]);
    }

    #[test]
    fn abort_makes_no_request() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        api.script_statuses(&job, [JobStatus::Running]);
        let ctx = context(&api);

        let outcome = restart(&ctx, &job, None, |_| Ok(RestartChoice::Abort)).unwrap();

        assert_eq!(outcome, RestartOutcome::Aborted);
        assert!(api.restarted().is_empty());
    }

    #[test]
    fn preset_choice_skips_status_query() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        let ctx = context(&api);

        restart(&ctx, &job, Some(RestartChoice::Normal), |_| Ok(RestartChoice::Abort)).unwrap();

        assert!(api.queried().is_empty());
        assert_eq!(api.restarted(), vec![(job, RestartMode::Normal)]);
    }

    #[test]
    fn cancel_rejects_evaluations() {
        let api = FakeJobApi::new();
        let ctx = context(&api);

        let err = cancel(&ctx, &JobRef::evaluation("e-1")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(api.cancelled().is_empty());

        cancel(&ctx, &JobRef::test_task("t-1")).unwrap();
        assert_eq!(api.cancelled(), vec![JobRef::test_task("t-1")]);
    }

    #[test]
    fn watch_reports_progress_then_terminal() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        api.script_statuses(&job, [JobStatus::Running, JobStatus::Partial, JobStatus::Completed]);
        let poller = Poller::new(api.clone(), ManualClock::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let report = watch(&poller, job, INTERVAL, None, move |snapshot: &StatusSnapshot| {
            sink.borrow_mut().push(snapshot.status)
        })
        .unwrap();

        assert_eq!(report.ticks, 2);
        assert!(matches!(report.outcome, WatchOutcome::Terminal(ref s) if s.status == JobStatus::Completed));
        assert_eq!(*seen.borrow(), vec![JobStatus::Running, JobStatus::Partial]);
    }

    #[test]
    fn watch_stops_at_tick_limit() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        api.script_statuses(&job, [JobStatus::Running, JobStatus::Running, JobStatus::Running]);
        let poller = Poller::new(api.clone(), ManualClock::new());

        let report = watch(&poller, job.clone(), INTERVAL, Some(2), |_: &StatusSnapshot| {}).unwrap();

        assert_eq!(report.ticks, 2);
        assert!(matches!(report.outcome, WatchOutcome::TickLimit));
        assert_eq!(api.query_count(&job), 2);
        assert_eq!(poller.active_count(), 0);
    }

    #[test]
    fn zero_tick_limit_makes_no_query() {
        let api = FakeJobApi::new();
        let job = JobRef::test_task("t-1");
        api.script_statuses(&job, [JobStatus::Completed]);
        let poller = Poller::new(api.clone(), ManualClock::new());

        let report = watch(&poller, job.clone(), INTERVAL, Some(0), |_: &StatusSnapshot| {}).unwrap();

        assert_eq!(report.ticks, 0);
        assert!(matches!(report.outcome, WatchOutcome::TickLimit));
        assert_eq!(api.query_count(&job), 0);
        assert_eq!(poller.active_count(), 0);
    }

    #[test]
    fn watch_surfaces_poll_errors() {
        let api = FakeJobApi::new();
        let job = JobRef::evaluation("e-1");
        api.script_failure(&job, "HTTP error! status: 502");
        let poller = Poller::new(api.clone(), ManualClock::new());

        let report = watch(&poller, job, INTERVAL, None, |_: &StatusSnapshot| {}).unwrap();

        assert_eq!(report.ticks, 0);
        assert!(matches!(report.outcome, WatchOutcome::Failed(AppError::Transport(_))));
    }

    #[test]
    fn watch_running_follows_first_running_job() {
        let api = FakeJobApi::new();
        api.set_running(JobKind::Evaluation, &["e-7", "e-8"]);
        let job = JobRef::evaluation("e-7");
        api.script_statuses(&job, [JobStatus::Running, JobStatus::Completed]);
        let clock = ManualClock::new();
        let poller = Poller::new(api.clone(), clock.clone());
        let ctx = context(&api);

        let (followed, report) = watch_running(&ctx, &poller, JobKind::Evaluation).unwrap().unwrap();

        assert_eq!(followed, job);
        assert!(matches!(report.outcome, WatchOutcome::Terminal(_)));
        assert_eq!(clock.now(), ctx.config().polling.background_interval() * 2);
    }

    #[test]
    fn watch_running_with_nothing_running() {
        let api = FakeJobApi::new();
        let poller = Poller::new(api.clone(), ManualClock::new());
        let ctx = context(&api);

        assert!(watch_running(&ctx, &poller, JobKind::TestTask).unwrap().is_none());
    }
}
