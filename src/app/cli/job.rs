use std::path::Path;
use std::time::Duration;

use dialoguer::Select;

use crate::app::commands::job::{self, RestartOutcome, WatchOutcome, WatchReport};
use crate::app::poller::Poller;
use crate::domain::{AppError, JobKind, JobRef, JobStatus, RestartChoice, StatusSnapshot};
use crate::services::SystemClock;

fn job_ref(kind: &str, id: String) -> Result<JobRef, AppError> {
    let job = JobRef::new(JobKind::parse(kind)?, id);
    job.validate()?;
    Ok(job)
}

pub fn run_start(config: Option<&Path>, kind: &str, id: String, watch: bool) -> Result<i32, AppError> {
    let job = job_ref(kind, id)?;
    let ctx = super::connect(config)?;
    job::start(&ctx, &job)?;
    println!("✅ Started {}", job);

    if !watch {
        return Ok(0);
    }
    let poller = Poller::new(ctx.api(), SystemClock::new());
    let report = job::watch(&poller, job.clone(), ctx.config().polling.interval(), None, print_progress)?;
    report_outcome(&job, report)
}

pub fn run_watch(
    config: Option<&Path>,
    kind: &str,
    id: String,
    interval_ms: Option<u64>,
    max_ticks: Option<usize>,
) -> Result<i32, AppError> {
    let job = job_ref(kind, id)?;
    let ctx = super::connect(config)?;
    let interval = interval_ms.map(Duration::from_millis).unwrap_or(ctx.config().polling.interval());

    let poller = Poller::new(ctx.api(), SystemClock::new());
    let report = job::watch(&poller, job.clone(), interval, max_ticks, print_progress)?;
    report_outcome(&job, report)
}

pub fn run_watch_running(config: Option<&Path>, kind: &str) -> Result<i32, AppError> {
    let kind = JobKind::parse(kind)?;
    let ctx = super::connect(config)?;
    let poller = Poller::new(ctx.api(), SystemClock::new());

    match job::watch_running(&ctx, &poller, kind)? {
        Some((job, report)) => report_outcome(&job, report),
        None => {
            println!("ℹ️ No running {}s", kind);
            Ok(0)
        }
    }
}

pub fn run_status(config: Option<&Path>, kind: &str, id: String) -> Result<(), AppError> {
    let job = job_ref(kind, id)?;
    let ctx = super::connect(config)?;
    let snapshot = job::status(&ctx, &job)?;
    println!("{}: {}", job, snapshot.summary());
    if let (Some(succeeded), Some(failed)) = (snapshot.succeeded, snapshot.failed) {
        println!("  succeeded: {}, failed: {}", succeeded, failed);
    }
    Ok(())
}

pub fn run_restart(
    config: Option<&Path>,
    kind: &str,
    id: String,
    force: bool,
    normal: bool,
) -> Result<(), AppError> {
    let job = job_ref(kind, id)?;
    let ctx = super::connect(config)?;

    match job::restart(&ctx, &job, RestartChoice::from_flags(force, normal), prompt_restart_choice)? {
        RestartOutcome::Restarted(RestartChoice::Force) => println!("✅ Force-restarted {}", job),
        RestartOutcome::Restarted(_) => println!("✅ Restarted {}", job),
        RestartOutcome::Aborted => println!("ℹ️ Restart aborted"),
    }
    Ok(())
}

pub fn run_cancel(config: Option<&Path>, id: String) -> Result<(), AppError> {
    let job = job_ref("test-task", id)?;
    let ctx = super::connect(config)?;
    job::cancel(&ctx, &job)?;
    println!("✅ Cancelled {}", job);
    Ok(())
}

pub fn run_check_timeout(config: Option<&Path>, kind: &str) -> Result<(), AppError> {
    let kind = JobKind::parse(kind)?;
    let ctx = super::connect(config)?;
    super::print_json(&job::check_timeouts(&ctx, kind)?)
}

fn print_progress(snapshot: &StatusSnapshot) {
    println!("⏳ {}", snapshot.summary());
}

fn report_outcome(job: &JobRef, report: WatchReport) -> Result<i32, AppError> {
    match report.outcome {
        WatchOutcome::Terminal(snapshot) if snapshot.status == JobStatus::Completed => {
            println!("✅ {} completed: {}", job, snapshot.summary());
            Ok(0)
        }
        WatchOutcome::Terminal(snapshot) => {
            println!("❌ {} ended {}: {}", job, snapshot.status, snapshot.summary());
            Ok(1)
        }
        WatchOutcome::Failed(err) => Err(err),
        WatchOutcome::TickLimit => {
            println!("ℹ️ Stopped watching {} after {} status report(s)", job, report.ticks);
            Ok(0)
        }
    }
}

fn prompt_restart_choice(snapshot: &StatusSnapshot) -> Result<RestartChoice, AppError> {
    let items: Vec<&str> = RestartChoice::ALL.iter().map(RestartChoice::label).collect();
    let selection = Select::new()
        .with_prompt(format!("Job is still running ({}). Restart how?", snapshot.summary()))
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::Validation(format!("Failed to select restart mode: {}", err)))?;

    Ok(selection.map(|index| RestartChoice::ALL[index]).unwrap_or(RestartChoice::Abort))
}
