//! Periodic status polling for long-running jobs.
//!
//! A [`Poller`] keeps at most one active poll per job. Ticks are driven
//! explicitly through [`Poller::run_due`] or [`Poller::run_until_idle`], with
//! time supplied by an injected [`Clock`](crate::ports::Clock).

mod observer;
mod registry;
mod scope;

pub use observer::PollObserver;
pub use registry::{Poller, PollerControl, PollerHandle};
pub use scope::PollerScope;
