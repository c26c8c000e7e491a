//! Time source port for polling.

use std::time::Duration;

/// Monotonic time source.
///
/// `now` is measured from an arbitrary origin fixed for the clock's lifetime.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Block until `duration` has elapsed.
    fn sleep(&self, duration: Duration);
}
