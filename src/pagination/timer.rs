use std::future;

use tokio::time::{sleep_until, Duration, Instant};

// About 30 years, the same horizon tokio uses for sleeps that never end.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `after` from now, clamped to a far-off instant when the sum would
/// overflow.
pub(super) fn deadline_after(after: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(after).unwrap_or(now + FAR_FUTURE)
}

/// One-slot deferred revert. Scheduling overwrites whatever was pending, so
/// at most one revert can ever be due for a session.
#[derive(Debug, Default)]
pub struct RevertTimer {
    deadline: Option<Instant>,
}

impl RevertTimer {
    pub fn schedule(&mut self, after: Duration) {
        self.deadline = Some(deadline_after(after));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the scheduled deadline passes and never resolves while
    /// nothing is scheduled. Holds no state of its own, so dropping the
    /// future inside a `select!` loses nothing.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => future::pending().await,
        }
    }
}
