//! Cancellable deferred tasks.
//!
//! The state machine owns two kinds of deferrals: the 5 s profile grace
//! period and the 100 ms redirect settle delay. Both are modeled as explicit
//! scheduled tasks tied to the controller's lifecycle: the controller stores
//! every token it receives and cancels it on teardown or identity change, so
//! no timer can outlive its owner and fire against stale state.

use std::cell::RefCell;
use std::time::Duration;

use brasa_core::UserId;

use crate::redirect::RedirectIntent;

/// Handle to a scheduled task, used only for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Work the controller deferred to a later tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// The profile grace period elapsed for this identity.
    GraceExpired { user_id: UserId },
    /// A redirect whose settle delay elapsed.
    Redirect(RedirectIntent),
}

/// Deferred-task scheduler.
///
/// Hosts route fired tasks back into the controller
/// (`SessionController::handle_deferred`). A cancelled token must never fire.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerToken;
    fn cancel(&self, token: TimerToken);
}

/// Deterministic scheduler for tests and simulations.
///
/// Time only moves when [`ManualScheduler::advance`] is called; due tasks are
/// returned to the caller in scheduling order for manual delivery.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: RefCell<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_token: u64,
    pending: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    token: TimerToken,
    remaining: Duration,
    task: DeferredTask,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, removing and returning every task that became due.
    pub fn advance(&self, elapsed: Duration) -> Vec<DeferredTask> {
        let mut inner = self.inner.borrow_mut();
        let mut due = Vec::new();
        let mut remaining_entries = Vec::new();

        for mut entry in inner.pending.drain(..) {
            if entry.remaining <= elapsed {
                due.push(entry.task);
            } else {
                entry.remaining -= elapsed;
                remaining_entries.push(entry);
            }
        }

        inner.pending = remaining_entries;
        due
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn pending_tasks(&self) -> Vec<DeferredTask> {
        self.inner.borrow().pending.iter().map(|e| e.task.clone()).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerToken {
        let mut inner = self.inner.borrow_mut();
        inner.next_token += 1;
        let token = TimerToken(inner.next_token);
        inner.pending.push(Entry {
            token,
            remaining: delay,
            task,
        });
        token
    }

    fn cancel(&self, token: TimerToken) {
        self.inner.borrow_mut().pending.retain(|e| e.token != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> DeferredTask {
        DeferredTask::GraceExpired {
            user_id: UserId::new(),
        }
    }

    #[test]
    fn tasks_fire_only_once_due() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(100), task());
        scheduler.schedule(Duration::from_millis(5000), task());

        let fired = scheduler.advance(Duration::from_millis(100));
        assert_eq!(fired.len(), 1);
        assert_eq!(scheduler.pending_count(), 1);

        let fired = scheduler.advance(Duration::from_millis(4900));
        assert_eq!(fired.len(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn cancelled_tokens_never_fire() {
        let scheduler = ManualScheduler::new();
        let token = scheduler.schedule(Duration::from_millis(100), task());
        scheduler.cancel(token);

        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn partial_advance_reduces_remaining_time() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(5000), task());

        assert!(scheduler.advance(Duration::from_millis(4999)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)).len(), 1);
    }
}
