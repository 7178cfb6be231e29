//! Tokio-backed implementation of the session scheduler contract.
//!
//! Each scheduled task is a sleeping tokio task that pushes the deferred work
//! into a channel the host's event loop drains back into the session
//! controller. Cancellation aborts the sleeper, so a cancelled token can
//! never fire.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use brasa_session::{DeferredTask, Scheduler, TimerToken};

pub struct TokioScheduler {
    tx: UnboundedSender<DeferredTask>,
    tasks: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_token: AtomicU64,
}

impl TokioScheduler {
    /// Returns the scheduler and the channel end that fired tasks arrive on.
    pub fn new() -> (Self, UnboundedReceiver<DeferredTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: Mutex::new(HashMap::new()),
                next_token: AtomicU64::new(1),
            },
            rx,
        )
    }

    fn prune_finished(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|_, handle| !handle.is_finished());
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerToken {
        self.prune_finished();

        let raw = self.next_token.fetch_add(1, Ordering::Relaxed);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(task);
        });

        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.insert(raw, handle);
        }
        TimerToken::from_raw(raw)
    }

    fn cancel(&self, token: TimerToken) {
        if let Ok(mut tasks) = self.tasks.lock() {
            if let Some(handle) = tasks.remove(&token.raw()) {
                handle.abort();
            }
        }
    }
}
