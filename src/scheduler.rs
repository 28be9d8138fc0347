//! Cancellable timers that report back over the event channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::{debug, trace};

use crate::state::{Event, TimerKey};

/// Called from the timer task right after its event is queued
pub type WakeHook = Arc<dyn Fn() + Send + Sync>;

pub struct Scheduler {
    handle: Handle,
    tx: UnboundedSender<Event>,
    pending: HashMap<TimerKey, JoinHandle<()>>,
    wake: Option<WakeHook>,
}

impl Scheduler {
    pub fn new(handle: Handle, tx: UnboundedSender<Event>) -> Self {
        Self {
            handle,
            tx,
            pending: HashMap::new(),
            wake: None,
        }
    }

    /// Lets the window repaint as soon as a timer fires instead of on its next poll.
    pub fn set_wake(&mut self, wake: WakeHook) {
        self.wake = Some(wake);
    }

    /// Sends `event` after `after`. A pending timer with the same key is aborted first.
    pub fn schedule(&mut self, key: TimerKey, after: Duration, event: Event) {
        self.pending.retain(|_, task| !task.is_finished());
        if let Some(old) = self.pending.remove(&key) {
            debug!(?key, "replacing pending timer");
            old.abort();
        }

        let tx = self.tx.clone();
        let wake = self.wake.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(after).await;
            trace!(?key, "timer fired");
            // Receiver gone means the window closed; nothing left to notify.
            if tx.send(event).is_ok() {
                if let Some(wake) = wake {
                    wake();
                }
            }
        });
        self.pending.insert(key, task);
    }

    /// Aborts the timer for `key`; unknown keys are ignored.
    pub fn cancel(&mut self, key: TimerKey) {
        if let Some(task) = self.pending.remove(&key) {
            if !task.is_finished() {
                debug!(?key, "cancelled timer");
            }
            task.abort();
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending
            .get(&key)
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}
