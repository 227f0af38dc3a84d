//! Route trigger — the one cancellable suspension point.
//!
//! Navigating arms a delayed hint check. Each arm gets a fresh `TriggerId`;
//! arming again (or cancelling) aborts the previous task and retires its id.
//! A task that wakes up anyway must still present the current id, checked
//! under the state lock, before it may act.

use tokio::task::JoinHandle;

/// Handle identifying one armed trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(u64);

#[derive(Debug)]
struct PendingTrigger {
    id: TriggerId,
    route: String,
    handle: JoinHandle<()>,
}

/// At most one pending route trigger.
#[derive(Debug, Default)]
pub struct RouteTrigger {
    last_id: u64,
    pending: Option<PendingTrigger>,
}

impl RouteTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending trigger and arm a new one for `route`.
    ///
    /// `spawn` receives the new id and returns the task that will fire it.
    pub fn arm<F>(&mut self, route: &str, spawn: F) -> TriggerId
    where
        F: FnOnce(TriggerId) -> JoinHandle<()>,
    {
        self.cancel();
        self.last_id += 1;
        let id = TriggerId(self.last_id);
        let handle = spawn(id);
        self.pending = Some(PendingTrigger {
            id,
            route: route.to_string(),
            handle,
        });
        id
    }

    /// Abort the pending trigger, if any.
    pub fn cancel(&mut self) -> Option<TriggerId> {
        let pending = self.pending.take()?;
        pending.handle.abort();
        Some(pending.id)
    }

    /// Whether `id` is the trigger currently armed.
    pub fn is_current(&self, id: TriggerId) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == id)
    }

    /// Route of the pending trigger.
    pub fn pending_route(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.route.as_str())
    }

    /// Claim the trigger when it fires. Returns its route only if `id` is
    /// still the armed one; stale ids get `None`.
    pub fn claim(&mut self, id: TriggerId) -> Option<String> {
        if !self.is_current(id) {
            return None;
        }
        self.pending.take().map(|p| p.route)
    }
}

impl Drop for RouteTrigger {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sleeper() -> JoinHandle<()> {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        })
    }

    #[tokio::test]
    async fn arming_again_retires_previous_id() {
        let mut trigger = RouteTrigger::new();
        let first = trigger.arm("/a", |_| sleeper());
        let second = trigger.arm("/b", |_| sleeper());

        assert_ne!(first, second);
        assert!(!trigger.is_current(first));
        assert!(trigger.is_current(second));
        assert_eq!(trigger.pending_route(), Some("/b"));
        assert_eq!(trigger.claim(first), None);
    }

    #[tokio::test]
    async fn claim_is_single_use() {
        let mut trigger = RouteTrigger::new();
        let id = trigger.arm("/a", |_| sleeper());
        assert_eq!(trigger.claim(id).as_deref(), Some("/a"));
        assert_eq!(trigger.claim(id), None);
        assert!(trigger.pending_route().is_none());
    }

    #[tokio::test]
    async fn cancel_aborts_task() {
        let mut trigger = RouteTrigger::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let id = trigger.arm("/a", |_| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                let _ = tx.send(());
            })
        });

        assert_eq!(trigger.cancel(), Some(id));
        assert!(trigger.cancel().is_none());
        // The aborted task drops its sender without sending.
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn spawn_receives_the_new_id() {
        let mut trigger = RouteTrigger::new();
        let mut seen = None;
        let id = trigger.arm("/a", |id| {
            seen = Some(id);
            sleeper()
        });
        assert_eq!(seen, Some(id));
    }
}
