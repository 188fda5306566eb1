//! Cancellable subscriptions.
//!
//! Every repeating timer or background listener hands back a `Subscription`.
//! Dropping it (or calling `cancel`) runs the teardown exactly once, and
//! `bind_to_owner` ties that to the current reactive owner so a view's
//! timers die with the view.

use leptos::prelude::{on_cleanup, set_interval_with_handle};
use std::time::Duration;

type Disposer = Box<dyn FnOnce() + Send + Sync>;

/// Handle to something that must be stopped.
#[must_use = "dropping a Subscription stops it immediately"]
pub struct Subscription {
    dispose: Option<Disposer>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Does nothing on drop.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn cancel(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    /// Cancels when the current owner (component) is cleaned up.
    pub fn bind_to_owner(self) {
        on_cleanup(move || drop(self));
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs `tick` every `every`. No immediate first run.
pub fn poll(every: Duration, tick: impl Fn() + 'static) -> Subscription {
    match set_interval_with_handle(tick, every) {
        Ok(handle) => Subscription::new(move || handle.clear()),
        Err(e) => {
            log::error!("[Timer] setInterval failed: {e:?}");
            Subscription::noop()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let sub = Subscription::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn cancel_runs_teardown_once() {
        let (count, mut sub) = counting();
        assert!(sub.is_active());
        sub.cancel();
        sub.cancel();
        assert!(!sub.is_active());
        drop(sub);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_cancels() {
        let (count, sub) = counting();
        drop(sub);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
