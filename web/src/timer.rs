use gloo_timers::callback::Timeout;

/// Runs deferred work. The browser uses `setTimeout`; tests drive a manual
/// clock.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

/// A task waiting on its timer. Dropping the handle cancels it; call
/// [`ScheduledTask::detach`] to let it fire on its own.
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    timeout: Option<Timeout>,
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    /// A handle with no timer behind it.
    pub fn inert() -> Self {
        ScheduledTask {
            timeout: None,
            on_cancel: None,
        }
    }

    /// A handle for a task held by some other clock; `on_cancel` runs when
    /// the handle is cancelled or dropped, never after [`detach`](Self::detach).
    pub fn with_cancel(on_cancel: impl FnOnce() + 'static) -> Self {
        ScheduledTask {
            timeout: None,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn cancel(self) {
        drop(self);
    }

    pub fn detach(mut self) {
        self.on_cancel = None;
        if let Some(timeout) = self.timeout.take() {
            timeout.forget();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(on_cancel) = self.on_cancel.take() {
            on_cancel();
        }
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("pending", &(self.timeout.is_some() || self.on_cancel.is_some()))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask {
        ScheduledTask {
            timeout: Some(Timeout::new(delay_ms, task)),
            on_cancel: None,
        }
    }
}
