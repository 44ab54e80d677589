use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Owns at most one pending delayed action.
///
/// Scheduling a new action cancels the previous one if its delay has not
/// elapsed yet. Once the delay elapses the action is detached onto its own
/// task, so cancelling never interrupts an action that already fired.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Drops the pending action, if any. Returns whether one was still waiting.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                if waiting {
                    trace!("Cancelled pending debounced action");
                }
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Callable returned by [`debounce`]
pub struct Debounced<F> {
    action: Arc<F>,
    debouncer: Debouncer,
}

/// Wraps `action` so that a burst of calls runs it once, `delay` after the
/// last call, with that call's arguments. Nothing is returned to the caller.
pub fn debounce<F>(action: F, delay: Duration) -> Debounced<F> {
    Debounced {
        action: Arc::new(action),
        debouncer: Debouncer::new(delay),
    }
}

impl<F> Debounced<F> {
    pub fn call<A, Fut>(&mut self, args: A)
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
        A: Send + 'static,
    {
        let action = Arc::clone(&self.action);
        self.debouncer.schedule(async move { (*action)(args).await });
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.debouncer.cancel_pending()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
