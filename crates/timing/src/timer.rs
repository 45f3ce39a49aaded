use std::{fmt, sync::Arc, time::Duration};

use shared::{domain::duration_millis, error::ConfigError};
use tokio::{runtime::Handle, time::Instant};
use tracing::trace;

pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a task once after a delay and cancel it beforehand.
///
/// The delay is relative to the moment `schedule` is called. Implementations
/// must not run `task` before `schedule` returns; controllers call it while
/// holding their state lock.
pub trait TimerFacility: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Owned handle to a pending task. Dropping it leaves the task scheduled.
pub struct TimerHandle {
    cancel: Box<dyn FnOnce() + Send + 'static>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    pub fn cancel(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    pub fn current() -> Result<Self, ConfigError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| ConfigError::NoRuntime)
    }

    pub fn shared() -> Result<Arc<dyn TimerFacility>, ConfigError> {
        Ok(Arc::new(Self::current()?))
    }
}

impl TimerFacility for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let deadline = Instant::now() + delay;
        let join = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task();
        });
        let abort = join.abort_handle();
        trace!(delay_ms = duration_millis(delay), "timer scheduled");
        TimerHandle::new(move || abort.abort())
    }
}
