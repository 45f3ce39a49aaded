use std::sync::{Arc, Mutex};

use shared::{domain::PolicyKind, error::ConfigError};
use tracing::debug;

use crate::{
    config::{ControllerConfig, Resolved},
    state::{lock, PendingTimer},
};

/// Collapses a burst of triggers into one trailing callback, fired once
/// triggers have stopped for the configured delay.
///
/// Each trigger that lands while a callback is still pending cancels it and
/// runs `reset`. A cancelled callback never fires.
#[derive(Clone)]
pub struct Debounce {
    inner: Arc<Inner>,
}

struct Inner {
    config: Resolved,
    pending: Mutex<PendingTimer>,
}

impl Debounce {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        let config = config.resolve(PolicyKind::Debounce)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                pending: Mutex::new(PendingTimer::default()),
            }),
        })
    }

    pub fn trigger(&self) {
        let superseded = {
            let mut pending = lock(&self.inner.pending);
            let superseded = pending.cancel();
            let generation = pending.next_generation();
            let inner = Arc::clone(&self.inner);
            let handle = self.inner.config.timer.schedule(
                self.inner.config.delay,
                Box::new(move || inner.fire(generation)),
            );
            pending.arm(generation, handle);
            superseded
        };

        if superseded {
            debug!(policy = "debounce", "pending callback superseded");
            self.inner.config.run_reset();
        }
    }
}

impl Inner {
    fn fire(&self, generation: u64) {
        if !lock(&self.pending).complete(generation) {
            return;
        }
        debug!(policy = "debounce", "firing callback");
        (self.config.callback)();
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
