use std::sync::{Arc, Mutex};

use shared::{domain::PolicyKind, error::ConfigError};
use tracing::debug;

use crate::{
    config::{ControllerConfig, Resolved},
    state::{lock, PendingTimer},
};

/// Fires the callback at most once per delay window.
///
/// The first trigger of a window schedules the callback for the end of the
/// window; later triggers in the same window only run `reset`. Note that the
/// callback runs when the window expires, not on the first trigger, which
/// differs from classic leading-edge throttling.
#[derive(Clone)]
pub struct Throttle {
    inner: Arc<Inner>,
}

struct Inner {
    config: Resolved,
    pending: Mutex<PendingTimer>,
}

impl Throttle {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        let config = config.resolve(PolicyKind::Throttle)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                pending: Mutex::new(PendingTimer::default()),
            }),
        })
    }

    pub fn trigger(&self) {
        let suppressed = {
            let mut pending = lock(&self.inner.pending);
            if pending.is_armed() {
                true
            } else {
                let generation = pending.next_generation();
                let inner = Arc::clone(&self.inner);
                let handle = self.inner.config.timer.schedule(
                    self.inner.config.delay,
                    Box::new(move || inner.fire(generation)),
                );
                pending.arm(generation, handle);
                false
            }
        };

        if suppressed {
            debug!(policy = "throttle", "trigger suppressed inside window");
            self.inner.config.run_reset();
        }
    }
}

impl Inner {
    fn fire(&self, generation: u64) {
        if !lock(&self.pending).complete(generation) {
            return;
        }
        debug!(policy = "throttle", "window expired, firing callback");
        (self.config.callback)();
    }
}

#[cfg(test)]
#[path = "tests/throttle_tests.rs"]
mod tests;
