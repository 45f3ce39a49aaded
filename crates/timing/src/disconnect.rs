use std::sync::{Arc, Mutex};

use shared::{domain::PolicyKind, error::ConfigError};
use tracing::debug;

use crate::{
    config::{ControllerConfig, Resolved},
    state::{lock, PendingTimer},
};

/// Fires the callback immediately on the first trigger of a burst, then
/// runs `reset` for every trigger until the cooldown started by that firing
/// trigger has elapsed. Suppressed triggers do not extend the cooldown.
///
/// The cooldown is armed before the callback runs, so a trigger issued from
/// inside the callback is already suppressed.
#[derive(Clone)]
pub struct Disconnect {
    inner: Arc<Inner>,
}

struct Inner {
    config: Resolved,
    state: Mutex<State>,
}

struct State {
    active: bool,
    cooldown: PendingTimer,
}

impl Disconnect {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        let config = config.resolve(PolicyKind::Disconnect)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(State {
                    active: true,
                    cooldown: PendingTimer::default(),
                }),
            }),
        })
    }

    pub fn trigger(&self) {
        let fire = {
            let mut state = lock(&self.inner.state);
            if state.active {
                state.active = false;
                let generation = state.cooldown.next_generation();
                let inner = Arc::clone(&self.inner);
                let handle = self.inner.config.timer.schedule(
                    self.inner.config.delay,
                    Box::new(move || inner.reactivate(generation)),
                );
                state.cooldown.arm(generation, handle);
                true
            } else {
                false
            }
        };

        if fire {
            debug!(policy = "disconnect", "firing callback, cooldown started");
            (self.inner.config.callback)();
        } else {
            debug!(policy = "disconnect", "trigger suppressed during cooldown");
            self.inner.config.run_reset();
        }
    }
}

impl Inner {
    fn reactivate(&self, generation: u64) {
        let mut state = lock(&self.state);
        if state.cooldown.complete(generation) {
            state.active = true;
            debug!(policy = "disconnect", "cooldown elapsed");
        }
    }
}

#[cfg(test)]
#[path = "tests/disconnect_tests.rs"]
mod tests;
