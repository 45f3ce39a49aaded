use std::{fmt, sync::Arc, time::Duration};

use shared::{domain::PolicyKind, error::ConfigError};

use crate::timer::{TimerFacility, TokioTimer};

pub type Action = Arc<dyn Fn() + Send + Sync + 'static>;

/// Construction-time options for a timing controller.
///
/// `callback` is required; everything else falls back to the policy defaults
/// and the ambient tokio runtime.
#[derive(Clone, Default)]
pub struct ControllerConfig {
    callback: Option<Action>,
    reset: Option<Action>,
    delay: Option<Duration>,
    timer: Option<Arc<dyn TimerFacility>>,
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn reset(mut self, reset: impl Fn() + Send + Sync + 'static) -> Self {
        self.reset = Some(Arc::new(reset));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn delay_ms(self, delay_ms: u64) -> Self {
        self.delay(Duration::from_millis(delay_ms))
    }

    pub fn timer(mut self, timer: Arc<dyn TimerFacility>) -> Self {
        self.timer = Some(timer);
        self
    }

    pub(crate) fn resolve(self, policy: PolicyKind) -> Result<Resolved, ConfigError> {
        let callback = self.callback.ok_or(ConfigError::MissingCallback)?;
        let timer = match self.timer {
            Some(timer) => timer,
            None => TokioTimer::shared()?,
        };
        Ok(Resolved {
            callback,
            reset: self.reset,
            delay: self
                .delay
                .unwrap_or_else(|| Duration::from_millis(policy.default_delay_ms())),
            timer,
        })
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("callback", &self.callback.is_some())
            .field("reset", &self.reset.is_some())
            .field("delay", &self.delay)
            .field("timer", &self.timer.is_some())
            .finish()
    }
}

pub(crate) struct Resolved {
    pub callback: Action,
    pub reset: Option<Action>,
    pub delay: Duration,
    pub timer: Arc<dyn TimerFacility>,
}

impl Resolved {
    pub fn run_reset(&self) {
        if let Some(reset) = &self.reset {
            reset();
        }
    }
}
