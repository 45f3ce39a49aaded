use shared::{domain::PolicyKind, error::ConfigError};

use crate::{
    config::ControllerConfig, debounce::Debounce, disconnect::Disconnect, throttle::Throttle,
};

/// A timing controller whose policy is chosen at runtime.
#[derive(Clone)]
pub enum Controller {
    Debounce(Debounce),
    Throttle(Throttle),
    Disconnect(Disconnect),
}

impl Controller {
    pub fn new(kind: PolicyKind, config: ControllerConfig) -> Result<Self, ConfigError> {
        Ok(match kind {
            PolicyKind::Debounce => Self::Debounce(Debounce::new(config)?),
            PolicyKind::Throttle => Self::Throttle(Throttle::new(config)?),
            PolicyKind::Disconnect => Self::Disconnect(Disconnect::new(config)?),
        })
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Debounce(_) => PolicyKind::Debounce,
            Self::Throttle(_) => PolicyKind::Throttle,
            Self::Disconnect(_) => PolicyKind::Disconnect,
        }
    }

    pub fn trigger(&self) {
        match self {
            Self::Debounce(inner) => inner.trigger(),
            Self::Throttle(inner) => inner.trigger(),
            Self::Disconnect(inner) => inner.trigger(),
        }
    }
}

impl From<Debounce> for Controller {
    fn from(value: Debounce) -> Self {
        Self::Debounce(value)
    }
}

impl From<Throttle> for Controller {
    fn from(value: Throttle) -> Self {
        Self::Throttle(value)
    }
}

impl From<Disconnect> for Controller {
    fn from(value: Disconnect) -> Self {
        Self::Disconnect(value)
    }
}
