mod config;
mod controller;
mod debounce;
mod defer;
mod disconnect;
mod state;
mod throttle;
#[cfg(test)]
mod test_support;
pub mod timer;

pub use config::{Action, ControllerConfig};
pub use controller::Controller;
pub use debounce::Debounce;
pub use defer::{defer, DEFER_DELAY};
pub use disconnect::Disconnect;
pub use shared::{domain::PolicyKind, error::ConfigError};
pub use throttle::Throttle;
pub use timer::{TimerFacility, TimerHandle, TimerTask, TokioTimer};
