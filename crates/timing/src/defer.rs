use std::time::Duration;

use crate::timer::{TimerFacility, TimerHandle};

pub const DEFER_DELAY: Duration = Duration::from_millis(1);

/// Runs `task` on the next timer tick instead of on the caller's stack.
pub fn defer(timer: &dyn TimerFacility, task: impl FnOnce() + Send + 'static) -> TimerHandle {
    timer.schedule(DEFER_DELAY, Box::new(task))
}
