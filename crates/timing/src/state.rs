use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::timer::TimerHandle;

/// State is consistent at every unlock point, so a panic elsewhere never
/// leaves it half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The single outstanding timer of a controller, tagged with a generation so
/// a timer that fires after being superseded can recognise itself as stale.
#[derive(Debug, Default)]
pub(crate) struct PendingTimer {
    generation: u64,
    handle: Option<TimerHandle>,
}

impl PendingTimer {
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Reserves the generation for the next timer. Any stale timer already
    /// in flight stops matching from here on.
    pub fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn arm(&mut self, generation: u64, handle: TimerHandle) {
        debug_assert_eq!(generation, self.generation);
        debug_assert!(self.handle.is_none());
        self.handle = Some(handle);
    }

    /// Cancels the outstanding timer, if any. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Called from a firing timer: clears the slot if `generation` is still
    /// the armed one.
    pub fn complete(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.handle.is_none() {
            return false;
        }
        self.handle = None;
        true
    }
}
