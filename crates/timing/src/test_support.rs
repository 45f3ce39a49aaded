use std::sync::{Arc, Mutex};

use crate::config::ControllerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Fire,
    Reset,
}

/// Records callback and reset invocations in order.
#[derive(Clone, Default)]
pub struct Probe {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Probe {
    pub fn config(&self, delay_ms: u64) -> ControllerConfig {
        let fire = self.clone();
        let reset = self.clone();
        ControllerConfig::new()
            .callback(move || fire.record(Call::Fire))
            .reset(move || reset.record(Call::Reset))
            .delay_ms(delay_ms)
    }

    pub fn record(&self, call: Call) {
        self.calls.lock().expect("probe lock").push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("probe lock").clone()
    }

    pub fn fires(&self) -> usize {
        self.count(Call::Fire)
    }

    pub fn resets(&self) -> usize {
        self.count(Call::Reset)
    }

    fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }
}

pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
