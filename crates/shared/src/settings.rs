use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    domain::{
        PolicyKind, DEFAULT_DEBOUNCE_DELAY_MS, DEFAULT_DISCONNECT_DELAY_MS,
        DEFAULT_THROTTLE_DELAY_MS,
    },
    error::ConfigError,
};

pub const DEFAULT_SETTINGS_PATH: &str = "timing.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub debounce_delay_ms: i64,
    pub throttle_delay_ms: i64,
    pub disconnect_delay_ms: i64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS as i64,
            throttle_delay_ms: DEFAULT_THROTTLE_DELAY_MS as i64,
            disconnect_delay_ms: DEFAULT_DISCONNECT_DELAY_MS as i64,
        }
    }
}

impl TimingSettings {
    pub fn delay_ms(&self, kind: PolicyKind) -> i64 {
        match kind {
            PolicyKind::Debounce => self.debounce_delay_ms,
            PolicyKind::Throttle => self.throttle_delay_ms,
            PolicyKind::Disconnect => self.disconnect_delay_ms,
        }
    }

    pub fn delay_for(&self, kind: PolicyKind) -> Result<Duration, ConfigError> {
        let delay_ms = self.delay_ms(kind);
        let millis = u64::try_from(delay_ms).map_err(|_| ConfigError::NegativeDelay {
            policy: kind,
            delay_ms,
        })?;
        Ok(Duration::from_millis(millis))
    }

    fn delay_ms_mut(&mut self, kind: PolicyKind) -> &mut i64 {
        match kind {
            PolicyKind::Debounce => &mut self.debounce_delay_ms,
            PolicyKind::Throttle => &mut self.throttle_delay_ms,
            PolicyKind::Disconnect => &mut self.disconnect_delay_ms,
        }
    }
}

/// Defaults, then the TOML file at `path` if present, then `APP__*` env overrides.
pub fn load_settings(path: impl AsRef<Path>) -> Result<TimingSettings, ConfigError> {
    let mut settings = read_settings_file(path.as_ref())?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<TimingSettings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(TimingSettings::default()),
        Err(err) => return Err(ConfigError::settings(path, err.to_string())),
    };

    toml::from_str::<TimingSettings>(&raw).map_err(|err| ConfigError::settings(path, err.message()))
}

fn env_key(kind: PolicyKind) -> &'static str {
    match kind {
        PolicyKind::Debounce => "APP__DEBOUNCE_DELAY_MS",
        PolicyKind::Throttle => "APP__THROTTLE_DELAY_MS",
        PolicyKind::Disconnect => "APP__DISCONNECT_DELAY_MS",
    }
}

fn apply_env_overrides(settings: &mut TimingSettings, lookup: impl Fn(&str) -> Option<String>) {
    for kind in PolicyKind::ALL {
        if let Some(v) = lookup(env_key(kind)) {
            if let Ok(parsed) = v.trim().parse::<i64>() {
                *settings.delay_ms_mut(kind) = parsed;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
