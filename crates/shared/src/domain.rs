use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::UnknownPolicy;

pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 100;
pub const DEFAULT_THROTTLE_DELAY_MS: u64 = 1000;
pub const DEFAULT_DISCONNECT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Debounce,
    Throttle,
    Disconnect,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [Self::Debounce, Self::Throttle, Self::Disconnect];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debounce => "debounce",
            Self::Throttle => "throttle",
            Self::Disconnect => "disconnect",
        }
    }

    pub fn default_delay_ms(self) -> u64 {
        match self {
            Self::Debounce => DEFAULT_DEBOUNCE_DELAY_MS,
            Self::Throttle => DEFAULT_THROTTLE_DELAY_MS,
            Self::Disconnect => DEFAULT_DISCONNECT_DELAY_MS,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownPolicy(raw.to_string()))
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingEventKind {
    Fire,
    Reset,
}

/// One observable outcome of a trigger, as reported by the replay tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingEvent {
    pub kind: TimingEventKind,
    pub policy: PolicyKind,
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names_case_insensitively() {
        assert_eq!("Debounce".parse::<PolicyKind>(), Ok(PolicyKind::Debounce));
        assert_eq!(" throttle ".parse::<PolicyKind>(), Ok(PolicyKind::Throttle));
        assert_eq!(
            "DISCONNECT".parse::<PolicyKind>(),
            Ok(PolicyKind::Disconnect)
        );
        assert!("leading".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn unknown_policy_names_the_input() {
        let err = "leading".parse::<PolicyKind>().expect_err("should fail");
        assert_eq!(err, UnknownPolicy("leading".into()));
        assert_eq!(
            err.to_string(),
            "unknown policy 'leading', expected one of debounce, throttle, disconnect"
        );
    }

    #[test]
    fn duration_millis_saturates() {
        assert_eq!(duration_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn default_delays_match_policy() {
        assert_eq!(PolicyKind::Debounce.default_delay_ms(), 100);
        assert_eq!(PolicyKind::Throttle.default_delay_ms(), 1000);
        assert_eq!(PolicyKind::Disconnect.default_delay_ms(), 1000);
    }

    #[test]
    fn timing_event_serializes_snake_case() {
        let event = TimingEvent {
            kind: TimingEventKind::Reset,
            policy: PolicyKind::Disconnect,
            elapsed_ms: 20,
        };
        let json = serde_json::to_string(&event).expect("json");
        assert_eq!(
            json,
            r#"{"kind":"reset","policy":"disconnect","elapsed_ms":20}"#
        );
    }
}
