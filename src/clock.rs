//! Time source abstraction.

use chrono::{DateTime, Utc};

/// Supplies the current instant. Injected so flows can be tested
/// against a frozen time.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current unix timestamp in seconds.
    fn now(&self) -> u64 {
        self.now_utc().timestamp().max(0) as u64
    }
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a chosen instant.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn at_unix(timestamp: i64) -> Self {
        Self {
            instant: DateTime::from_timestamp(timestamp, 0)
                .expect("timestamp in range"),
        }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }
}
