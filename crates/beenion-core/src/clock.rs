//! Clock abstraction for determinism.
//!
//! The kernel never reads the time itself; application handlers ask a
//! `Clock` and pass the result in as the command's timestamp.

use chrono::{DateTime, Utc};

use crate::event::Timestamp;

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as an event timestamp.
    fn timestamp(&self) -> Timestamp {
        Timestamp::from(self.now())
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
