use crate::ports::clock::Clock;
use chrono::{DateTime, Utc};

/// システム時刻を返すClock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
