use anyhow::Result;

use crate::pattern::Pattern;
use crate::time::{parse_zone, Clock, SystemClock};

/// The time/timezone capability a [`TimeFormatter`](crate::TimeFormatter) delegates to.
pub trait ZoneLibrary: Send + Sync {
    /// Current instant converted to `tz`, rendered with a moment-style `pattern`.
    fn now_in_zone(&self, tz: &str, pattern: &str) -> Result<String>;

    fn is_zone_registered(&self, tz: &str) -> bool;
}

/// `ZoneLibrary` backed by the chrono-tz database.
#[derive(Debug, Clone, Default)]
pub struct ChronoTzLibrary<C = SystemClock> {
    clock: C,
}

impl ChronoTzLibrary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> ChronoTzLibrary<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> ZoneLibrary for ChronoTzLibrary<C> {
    fn now_in_zone(&self, tz: &str, pattern: &str) -> Result<String> {
        let zone = parse_zone(tz)?;
        let now = self.clock.now().with_timezone(&zone);
        Ok(Pattern::compile(pattern).render(&now))
    }

    fn is_zone_registered(&self, tz: &str) -> bool {
        parse_zone(tz).is_ok()
    }
}
