use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::debug;

use crate::library::{ChronoTzLibrary, ZoneLibrary};

/// 24-hour time, abbreviated weekday, day and abbreviated month: `14:05, Tue 03-Jun`.
pub const DEFAULT_PATTERN: &str = "HH:mm, ddd DD-MMM";

pub const LIBRARY_UNAVAILABLE: &str = "timezone library not available";
pub const INVALID_TIMEZONE: &str = "invalid timezone";

/// Outcome of [`TimeFormatter::format_now`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "time", rename_all = "snake_case")]
pub enum ZoneTime {
    Formatted(String),
    LibraryUnavailable,
    InvalidTimezone,
}

impl ZoneTime {
    pub fn is_formatted(&self) -> bool {
        matches!(self, ZoneTime::Formatted(_))
    }

    /// The formatted text, or the sentinel string for a failure.
    pub fn as_str(&self) -> &str {
        match self {
            ZoneTime::Formatted(s) => s,
            ZoneTime::LibraryUnavailable => LIBRARY_UNAVAILABLE,
            ZoneTime::InvalidTimezone => INVALID_TIMEZONE,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            ZoneTime::Formatted(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ZoneTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Empty and the literal `"undefined"` fall back to [`DEFAULT_PATTERN`].
pub fn resolve_pattern(pattern: &str) -> &str {
    if pattern.is_empty() || pattern == "undefined" {
        DEFAULT_PATTERN
    } else {
        pattern
    }
}

/// Formats "now" in a timezone and validates zone names.
///
/// None of the operations fail: a missing library and a bad zone are
/// reported through [`ZoneTime`] (or `false` for [`is_zone_valid`]).
///
/// [`is_zone_valid`]: TimeFormatter::is_zone_valid
#[derive(Clone)]
pub struct TimeFormatter {
    library: Option<Arc<dyn ZoneLibrary>>,
}

impl TimeFormatter {
    pub fn new(library: Arc<dyn ZoneLibrary>) -> Self {
        Self { library: Some(library) }
    }

    /// A formatter with no library loaded.
    pub fn unavailable() -> Self {
        Self { library: None }
    }

    pub fn availability(&self) -> bool {
        self.library.is_some()
    }

    pub fn format_now(&self, tz: &str, pattern: &str) -> ZoneTime {
        let Some(library) = self.library.as_deref() else {
            return ZoneTime::LibraryUnavailable;
        };

        let pattern = resolve_pattern(pattern);
        match library.now_in_zone(tz, pattern) {
            Ok(s) => ZoneTime::Formatted(s),
            Err(e) => {
                debug!(zone = %tz, pattern, error = %e, "formatter.invalid_timezone");
                ZoneTime::InvalidTimezone
            }
        }
    }

    /// Same as [`format_now`](Self::format_now), collapsed to text. Failures
    /// come back as [`LIBRARY_UNAVAILABLE`] or [`INVALID_TIMEZONE`].
    pub fn format_now_string(&self, tz: &str, pattern: &str) -> String {
        self.format_now(tz, pattern).into_string()
    }

    pub fn is_zone_valid(&self, tz: &str) -> bool {
        match self.library.as_deref() {
            Some(library) => library.is_zone_registered(tz),
            None => false,
        }
    }
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(Arc::new(ChronoTzLibrary::new()))
    }
}

impl fmt::Debug for TimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeFormatter")
            .field("available", &self.availability())
            .finish()
    }
}
