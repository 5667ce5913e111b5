//! Current time in a timezone, plus zone-name validation.
//!
//! ```no_run
//! use tz_clock::TimeFormatter;
//!
//! let formatter = TimeFormatter::default();
//! println!("{}", formatter.format_now("Europe/Berlin", ""));
//! assert!(formatter.is_zone_valid("UTC"));
//! ```

pub mod config;
pub mod formatter;
pub mod library;
pub mod monitoring;
pub mod pattern;
pub mod ticker;
pub mod time;

pub use formatter::{
    resolve_pattern, TimeFormatter, ZoneTime, DEFAULT_PATTERN, INVALID_TIMEZONE, LIBRARY_UNAVAILABLE,
};
pub use library::{ChronoTzLibrary, ZoneLibrary};
pub use pattern::Pattern;
pub use time::{Clock, FixedClock, SystemClock};
