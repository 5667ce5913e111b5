use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. Handy for deterministic output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves an IANA zone name, ignoring case (`utc` -> `UTC`).
pub fn parse_zone(tz: &str) -> Result<Tz> {
    Tz::from_str_insensitive(tz).map_err(|_| anyhow!("invalid tz: {tz}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_zone_accepts_canonical_and_alias_names() {
        assert_eq!(parse_zone("UTC").unwrap(), Tz::UTC);
        assert_eq!(parse_zone("Europe/Berlin").unwrap(), Tz::Europe__Berlin);
        assert_eq!(parse_zone("US/Eastern").unwrap(), Tz::US__Eastern);
    }

    #[test]
    fn parse_zone_ignores_case() {
        assert_eq!(parse_zone("utc").unwrap(), Tz::UTC);
        assert_eq!(parse_zone("asia/tokyo").unwrap(), Tz::Asia__Tokyo);
    }

    #[test]
    fn parse_zone_rejects_unknown_names() {
        let err = parse_zone("Not/AZone").unwrap_err();
        assert!(err.to_string().contains("Not/AZone"));
        assert!(parse_zone("").is_err());
    }

    #[test]
    fn fixed_clock_is_stable() {
        let at = Utc.with_ymd_and_hms(2025, 6, 3, 14, 5, 9).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_is_close_to_utc_now() {
        let diff = (SystemClock.now() - Utc::now()).num_seconds().abs();
        assert!(diff < 2);
    }
}
