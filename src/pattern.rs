use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Rendered by chrono's strftime.
    Field(&'static str),
    Ordinal,
    Quarter,
    TwoLetterWeekday,
    /// Hour in 1..=24, midnight is 24.
    HourFrom1 { padded: bool },
    Fraction(u8),
    UnixMillis,
}

enum Entry {
    Token(Token),
    /// Long-date shorthand, compiled recursively.
    Expand(&'static str),
}

// Longest tokens first so `MMMM` wins over `MMM`, `Do` over `D`, `LTS` over `LT`.
const TOKENS: &[(&str, Entry)] = &[
    ("LLLL", Entry::Expand("dddd, MMMM D, YYYY h:mm A")),
    ("YYYY", Entry::Token(Token::Field("%Y"))),
    ("MMMM", Entry::Token(Token::Field("%B"))),
    ("DDDD", Entry::Token(Token::Field("%j"))),
    ("dddd", Entry::Token(Token::Field("%A"))),
    ("GGGG", Entry::Token(Token::Field("%G"))),
    ("LTS", Entry::Expand("h:mm:ss A")),
    ("LLL", Entry::Expand("MMMM D, YYYY h:mm A")),
    ("MMM", Entry::Token(Token::Field("%b"))),
    ("DDD", Entry::Token(Token::Field("%-j"))),
    ("ddd", Entry::Token(Token::Field("%a"))),
    ("SSS", Entry::Token(Token::Fraction(3))),
    ("LT", Entry::Expand("h:mm A")),
    ("LL", Entry::Expand("MMMM D, YYYY")),
    ("YY", Entry::Token(Token::Field("%y"))),
    ("MM", Entry::Token(Token::Field("%m"))),
    ("Do", Entry::Token(Token::Ordinal)),
    ("DD", Entry::Token(Token::Field("%d"))),
    ("dd", Entry::Token(Token::TwoLetterWeekday)),
    ("WW", Entry::Token(Token::Field("%V"))),
    ("HH", Entry::Token(Token::Field("%H"))),
    ("hh", Entry::Token(Token::Field("%I"))),
    ("kk", Entry::Token(Token::HourFrom1 { padded: true })),
    ("mm", Entry::Token(Token::Field("%M"))),
    ("ss", Entry::Token(Token::Field("%S"))),
    ("SS", Entry::Token(Token::Fraction(2))),
    ("ZZ", Entry::Token(Token::Field("%z"))),
    ("zz", Entry::Token(Token::Field("%Z"))),
    ("L", Entry::Expand("MM/DD/YYYY")),
    ("Q", Entry::Token(Token::Quarter)),
    ("M", Entry::Token(Token::Field("%-m"))),
    ("D", Entry::Token(Token::Field("%-d"))),
    ("d", Entry::Token(Token::Field("%w"))),
    ("e", Entry::Token(Token::Field("%w"))),
    ("E", Entry::Token(Token::Field("%u"))),
    ("W", Entry::Token(Token::Field("%-V"))),
    ("H", Entry::Token(Token::Field("%-H"))),
    ("h", Entry::Token(Token::Field("%-I"))),
    ("k", Entry::Token(Token::HourFrom1 { padded: false })),
    ("m", Entry::Token(Token::Field("%-M"))),
    ("s", Entry::Token(Token::Field("%-S"))),
    ("S", Entry::Token(Token::Fraction(1))),
    ("A", Entry::Token(Token::Field("%p"))),
    ("a", Entry::Token(Token::Field("%P"))),
    ("Z", Entry::Token(Token::Field("%:z"))),
    ("z", Entry::Token(Token::Field("%Z"))),
    ("X", Entry::Token(Token::Field("%s"))),
    ("x", Entry::Token(Token::UnixMillis)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// A compiled moment-style format pattern (`HH:mm, ddd DD-MMM`).
///
/// Anything that is not a token is copied through as-is; `[...]` forces
/// literal text. Compilation and rendering are infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn compile(src: &str) -> Self {
        let mut segments = Vec::new();
        compile_into(src, &mut segments);
        Self { segments }
    }

    pub fn render(&self, at: &DateTime<Tz>) -> String {
        Rendered { pattern: self, at }.to_string()
    }
}

fn compile_into(src: &str, segments: &mut Vec<Segment>) {
    let mut rest = src;
    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            let inner = &rest[1..];
            match inner.find(&['[', ']'][..]) {
                Some(end) if inner[end..].starts_with(']') => {
                    push_literal(segments, &inner[..end]);
                    rest = &inner[end + 1..];
                }
                _ => {
                    push_literal(segments, "[");
                    rest = inner;
                }
            }
            continue;
        }

        match TOKENS.iter().find(|(name, _)| rest.starts_with(*name)) {
            Some((name, entry)) => {
                match entry {
                    Entry::Token(token) => segments.push(Segment::Token(*token)),
                    Entry::Expand(long) => compile_into(long, segments),
                }
                rest = &rest[name.len()..];
            }
            None => {
                let len = ch.len_utf8();
                push_literal(segments, &rest[..len]);
                rest = &rest[len..];
            }
        }
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

struct Rendered<'a> {
    pattern: &'a Pattern,
    at: &'a DateTime<Tz>,
}

impl Rendered<'_> {
    fn write_token(&self, f: &mut fmt::Formatter<'_>, token: Token) -> fmt::Result {
        let at = self.at;
        match token {
            Token::Field(spec) => write!(f, "{}", at.format(spec)),
            Token::Ordinal => write!(f, "{}{}", at.day(), ordinal_suffix(at.day())),
            Token::Quarter => write!(f, "{}", (at.month() - 1) / 3 + 1),
            Token::TwoLetterWeekday => {
                let name = at.weekday().to_string();
                f.write_str(name.get(..2).unwrap_or(&name))
            }
            Token::HourFrom1 { padded } => {
                let hour = match at.hour() {
                    0 => 24,
                    h => h,
                };
                if padded {
                    write!(f, "{hour:02}")
                } else {
                    write!(f, "{hour}")
                }
            }
            Token::Fraction(digits) => {
                let millis = at.timestamp_subsec_millis().min(999);
                match digits {
                    1 => write!(f, "{}", millis / 100),
                    2 => write!(f, "{:02}", millis / 10),
                    _ => write!(f, "{millis:03}"),
                }
            }
            Token::UnixMillis => write!(f, "{}", at.timestamp_millis()),
        }
    }
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.pattern.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Token(token) => self.write_token(f, *token)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // Tuesday 2025-06-03 14:05:09.250 UTC
    fn instant(tz: Tz) -> DateTime<Tz> {
        Utc.with_ymd_and_hms(2025, 6, 3, 14, 5, 9)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap()
            .with_timezone(&tz)
    }

    fn show(pattern: &str, tz: Tz) -> String {
        Pattern::compile(pattern).render(&instant(tz))
    }

    #[test]
    fn default_pattern() {
        assert_eq!(show("HH:mm, ddd DD-MMM", Tz::UTC), "14:05, Tue 03-Jun");
    }

    #[test]
    fn converts_to_zone_before_rendering() {
        assert_eq!(show("HH:mm, ddd DD-MMM", Tz::Asia__Tokyo), "23:05, Tue 03-Jun");
        assert_eq!(show("HH:mm Z zz", Tz::Europe__Berlin), "16:05 +02:00 CEST");
        assert_eq!(show("ZZ", Tz::America__New_York), "-0400");
    }

    #[test]
    fn date_tokens() {
        assert_eq!(show("YYYY-MM-DD", Tz::UTC), "2025-06-03");
        assert_eq!(show("YY M D", Tz::UTC), "25 6 3");
        assert_eq!(show("Q", Tz::UTC), "2");
        assert_eq!(show("MMMM MMM", Tz::UTC), "June Jun");
        assert_eq!(show("DDDD DDD", Tz::UTC), "154 154");
        assert_eq!(show("Do", Tz::UTC), "3rd");
        assert_eq!(show("dddd ddd dd d e E", Tz::UTC), "Tuesday Tue Tu 2 2 2");
        assert_eq!(show("WW W GGGG", Tz::UTC), "23 23 2025");
    }

    #[test]
    fn time_tokens() {
        assert_eq!(show("HH H hh h kk k", Tz::UTC), "14 14 02 2 14 14");
        assert_eq!(show("mm m ss s", Tz::UTC), "05 5 09 9");
        assert_eq!(show("SSS SS S", Tz::UTC), "250 25 2");
        assert_eq!(show("A a", Tz::UTC), "PM pm");
        assert_eq!(show("ZZ Z zz", Tz::UTC), "+0000 +00:00 UTC");
    }

    #[test]
    fn unix_timestamps() {
        let at = instant(Tz::UTC);
        assert_eq!(show("X", Tz::UTC), at.timestamp().to_string());
        assert_eq!(show("x", Tz::UTC), at.timestamp_millis().to_string());
    }

    #[test]
    fn padding_early_in_the_year() {
        let at = Utc.with_ymd_and_hms(2025, 1, 5, 0, 30, 0).unwrap().with_timezone(&Tz::UTC);
        let out = Pattern::compile("DDDD DDD WW W kk k SSS").render(&at);
        assert_eq!(out, "005 5 01 1 24 24 000");
    }

    #[test]
    fn long_date_shorthands() {
        assert_eq!(show("LT", Tz::UTC), "2:05 PM");
        assert_eq!(show("LTS", Tz::UTC), "2:05:09 PM");
        assert_eq!(show("L", Tz::UTC), "06/03/2025");
        assert_eq!(show("LL", Tz::UTC), "June 3, 2025");
        assert_eq!(show("LLL", Tz::UTC), "June 3, 2025 2:05 PM");
        assert_eq!(show("LLLL", Tz::UTC), "Tuesday, June 3, 2025 2:05 PM");
    }

    #[test]
    fn escapes_and_literals() {
        assert_eq!(show("[Today is] dddd", Tz::UTC), "Today is Tuesday");
        assert_eq!(show("HH[h]mm", Tz::UTC), "14h05");
        assert_eq!(show("HH[", Tz::UTC), "14[");
        assert_eq!(show("HH:mm / -,", Tz::UTC), "14:05 / -,");
        assert_eq!(show("HH · mm", Tz::UTC), "14 · 05");
        assert_eq!(show("", Tz::UTC), "");
    }

    #[test]
    fn adjacent_literals_are_merged() {
        let pattern = Pattern::compile("[ab]:[cd]");
        assert_eq!(pattern.segments, vec![Segment::Literal("ab:cd".into())]);
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "day {n}");
        }
    }
}
