use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub zones: Vec<String>,
    /// Moment-style pattern; empty means the default pattern.
    pub pattern: String,
    /// 0 prints once and exits.
    pub interval_secs: u64,
    pub output: OutputFormat,
    pub fail_on_invalid: bool,
}

fn env_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|x| x.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source (the process env in `from_env`).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let zones: Vec<String> = get("CLOCK_ZONES")
            .unwrap_or_else(|| "UTC".to_string())
            .split(',')
            .map(|z| z.trim().to_string())
            .filter(|z| !z.is_empty())
            .collect();
        if zones.is_empty() {
            return Err(anyhow!("CLOCK_ZONES must name at least one zone"));
        }

        let pattern = get("CLOCK_FORMAT").unwrap_or_default();
        let interval_secs = env_parse::<u64>(get("CLOCK_INTERVAL_SECS")).unwrap_or(0);
        let output = get("CLOCK_OUTPUT")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();
        let fail_on_invalid = env_bool(get("CLOCK_FAIL_ON_INVALID"), false);

        Ok(Self {
            zones,
            pattern,
            interval_secs,
            output,
            fail_on_invalid,
        })
    }
}
