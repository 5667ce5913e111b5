use anyhow::{anyhow, Result};
use serde::Serialize;
use std::{io::Write, time::Duration};
use tracing::{info, warn};

use crate::config::{Config, OutputFormat};
use crate::formatter::{resolve_pattern, TimeFormatter};

#[derive(Debug, Serialize)]
struct ZoneReport<'a> {
    zone: &'a str,
    time: String,
    ok: bool,
}

/// One line per configured zone, in config order.
pub fn render_lines(formatter: &TimeFormatter, cfg: &Config) -> Result<Vec<String>> {
    cfg.zones
        .iter()
        .map(|zone| -> Result<String> {
            let time = formatter.format_now(zone, &cfg.pattern);
            match cfg.output {
                OutputFormat::Text => Ok(format!("{zone}: {time}")),
                OutputFormat::Json => Ok(serde_json::to_string(&ZoneReport {
                    zone,
                    ok: time.is_formatted(),
                    time: time.into_string(),
                })?),
            }
        })
        .collect()
}

/// Warns about every configured zone the library does not know.
///
/// Errors only when `fail_on_invalid` is set.
pub fn check_zones(formatter: &TimeFormatter, cfg: &Config) -> Result<()> {
    if !formatter.availability() {
        warn!("ticker.library_unavailable");
    }

    let invalid: Vec<&str> = cfg
        .zones
        .iter()
        .map(String::as_str)
        .filter(|zone| !formatter.is_zone_valid(zone))
        .collect();

    for zone in &invalid {
        warn!(zone = %zone, "ticker.invalid_zone");
    }

    if cfg.fail_on_invalid && !invalid.is_empty() {
        return Err(anyhow!("invalid zones: {}", invalid.join(", ")));
    }
    Ok(())
}

pub async fn run(cfg: &Config, formatter: &TimeFormatter, out: &mut (impl Write + Send)) -> Result<()> {
    info!(
        zones = ?cfg.zones,
        pattern = %resolve_pattern(&cfg.pattern),
        interval_secs = cfg.interval_secs,
        output = ?cfg.output,
        "ticker.start"
    );

    check_zones(formatter, cfg)?;

    loop {
        for line in render_lines(formatter, cfg)? {
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        if cfg.interval_secs == 0 {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs(cfg.interval_secs)).await;
    }
}
