use anyhow::Result;
use tracing::info;

use tz_clock::{config::Config, monitoring, ticker, TimeFormatter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    monitoring::init_tracing();

    let cfg = Config::from_env()?;
    info!(?cfg, "boot");

    let formatter = TimeFormatter::default();
    ticker::run(&cfg, &formatter, &mut std::io::stdout()).await
}
