//! Business Subscription Registry - Session Host
//!
//! Reads one JSON command per line from stdin and answers on stdout.
//! Subscription statuses are re-derived on a fixed interval and any
//! transitions are pushed as `status_changed` lines.

use std::time::Duration;

use registry_host::{runner, telemetry, Config, Session};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    telemetry::init(&config.log);

    tracing::info!("Starting business registry session");
    tracing::info!("Environment: {}", config.environment);

    let refresh_every = Duration::from_secs(config.view.refresh_interval_secs);
    tracing::info!("Refreshing statuses every {:?}", refresh_every);

    let mut session = Session::new(config.view);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    runner::run(&mut session, stdin, &mut stdout, refresh_every).await?;

    tracing::info!(registered = session.store().len(), "Session ended");
    Ok(())
}
