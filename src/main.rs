use anyhow::Context;
use places_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when present.
    // A missing file is fine; a malformed one is not.
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err).context("failed to read .env"),
    }

    let filter = telemetry::env_filter("info", Level::INFO);

    // places_service events go through the library layer only.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !telemetry::is_own_target(meta.target())
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .try_init()
        .context("setting default subscriber failed")?;

    api::start().await.context("relay failed")?;

    Ok(())
}
