use dotenv::dotenv;
use menu_voting::{Dependencies, ServiceError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the menu voting service.
///
/// Initializes dotenv and tracing, wires up the application dependencies,
/// and runs the weekly auto-finalize scheduler.
///
/// # Returns
///
/// A `Result` indicating success or a `ServiceError` if an error occurs
/// during initialization.
#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let dependencies = Dependencies::new().await?;
    info!("menu voting service started");

    dependencies.scheduler.run().await;
    Ok(())
}
