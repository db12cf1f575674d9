use dotenvy::dotenv;
use portfolio_service::config::PortfolioConfig;
use portfolio_service::startup::Application;
use service_core::observability::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = PortfolioConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(&configuration.service_name, &configuration.log_level);

    let app = Application::build(configuration)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?;

    info!("Starting portfolio-service on port {}", app.port());

    app.run_until_stopped().await?;

    Ok(())
}
