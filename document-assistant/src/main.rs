use document_assistant::config::get_configuration;
use document_assistant::services::init_metrics;
use document_assistant::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("document-assistant", &configuration.telemetry);
    init_metrics();

    let app = Application::build(&configuration).await.map_err(|e| {
        tracing::error!("Failed to start: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!(
        backend = %configuration.backend.url,
        "Starting document-assistant on port {}",
        app.port()
    );
    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
