use sc_app::{Generator, ServiceConfig, backend, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = ServiceConfig::load()?;
    info!(
        "{} service: runtime {}, uploads in {}",
        config.model.name(),
        config.runtime_url,
        config.uploads_dir.display()
    );

    // load once; a model that won't load is fatal
    let generator = Generator::connect(&config).await?;

    backend::serve(&config, generator).await
}
