mod api;
mod config;
mod error;
mod model;
mod predictor;
mod render;
mod types;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::model::ModelStore;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Models: loaded once, shared read-only by every request ---
    let models = ModelStore::load(&cfg.classifier_path, &cfg.regressor_path)?;
    info!(
        "Models ready: {} occupancy classes, {} concert types",
        models.classifier.classes().len(),
        models.classifier.valid_concert_types().len(),
    );

    // --- HTTP form server ---
    let app = router(ApiState::new(models));
    let bind_addr = format!("0.0.0.0:{}", cfg.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Prediction form listening on http://{bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
