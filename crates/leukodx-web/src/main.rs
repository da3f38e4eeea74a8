//! Leukodx Web Server
//!
//! Run with: cargo run -p leukodx-web

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use leukodx_common::SessionContext;
use leukodx_model::{CandleClassifier, Classifier, ClassifierConfig};
use leukodx_web::config::AppConfig;
use leukodx_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Leukodx server...");

    let config = AppConfig::load()?;

    // A startup failure keeps the server up with prediction disabled: the
    // form and status endpoints stay reachable so the failure is visible.
    let state = match initialize(&config) {
        Ok((session, classifier)) => {
            info!(
                "Ready: {} features, {} background patients, cutoff {:.3}",
                session.feature_order.len(),
                session.population.len(),
                session.cutoff
            );
            AppState::ready(session, classifier)
        }
        Err(e) => {
            error!("Initialization failed: {e}. Prediction is disabled for this session.");
            AppState::failed(e.to_string())
        }
    };

    let app = leukodx_web::router::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn initialize(config: &AppConfig) -> anyhow::Result<(SessionContext, Arc<dyn Classifier>)> {
    let session = SessionContext::load(
        &config.resources.feature_order_path,
        &config.resources.population_path,
    )?;

    let mut classifier_config = ClassifierConfig::new(&config.resources.weights_path);
    classifier_config.use_gpu = config.resources.use_gpu;
    let classifier = CandleClassifier::load(&classifier_config)?;

    if classifier.num_features() != session.feature_order.len() {
        anyhow::bail!(
            "Classifier expects {} features but the feature order lists {}",
            classifier.num_features(),
            session.feature_order.len()
        );
    }

    Ok((session, Arc::new(classifier)))
}
