//! Receipt Processor Service
//!
//! REST API for scoring receipts and looking up their points

use anyhow::{Context, Result};
use points_common::Scorer;
use receipt_processor::{create_router, AppState, Config, ReceiptService};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_processor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Receipt Processor Service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let allowed_origin = config.allowed_origin_header()?;
    info!("Allowed origin: {}", config.allowed_origin);

    let scorer = Scorer::new(config.afternoon_window);
    info!("Afternoon bonus upper bound: {}", scorer.afternoon_window());

    // Create application state
    let state = AppState {
        receipts: ReceiptService::new(scorer),
    };

    // Create router
    let app = create_router(state, allowed_origin);

    // Bind and serve
    let listener = TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!("Receipt Processor listening on http://{}", config.api_address());
    info!("  POST /receipts/process - Score a receipt");
    info!("  GET /receipts/{{id}}/points - Get points for a receipt");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
