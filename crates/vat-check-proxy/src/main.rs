//! VAT Check Proxy - Entry point.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vat_check_proxy::{
    api::{create_router, AppState},
    config::Config,
    limiter::RateLimiter,
    verify::VerificationProxy,
};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting VAT Check Proxy");

    // Initialize VIES client
    let verifier = match VerificationProxy::from_config(&config.vies) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to create VIES client: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        max_requests = config.rate_limit.max_requests,
        window = ?config.rate_limit.window,
        vies_url = %config.vies.base_url,
        "Rate limiting and VIES configured"
    );

    let state = AppState::new(RateLimiter::new(&config.rate_limit), verifier);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server; peer addresses feed the rate limit key
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
