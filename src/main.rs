use axum::{Router, http::header, routing::get};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use examhub::api::{handlers, openapi::ApiDoc};
use examhub::config::CONFIG;
use examhub::core::seed;
use examhub::{JsonFileStorage, PortalService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Initialize the flat-file store and the service
    let storage = JsonFileStorage::new(&CONFIG.data_file);
    let service = Arc::new(PortalService::new(storage));
    service.ensure_admin_password(&CONFIG.admin_password).await?;

    // One-time seeding pass over the static pages; failures are logged, not fatal
    let scanned = seed::scan_pages(Path::new(&CONFIG.pages_dir));
    if scanned.is_empty() {
        info!("no seedable content found in {}", CONFIG.pages_dir);
    } else {
        match service.seed_content(scanned).await {
            Ok(0) => {}
            Ok(count) => info!(count, "seeded content from static pages"),
            Err(err) => warn!(%err, "content seeding failed"),
        }
    }

    // Define API routes
    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
