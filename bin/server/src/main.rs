use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dto;
mod page;
mod routers;
mod service;

use config::Settings;
use service::OntologyService;

/// Health check endpoint
#[instrument]
async fn healthcheck() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({"status": "healthy"})))
}

/// Render the single-page UI with the dataset preview
async fn index(Extension(service): Extension<Arc<OntologyService>>) -> Html<String> {
    Html(page::render(service.preview(5), service.dataset_len()))
}

/// Initialize the Axum web server
fn create_app(settings: Settings) -> Result<Router, anyhow::Error> {
    // Initialize the ontology service (dataset load + LLM client)
    let ontology_service = Arc::new(OntologyService::new(&settings)?);

    // Build the router with all routes
    let app = Router::new()
        .route("/", get(index))
        .route("/healthcheck", get(healthcheck))
        .nest("/api", routers::create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
                .layer(CorsLayer::permissive())
                .layer(Extension(ontology_service)),
        );

    Ok(app)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ontox_server=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::load()?;
    info!("Starting Onto-X server with settings: {:?}", settings);

    // Create the app
    let app = create_app(settings.clone())?;

    // Start the server
    let listener = tokio::net::TcpListener::bind(&settings.server_address()).await?;
    info!("Server listening on {}", settings.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthcheck() {
        let response = healthcheck().await.expect("healthcheck");
        assert_eq!(response.0, json!({"status": "healthy"}));
    }
}
