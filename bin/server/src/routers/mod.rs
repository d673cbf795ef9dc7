use axum::Router;

pub mod ancestors;

/// Create the main API router
pub fn create_router() -> Router {
    Router::new().merge(ancestors::create_router())
}
