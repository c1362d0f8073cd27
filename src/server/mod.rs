//! HTTP proxy in front of the AI gateway.

mod error;
mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ai::{AiGateway, ModelTransport};

pub use error::ApiError;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub type SharedGateway = Arc<AiGateway<Arc<dyn ModelTransport>>>;

#[derive(Clone)]
pub struct AppState {
    gateway: SharedGateway,
}

impl AppState {
    pub fn new(gateway: AiGateway<Arc<dyn ModelTransport>>) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    pub fn gateway(&self) -> &SharedGateway {
        &self.gateway
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ai", post(handlers::chat))
        .route("/api/ai/explain", post(handlers::explain))
        .route("/api/ai/fix", post(handlers::fix))
        .route("/api/ai/refactor", post(handlers::refactor))
        .route("/api/ai/tests", post(handlers::tests))
        .route("/api/ai/terminal", post(handlers::terminal))
        .route("/api/ai/generate-project", post(handlers::generate_project))
        .route("/api/ai/scan", post(handlers::scan))
        .route("/api/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, model = state.gateway.model(), "ai proxy listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("ai proxy stopped");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/server.rs"]
mod tests;
