use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use dhan_agent_instruments::IndexHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    index: IndexHandle,
}

impl ApiServer {
    #[must_use]
    pub const fn new(index: IndexHandle) -> Self {
        Self { index }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/instruments/resolve", post(handlers::resolve_instrument))
            .route(
                "/api/instruments/:underlying/expiries",
                get(handlers::list_expiries),
            )
            .route(
                "/api/instruments/:underlying/:expiry/strikes",
                get(handlers::list_strikes),
            )
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.index.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
