//! REST API over a loaded export list.
//!
//! Provides four GET endpoints:
//! - `/classes`: configured element classes
//! - `/classes/{class}/properties`: properties of one class
//! - `/classes/{class}/properties/{property}`: settings of one property,
//!   with optional `?name=&value=` filter probes
//! - `/publications`: the publication list

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::export::ExportListReader;

/// Immutable application state shared across all request handlers.
///
/// The reader never changes after load, so it is shared through `Arc`
/// without locks.
pub struct AppState {
    pub reader: ExportListReader,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/classes", get(handlers::list_classes))
        .route("/classes/{class}/properties", get(handlers::list_properties))
        .route("/classes/{class}/properties/{property}", get(handlers::get_property))
        .route("/publications", get(handlers::list_publications))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "export-list API listening");
    axum::serve(listener, app).await
}
