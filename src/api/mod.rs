//! Read-only REST API over a generated profile set.
//!
//! Provides three GET endpoints:
//! - `/profiles`: profile names with summary statistics
//! - `/profiles/{name}`: one profile's schedule and intervals
//! - `/table`: the tidy hand-off table with optional filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::profiles::ProfileSet;
use crate::table::ProfileTable;

pub use types::{ErrorResponse, ProfileResponse, TableQuery};

/// Immutable application state shared across all request handlers.
///
/// Built once after generation and wrapped in `Arc`; no locks are needed
/// since all data is read-only.
pub struct AppState {
    /// Generated profiles.
    pub profiles: ProfileSet,
    /// Flattened table, precomputed from `profiles`.
    pub table: ProfileTable,
}

impl AppState {
    /// Wraps a profile set and precomputes its table.
    pub fn new(profiles: ProfileSet) -> Self {
        let table = profiles.to_table();
        Self { profiles, table }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profiles", get(handlers::list_profiles))
        .route("/profiles/{name}", get(handlers::get_profile))
        .route("/table", get(handlers::get_table))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
