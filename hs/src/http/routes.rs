//! HTTP API Route Definitions

use axum::{Router, routing::get};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/narrators", get(handlers::narrators))
        .route("/hadis", get(handlers::all_hadiths))
        .route("/hadis/:slug", get(handlers::hadiths_by_narrator))
        .route("/hadis/:slug/:number", get(handlers::hadith_by_number))
        .with_state(app_state);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_v1)
}
