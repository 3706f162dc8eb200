//! HTTP API Request Handlers
//!
//! Store calls read files on first use, so they run on the blocking pool.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use super::types::*;
use crate::error::StoreError;
use crate::record::Record;
use crate::store::CollectionStore;

/// Maximum allowed search text length in bytes
pub const MAX_QUERY_LENGTH: usize = 1_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CollectionStore>,
}

impl AppState {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CollectionStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || op(&store)).await {
            Ok(result) => result.map_err(ApiError::Store),
            Err(e) => Err(ApiError::Internal(e.to_string())),
        }
    }
}

/// Failure of a request, rendered as an [`ErrorResponse`]
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest { message: String, error: String },
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the summary message used for this endpoint
    fn respond(self, message: &str) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Store(e) => {
                if status.is_server_error() {
                    error!("{}: {}", message, e);
                }
                ErrorResponse::new(message, e.to_string())
            }
            ApiError::BadRequest { message, error } => ErrorResponse::new(message, error),
            ApiError::Internal(e) => {
                error!("{}: {}", message, e);
                ErrorResponse::new(message, e)
            }
        };
        (status, Json(body)).into_response()
    }
}

fn check_query_length(params: &PageParams) -> Result<(), ApiError> {
    match params.q.as_deref() {
        Some(q) if q.len() > MAX_QUERY_LENGTH => Err(ApiError::BadRequest {
            message: "Search query too long".to_string(),
            error: format!(
                "Query length {} exceeds maximum allowed length of {} bytes",
                q.len(),
                MAX_QUERY_LENGTH
            ),
        }),
        _ => Ok(()),
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `GET /narrators`
pub async fn narrators(State(state): State<AppState>) -> Response {
    match state.run(|store| store.list_narrators()).await {
        Ok(available) => Json(ApiResponse::success(
            "Narrators retrieved successfully",
            Narrators { available },
        ))
        .into_response(),
        Err(e) => e.respond("Failed to get narrators"),
    }
}

/// `GET /hadis`: one page across all narrators
pub async fn all_hadiths(State(state): State<AppState>, Query(params): Query<PageParams>) -> Response {
    if let Err(e) = check_query_length(&params) {
        return e.respond("Failed to get hadiths");
    }
    let spec = params.to_spec();
    debug!(page = spec.page, limit = spec.limit, q = ?spec.search_text, "All hadiths request");

    let query = spec.clone();
    match state.run(move |store| store.query_all(&query)).await {
        Ok(page) => {
            let pagination = Pagination::new(&spec, &page);
            Json(PaginatedResponse::success(
                "All hadiths retrieved successfully",
                page.items,
                pagination,
            ))
            .into_response()
        }
        Err(e) => e.respond("Failed to get hadiths"),
    }
}

/// `GET /hadis/:slug`: one page of a narrator's collection
pub async fn hadiths_by_narrator(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    if let Err(e) = check_query_length(&params) {
        return e.respond("Failed to get hadiths");
    }
    let spec = params.to_spec();
    debug!(narrator = %slug, page = spec.page, limit = spec.limit, "Narrator hadiths request");

    let query = spec.clone();
    match state.run(move |store| store.query(&slug, &query)).await {
        Ok(page) => {
            let pagination = Pagination::new(&spec, &page);
            Json(PaginatedResponse::success(
                "Hadiths retrieved successfully",
                page.items,
                pagination,
            ))
            .into_response()
        }
        Err(e) => e.respond("Failed to get hadiths"),
    }
}

/// `GET /hadis/:slug/:number`: a single hadith.
///
/// Any integer is a valid number; one that no record carries is a 404.
pub async fn hadith_by_number(State(state): State<AppState>, Path((slug, number)): Path<(String, String)>) -> Response {
    let Ok(number) = number.parse::<i64>() else {
        return ApiError::BadRequest {
            message: "Invalid hadith number".to_string(),
            error: "Hadith number must be an integer".to_string(),
        }
        .respond("Invalid hadith number");
    };

    match state.run(move |store| store.fetch_one(&slug, number)).await {
        Ok(record) => Json(ApiResponse::<Record>::success("Hadith retrieved successfully", record)).into_response(),
        Err(e) => e.respond("Hadith not found"),
    }
}
