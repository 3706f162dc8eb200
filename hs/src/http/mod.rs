//! HTTP API Module
//!
//! Read-only REST API over a [`CollectionStore`](crate::CollectionStore).
//! Decodes and clamps query parameters, calls the store on the blocking
//! pool, and wraps results in the `status`/`message`/`data` envelope.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use server::{HttpServer, shutdown_on};
