//! # HTTP Server Module
//!
//! Maps HTTP requests onto store operations and renders results as JSON.
//!
//! # Endpoints
//!
//! - `GET /transactions[?start=..][&end=..]` - list, optionally by timestamp range
//! - `GET /transactions/{id}` - fetch one
//! - `POST /transactions` - create
//! - `PUT /transactions/{id}` - partial update
//! - `DELETE /transactions/{id}` - delete
//!
//! Every request, including unknown paths, must carry valid Basic credentials.

pub mod auth_layer;
pub mod config;
pub mod errors;
pub mod server;
pub mod transaction_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServer};
