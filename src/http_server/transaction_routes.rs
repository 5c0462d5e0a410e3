//! Transaction HTTP Routes
//!
//! CRUD and range listing over the shared [`TransactionStore`].
//!
//! Store calls take a lock and may block on a full-file save, so each one
//! runs on the blocking pool.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::ApiError;
use crate::record::Record;
use crate::store::{StoreResult, TimestampRange, TransactionStore};

// ==================
// Shared State
// ==================

/// Transaction state shared across handlers
pub struct TransactionsState {
    pub store: Arc<TransactionStore>,
}

impl TransactionsState {
    pub fn new(store: Arc<TransactionStore>) -> Self {
        Self { store }
    }
}

// ==================
// Transaction Routes
// ==================

/// Create transaction routes
pub fn transaction_routes(state: Arc<TransactionsState>) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(list_handler)
                .post(create_handler)
                .fallback(endpoint_not_found),
        )
        .route(
            "/transactions/:id",
            get(get_handler)
                .put(update_handler)
                .delete(delete_handler)
                .fallback(endpoint_not_found),
        )
        .with_state(state)
}

/// Fallback for unknown paths and unsupported methods
pub async fn endpoint_not_found() -> ApiError {
    ApiError::endpoint_not_found()
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<TransactionsState>>,
    query: Result<Query<TimestampRange>, QueryRejection>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let Query(range) = query.map_err(|_| ApiError::invalid_query())?;
    let records = with_store(&state, move |store| store.list(&range)).await?;
    Ok(Json(records))
}

async fn get_handler(
    State(state): State<Arc<TransactionsState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = with_store(&state, move |store| store.get(id)).await?;
    Ok(Json(record))
}

async fn create_handler(
    State(state): State<Arc<TransactionsState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let payload = parse_body(&body)?;
    let record = with_store(&state, move |store| store.create(payload)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_handler(
    State(state): State<Arc<TransactionsState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&raw_id)?;
    // An unparseable body reaches the store as null, which it rejects only
    // once the id is known to exist.
    let partial = parse_body(&body).unwrap_or(Value::Null);
    let record = with_store(&state, move |store| store.update(id, partial)).await?;
    Ok(Json(record))
}

async fn delete_handler(
    State(state): State<Arc<TransactionsState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    with_store(&state, move |store| store.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Helpers
// ==================

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::invalid_json())
}

async fn with_store<T, F>(state: &TransactionsState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TransactionStore) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ApiError::internal(format!("Store task failed: {}", e)))?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("abc").unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_id("-1").unwrap_err().message(), "Invalid ID");
        assert!(parse_id("1.5").is_err());
    }

    #[test]
    fn test_parse_body() {
        assert!(parse_body(br#"{"type": "deposit"}"#).is_ok());
        assert_eq!(parse_body(b"{oops").unwrap_err().message(), "Invalid JSON");
        assert!(parse_body(b"").is_err());
    }
}
