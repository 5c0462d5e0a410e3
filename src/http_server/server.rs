//! # HTTP Server
//!
//! Combines the transaction routes, the not-found fallback and the
//! Basic-auth guard into one Axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;

use super::auth_layer::{require_basic_auth, AuthGuard};
use super::config::HttpServerConfig;
use super::transaction_routes::{endpoint_not_found, transaction_routes, TransactionsState};
use crate::auth::CredentialVerifier;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::TransactionStore;

/// Build the full router.
///
/// The auth layer wraps everything, so unknown paths answer 401 before 404.
pub fn build_router(
    store: Arc<TransactionStore>,
    verifier: Arc<dyn CredentialVerifier>,
    realm: &str,
) -> Router {
    let guard = AuthGuard::new(verifier, realm);
    let transactions = Arc::new(TransactionsState::new(store));

    Router::new()
        .merge(transaction_routes(transactions))
        .fallback(endpoint_not_found)
        .layer(middleware::from_fn_with_state(guard, require_basic_auth))
}

/// HTTP server for the transaction API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(
        config: HttpServerConfig,
        store: Arc<TransactionStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let router = build_router(store, verifier, &config.realm);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C.
    ///
    /// Returns once in-flight requests have drained, so the caller can close
    /// the store afterwards.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerListening, &[("addr", local.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until the process is killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BasicCredentials;
    use crate::persistence::MemoryGateway;

    fn server(config: HttpServerConfig) -> HttpServer {
        let store = Arc::new(TransactionStore::open(MemoryGateway::new()).unwrap());
        HttpServer::new(config, store, Arc::new(BasicCredentials::new("admin", "secret")))
    }

    #[test]
    fn test_server_creation() {
        assert_eq!(server(HttpServerConfig::default()).socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = server(HttpServerConfig::with_port(9000));
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds() {
        let _router = server(HttpServerConfig::default()).router();
    }
}
