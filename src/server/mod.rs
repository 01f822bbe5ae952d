//! HTTP JSON API over the player store and the chain client.

pub mod blockchain;
pub mod error;
pub mod health;
pub mod outfits;
pub mod players;

pub use error::{ApiError, ApiResultExt};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::chain::RpcClient;
use crate::config::ServerConfig;
use crate::profile::{PlayerStore, ProfileError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
    pub chain: Arc<RpcClient>,
    pub settings: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlayerStore>, chain: RpcClient, settings: ServerConfig) -> Self {
        Self {
            store,
            chain: Arc::new(chain),
            settings: Arc::new(settings),
        }
    }
}

impl AppState {
    /// Runs `f` against the store on the blocking pool. File-backed stores do
    /// disk IO under their lock.
    pub async fn with_store<T, F>(&self, failure: &str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn PlayerStore) -> Result<T, ProfileError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| ApiError::internal(failure, e))?
            .or_fail(failure)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .nest("/players", players::routes())
        .nest("/outfits", outfits::routes())
        .nest("/blockchain", blockchain::routes())
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    debug!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Blockcraft API listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Can't listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
