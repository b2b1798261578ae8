//! HTTP JSON API for a list of todos held in memory.
//!
//! # Overview
//! `GET/POST /api/todos`, `GET /api/todos/search?q=`, and
//! `GET/PUT/DELETE /api/todos/{id}`, all backed by one [`TodoStore`] behind a
//! single `RwLock`. Nothing is persisted; a restart starts over.
//!
//! # Design
//! - The store is built by the caller and handed to [`app`] as router state,
//!   so tests can mount as many independent instances as they like.
//! - Ids come from a counter that never goes backwards, so a deleted id is
//!   never handed out again.
//! - Unknown ids answer 404 with `{"error": ...}`.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::TodoList;
pub use store::{SharedStore, StoreError, Todo, TodoFields, TodoId, TodoStore};

pub fn app(store: SharedStore) -> Router {
    routes::router(store).layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    run_until(listener, store, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn run_until<F>(
    listener: TcpListener,
    store: SharedStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
