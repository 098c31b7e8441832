//! In-memory todo service exposed as an HTTP JSON API.
//!
//! # Overview
//! `TodoStore` owns the todo collection; the handlers in `handlers` translate
//! `/api/todos` requests into store calls and store results into responses.
//!
//! # Design
//! - The store is an explicit value created by the caller and shared through
//!   axum state, so tests get isolation by constructing a fresh store.
//! - `router` assembles routes and middleware from a `ServerConfig`;
//!   `run` / `serve` attach it to an already-bound listener so callers (tests,
//!   the binary) pick the port.
//! - Handler panics become generic 500 responses through `CatchPanicLayer`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod store;

use std::any::Any;
use std::future::Future;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError};
pub use model::{Todo, TodoChanges};
pub use store::{SharedStore, TodoStore};

/// Router with the default configuration: API plus the info document at `/`.
pub fn app(store: SharedStore) -> Router {
    router(store, &ServerConfig::default())
}

pub fn router(store: SharedStore, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/", get(handlers::service_info))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .fallback(handlers::api_not_found);

    // With a static directory the site root belongs to the browser page
    // (`index.html`); the info document stays reachable at `/api`.
    let app = Router::new().nest("/api", api);
    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(handlers::service_info)),
    };

    let mut app = app
        .with_state(store)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(detail).into_response()
}

/// Serve until the listener fails.
pub async fn run(
    listener: TcpListener,
    store: SharedStore,
    config: &ServerConfig,
) -> Result<(), std::io::Error> {
    serve(listener, store, config, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    store: SharedStore,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(addr = %listener.local_addr()?, "todo server listening");
    axum::serve(listener, router(store, config))
        .with_graceful_shutdown(shutdown)
        .await
}
