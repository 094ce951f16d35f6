//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all dispatch handler
//! - Wire up middleware (tracing, request timeout)
//! - Resolve each request through the route table
//! - Hand matched requests to the proxy, redirect, or static handlers

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, Response, StatusCode},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServeConfig;
use crate::http::proxy::{self, HttpClient};
use crate::http::redirect;
use crate::routing::{RouteKind, RouteTable, TargetParseError};
use crate::spa::{static_files, BufferedResponse, NotFoundInterceptor};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub client: HttpClient,
}

/// HTTP server multiplexing static, proxy, and redirect behavior.
pub struct EdgeServer {
    router: Router,
}

impl EdgeServer {
    /// Build the server from validated configuration.
    ///
    /// Origin URLs are parsed here; a malformed one aborts startup.
    pub fn new(config: &ServeConfig) -> Result<Self, TargetParseError> {
        let table = Arc::new(RouteTable::from_config(config)?);

        for route in table.routes() {
            match &route.kind {
                RouteKind::Proxy(target) => {
                    tracing::info!(prefix = %route.prefix, origin = %target, "Adding proxy route");
                }
                RouteKind::Redirect(target) => {
                    tracing::info!(prefix = %route.prefix, target = %target, "Adding redirect route");
                }
                RouteKind::Static(root) => {
                    tracing::info!(prefix = %route.prefix, root = %root.display(), "Adding static route");
                }
            }
        }

        let client: HttpClient = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState { table, client };

        let router = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the route for a request and run the matched handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let path = request.uri().path().to_string();

    let Some(route) = state.table.resolve(&path) else {
        tracing::debug!(path = %path, "No route matched");
        return plain_response(StatusCode::NOT_FOUND, "404 page not found");
    };

    match &route.kind {
        RouteKind::Proxy(target) => {
            tracing::debug!(path = %path, origin = %target, "Proxying request");
            proxy::forward(&state.client, target, request).await
        }
        RouteKind::Redirect(target) => {
            tracing::debug!(path = %path, target = %target, "Redirecting");
            redirect::redirect_response(target)
        }
        RouteKind::Static(root) => {
            let stripped = route.strip_prefix(&path);
            serve_static(root, stripped).await
        }
    }
}

/// Run the static handler behind the not-found interceptor.
async fn serve_static(root: &Path, request_path: &str) -> Response<Body> {
    let mut interceptor = NotFoundInterceptor::new(BufferedResponse::new(), root);

    if let Err(err) = static_files::serve(root, request_path, &mut interceptor).await {
        tracing::error!(path = %request_path, error = %err, "Static handler write failed");
        return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
    }

    match interceptor.finish().await {
        Ok(sink) => sink.into_response(),
        // Already logged; nothing useful can be sent in its place.
        Err(_) => empty_response(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn plain_response(status: StatusCode, body: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
