//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router mounting the front controller on the service path
//! - Wire up middleware (tracing, timeouts, body limits, request ID)
//! - Answer conditional GETs before delegating to the controller
//! - Turn processing errors into HTTP responses
//! - Record request metrics
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DispatcherConfig;
use crate::controller::FrontController;
use crate::http::conditional::{self, Freshness};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<FrontController>,
}

/// HTTP server hosting one front controller.
pub struct HttpServer {
    router: Router,
    controller: Arc<FrontController>,
}

impl HttpServer {
    /// Create a server for an initialized controller.
    pub fn new(config: &DispatcherConfig, controller: FrontController) -> Self {
        let controller = Arc::new(controller);
        let state = AppState {
            controller: controller.clone(),
        };
        let router = Self::build_router(config, state);
        Self { router, controller }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DispatcherConfig, state: AppState) -> Router {
        let base = config.dispatcher.service_path.trim_end_matches('/');
        let wildcard = format!("{base}/{{*path}}");
        let base = if base.is_empty() { "/" } else { base };

        Router::new()
            .route(base, any(dispatch_handler))
            .route(&wildcard, any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The router, for serving it by other means (e.g. in tests).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn controller(&self) -> &Arc<FrontController> {
        &self.controller
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            controller = %self.controller.name(),
            wsdl = ?self.controller.wsdl_names(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Entry point for every request on the service path.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();
    let route = state.controller.route(&method, &path).kind();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route,
        "Dispatching request"
    );

    let freshness = if method == Method::GET {
        conditional::evaluate(state.controller.last_modified(&request), request.headers())
    } else {
        Freshness::Unknown
    };

    let response = match freshness {
        Freshness::NotModified => StatusCode::NOT_MODIFIED.into_response(),
        Freshness::Modified(last_modified) => {
            let mut response = service(&state.controller, request, &request_id).await;
            if response.status().is_success() && !response.headers().contains_key(header::LAST_MODIFIED) {
                if let Some(value) = conditional::last_modified_header(last_modified) {
                    response.headers_mut().insert(header::LAST_MODIFIED, value);
                }
            }
            response
        }
        Freshness::Unknown => service(&state.controller, request, &request_id).await,
    };

    metrics::record_request(route, method.as_str(), response.status().as_u16(), start_time);
    response
}

async fn service(controller: &FrontController, request: Request<Body>, request_id: &str) -> Response {
    match controller.service(request).await {
        Ok(response) => response,
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "Request processing failed");
            } else {
                tracing::warn!(request_id = %request_id, error = %e, "Request rejected");
            }
            e.into_response()
        }
    }
}
