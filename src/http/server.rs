//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (timeout, tracing, request ID)
//! - Select a backend per request and forward to it
//! - Mark backends dead on failed attempts (active health policy)
//! - Emit one balancer event per dispatch outcome

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::uri::{Authority, PathAndQuery, Scheme},
    http::{header::HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::BalancerConfig;
use crate::health::{active, HealthPolicy};
use crate::load_balancer::pool::BackendPool;
use crate::load_balancer::round_robin::RoundRobin;
use crate::observability::logging::{LogSink, Severity};
use crate::observability::metrics;

/// Largest request body that is buffered for re-sending to another
/// backend. Larger bodies are forwarded in a single attempt.
const MAX_BUFFERED_BODY: usize = 1024 * 1024;

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<BackendPool>,
    pub selector: Arc<RoundRobin>,
    pub client: Client<HttpConnector, Body>,
    pub policy: HealthPolicy,
    pub sink: LogSink,
}

/// HTTP server for the load balancer.
pub struct HttpServer {
    router: Router,
    pool: Arc<BackendPool>,
    sink: LogSink,
}

impl HttpServer {
    /// Create a new HTTP server from validated configuration.
    pub fn new(config: &BalancerConfig, sink: LogSink) -> Result<Self, ConfigError> {
        let pool = Arc::new(BackendPool::from_config(&config.backends)?);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            pool: pool.clone(),
            selector: Arc::new(RoundRobin::new()),
            client,
            policy: config.health.mode,
            sink: sink.clone(),
        };

        let router = Self::build_router(config, state);
        Ok(Self { router, pool, sink })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BalancerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.proxy.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The backend pool, shared with the passive prober.
    pub fn pool(&self) -> Arc<BackendPool> {
        self.pool.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "http server starting");
        self.sink
            .emit(Severity::Info, format!("server up : http://{}", addr));

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("http server stopped");
        Ok(())
    }
}

/// Main proxy handler.
///
/// Selects a backend and forwards the request, retrying on failure with
/// at most one attempt per configured backend. When every attempt fails
/// the client receives 502 rather than an unbounded retry.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();

    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().clone();
    let method_str = method.to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "dispatching request"
    );

    let (parts, body) = request.into_parts();

    // Buffer the body so failed attempts can be re-sent to another
    // backend. Oversized bodies fall back to a single attempt.
    let (body_bytes, max_attempts) = match axum::body::to_bytes(body, MAX_BUFFERED_BODY).await {
        Ok(bytes) => (bytes, state.pool.len()),
        Err(_) => {
            state.sink.emit(
                Severity::Warning,
                "request body exceeded buffer, forwarding without retry".to_string(),
            );
            (Default::default(), 1)
        }
    };

    for attempt in 1..=max_attempts {
        let backend = state.selector.next(state.pool.backends());

        let uri = match rewrite_uri(&parts.uri, backend.url()) {
            Ok(uri) => uri,
            Err(e) => {
                // Cannot happen for a validated backend set; count the
                // attempt and move on rather than dying on one request.
                tracing::error!(request_id = %request_id, error = %e, "failed to build target uri");
                continue;
            }
        };

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            for (key, value) in parts.headers.iter() {
                headers.insert(key.clone(), value.clone());
            }
            if let Ok(id) = HeaderValue::from_str(&request_id) {
                headers.insert("x-request-id", id);
            }
        }

        let req = match builder.body(Body::from(body_bytes.clone())) {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "failed to build upstream request");
                continue;
            }
        };

        match state.client.request(req).await {
            Ok(response) => {
                let status = response.status();
                state.sink.emit(
                    Severity::Info,
                    format!("request loaded to : {}", backend.authority()),
                );
                metrics::record_request(&method_str, status.as_u16(), &backend.authority(), start_time);

                let (parts, body) = response.into_parts();
                return Response::from_parts(parts, Body::new(body)).into_response();
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    attempt,
                    backend = %backend.authority(),
                    error = %e,
                    "upstream attempt failed"
                );
                active::record_failure(&backend, state.policy, &state.sink);
            }
        }
    }

    state.sink.emit(
        Severity::Error,
        format!("no upstream available after {} attempts", max_attempts),
    );
    metrics::record_request(&method_str, 502, "none", start_time);
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

/// Rewrite the inbound URI onto the target backend, preserving path and
/// query.
fn rewrite_uri(original: &Uri, target: &Url) -> Result<Uri, axum::http::Error> {
    let mut parts = original.clone().into_parts();

    parts.scheme = Some(Scheme::HTTP);

    let host = target.host_str().unwrap_or("localhost");
    let authority = match target.port_or_known_default() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    parts.authority = Some(Authority::from_str(&authority)?);

    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    Ok(Uri::from_parts(parts)?)
}
