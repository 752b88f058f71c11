//! khreact HTTP gateway
//!
//! Routes REST requests for points to the service layer and translates the
//! results into HTTP statuses, bodies, and headers.
//! Handles:
//! - Request routing and extraction
//! - Rate limiting
//! - Observability (tracing, request ids, request metrics)

pub mod handlers;
pub mod headers;
pub mod middleware;

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use khreact_common::{config::AppConfig, db::DbPool, errors::AppError, service::PointService};
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub points: PointService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: DbPool) -> Self {
        Self {
            points: PointService::new(db.clone()),
            config,
            db,
        }
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Point endpoints. PUT/PATCH without an id segment answer 405.
    let mut api_routes = Router::new()
        .route(
            "/api/points",
            get(handlers::points::list_points)
                .post(handlers::points::create_point)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/points/{id}",
            get(handlers::points::get_point)
                .put(handlers::points::update_point)
                .patch(handlers::points::partial_update_point)
                .delete(handlers::points::delete_point),
        );

    if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::RateLimitState::new(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        api_routes = api_routes.layer(from_fn_with_state(
            limiter,
            middleware::rate_limit::rate_limit_middleware,
        ));
    }

    // Health endpoints (never rate limited)
    let health_routes = Router::new()
        .route("/management/health", get(handlers::health::health))
        .route("/management/health/readiness", get(handlers::health::ready));

    let request_timeout = state.config.request_timeout();
    let max_concurrent = state.config.server.max_concurrent_requests;

    // Compose the app
    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .route_layer(from_fn(middleware::metrics::track_metrics))
        .layer(timeout_layer(request_timeout))
        .layer(ConcurrencyLimitLayer::new(max_concurrent))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Requests still running after `timeout` are answered with 408
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
