use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use console_core::middleware::request_id_middleware;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    app::{health_check, index},
    invoices, locations,
    metrics::metrics,
    resources,
};
use crate::services::metrics::http_metrics_middleware;
use crate::AppState;

/// Origins that fail to parse are logged and skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/locations/catalog", get(locations::catalog))
        .route("/locations/selection", post(locations::select))
        .route(
            "/locations/selection/validate",
            post(locations::validate_selection),
        )
        .route("/locations/hierarchy", post(locations::save))
        .route(
            "/invoices/:invoice_id/payments",
            get(invoices::show_payments).post(invoices::create_payment),
        )
        .route(
            "/invoices/:invoice_id/payments/:payment_id/receipt",
            get(invoices::receipt),
        )
        .route(
            "/resources/:resource",
            get(resources::list).post(resources::create),
        )
        .route(
            "/resources/:resource/:id",
            get(resources::show)
                .put(resources::update)
                .delete(resources::delete),
        );

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest("/api", api)
        .layer(from_fn(http_metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outer to the trace layer, so its span already sees the request id
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}
