use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentExtractor, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::ServerSettings;
use crate::presentation::handlers::{analyze_handler, health_handler, upload_handler};
use crate::presentation::state::AppState;

/// Routes are served both at the root and under `/api`.
pub fn create_router<E, L>(state: AppState<E, L>, server: &ServerSettings) -> Router
where
    E: DocumentExtractor + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let routes = Router::new()
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler::<E, L>))
        .route("/analyze", post(analyze_handler::<E, L>));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}

/// A `*` entry opens CORS to any origin without credentials; otherwise only
/// the listed origins are allowed, with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin.trim() == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .inspect_err(|e| tracing::warn!(origin = %origin, error = %e, "Ignoring CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
