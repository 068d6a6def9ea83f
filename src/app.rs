use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

/// Build the full router over an already constructed state
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(read_routes())
        .merge(admin_routes().route_layer(middleware::from_fn(require_admin)))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        // Public
        .route("/health", get(public::health::health))
        .route("/login", post(public::auth::login))
        // Bearer token required
        .merge(protected)
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn read_routes() -> Router<AppState> {
    use protected::{devices, network_nodes};

    Router::new()
        .route("/devices", get(devices::list))
        .route("/devices/:id", get(devices::get))
        .route("/network-nodes", get(network_nodes::list))
        .route("/network-nodes/tree", get(network_nodes::tree))
        .route("/network-nodes/:id", get(network_nodes::get))
}

fn admin_routes() -> Router<AppState> {
    use axum::routing::put;
    use protected::{devices, network_nodes};

    Router::new()
        .route("/devices", post(devices::create))
        .route("/devices/:id", put(devices::update).delete(devices::delete))
        .route("/network-nodes", post(network_nodes::create))
        .route(
            "/network-nodes/:id",
            put(network_nodes::update).delete(network_nodes::delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
