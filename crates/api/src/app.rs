use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::middleware::user_auth::{optional_user_auth, require_user_auth};
use crate::routes::{camera, devices, health, motion_events, pairing, recordings};
use crate::services::{EmailService, RecordingStore};
use domain::services::MotionNotifier;
use domain::token::{DeviceTokenGenerator, TokenGenerator};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn MotionNotifier>,
    pub store: RecordingStore,
    pub tokens: Arc<dyn TokenGenerator>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let notifier = Arc::new(EmailService::new(config.email.clone()));
    let store = RecordingStore::new(&config.storage);

    let state = AppState {
        pool,
        config: Arc::new(config),
        notifier,
        store,
        tokens: Arc::new(DeviceTokenGenerator),
    };

    create_app_with_state(state)
}

/// Build the router around an existing state.
///
/// Tests use this to swap the token generator for a deterministic one, or
/// the notifier for one that fails on demand.
pub fn create_app_with_state(state: AppState) -> Router {
    let config = state.config.clone();

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Camera ingestion routes, keyed by device token. Heartbeat needs the
    // caller's session when resolving a pending claim, so the whole group
    // runs through optional session validation.
    let camera_routes = Router::new()
        .route("/api/v1/camera/:token/heartbeat", post(camera::heartbeat))
        .route("/api/v1/camera/:token/status", get(camera::get_status))
        .route(
            "/api/v1/camera/:token/location",
            get(camera::get_location).post(camera::update_location),
        )
        .route("/api/v1/camera/:token/upload", post(camera::upload_recording))
        .route("/api/v1/camera/:token/motion", post(camera::record_motion))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_user_auth,
        ));

    // Owner routes (require an authenticated session)
    let owner_routes = Router::new()
        .route(
            "/api/v1/devices/pair",
            get(pairing::pair_device_deferred).post(pairing::pair_device),
        )
        .route("/api/v1/devices", get(devices::list_devices))
        .route("/api/v1/devices/:device_id", delete(devices::delete_device))
        .route(
            "/api/v1/devices/:device_id/recording/toggle",
            post(devices::toggle_recording),
        )
        .route("/api/v1/recordings", get(recordings::list_recordings))
        .route(
            "/api/v1/motion-events",
            get(motion_events::list_motion_events),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(camera_routes)
        .merge(owner_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
