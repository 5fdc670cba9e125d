use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use vital_sight_data::audit::VitalsLogWriter;
use vital_sight_data::model::LinearGlucoseModel;
use vital_sight_data::state::LatestGlucoseCell;
use vital_sight_domain::services::glucose::{create_glucose_service, GlucoseServiceTrait};

use crate::api::handlers::{health, vitals};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Shared application state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Feature assembly and model invocation
    pub glucose: Arc<dyn GlucoseServiceTrait>,
    /// Daily CSV audit log
    pub audit: Arc<VitalsLogWriter>,
    /// Most recent successful estimate
    pub latest: LatestGlucoseCell,
}

impl AppState {
    /// Assemble application state; the latest-estimate cell starts in its
    /// explicit `Unknown` state
    pub fn new(glucose: Arc<dyn GlucoseServiceTrait>, audit: Arc<VitalsLogWriter>) -> Self {
        Self {
            glucose,
            audit,
            latest: LatestGlucoseCell::new(),
        }
    }
}

/// Load the model artifact and build the shared state.
///
/// Fails when the artifact is missing or corrupt; the caller is expected to
/// abort startup in that case rather than serve without a model.
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let model = LinearGlucoseModel::load(&config.model_path)?;
    let audit = VitalsLogWriter::new(&config.log_dir)?;

    Ok(AppState::new(
        Arc::new(create_glucose_service(model)),
        Arc::new(audit),
    ))
}

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // Create health service using factory function
    let health_service = health::create_health_service(state.audit.clone());

    // Telemetry ingest and dashboard routes
    let api_routes = Router::new()
        .route("/upload", post(vitals::upload_vitals))
        .route("/latest_glucose", get(vitals::latest_glucose))
        .with_state(state);

    debug!("API routes configured");

    // Public routes that don't depend on the model
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    // Combine all routes
    let app = Router::new().merge(api_routes).merge(public_routes);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app.layer(TraceLayer::new_for_http())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}
