use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Vitals endpoints
        crate::api::handlers::vitals::upload_vitals,
        crate::api::handlers::vitals::latest_glucose,
    ),
    components(
        schemas(
            // Entities
            vital_sight_domain::entities::reading::VitalsReading,
            vital_sight_domain::services::blood_pressure::BpSource,
            crate::entities::vitals::UploadOkResponse,
            crate::entities::vitals::StatusErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "vitals", description = "Telemetry ingest and glucose estimate endpoints")
    ),
    info(
        title = "VitalSight API",
        version = "0.1.0",
        description = "Ingests biometric telemetry and serves glucose-range estimates",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
