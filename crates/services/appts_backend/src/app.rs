// --- File: crates/services/appts_backend/src/app.rs ---
use axum::{
    extract::State,
    http::{HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use appts_booking::routes as booking_routes;
use appts_common::AppError;

use crate::app_state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Result<(StatusCode, Json<Value>), AppError> {
    let database = match &state.db_client {
        Some(db) => {
            if !db.is_healthy().await {
                warn!("Health check failed: database unreachable");
                return Err(AppError::UnavailableError("database unreachable".to_string()));
            }
            "ok"
        }
        None => "memory",
    };
    Ok((StatusCode::OK, Json(status_body(&state, database))))
}

fn status_body(state: &AppState, database: &str) -> Value {
    json!({
        "status": "ok",
        "database": database,
        "holidayRegion": state.config.holidays.country_code,
    })
}

/// Builds the full application router, everything under `/api`.
pub fn build_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Appointment booking API" }))
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(booking_routes::routes(state.booking.clone()));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use appts_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Appointment Booking API",
                version = "0.1.0",
                description = "Books one appointment per day, skipping past days and public holidays",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    app.layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
