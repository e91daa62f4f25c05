//! API Router with Swagger UI

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::TrafficRow;
use crate::api::handlers::{health, traffic};
use crate::domain::series::{ClassStats, Frame, LocationFrame, LocationStats};
use crate::domain::{IntervalTable, PricingTable, RangeSummary};
use crate::infrastructure::database::repositories::TrafficRepository;

/// Shared state for all routes: one repository over the read-only table plus
/// the immutable pricing/interval tables built once at startup. No mutable
/// cross-request state exists; every request aggregates fresh.
#[derive(Clone)]
pub struct AppState {
    pub repo: TrafficRepository,
    pub pricing: Arc<PricingTable>,
    pub intervals: Arc<IntervalTable>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: TrafficRepository::new(db),
            pricing: Arc::new(PricingTable::crz_default()),
            intervals: Arc::new(IntervalTable::standard()),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        traffic::get_data,
        traffic::get_filter,
        traffic::get_realtime_series,
    ),
    components(schemas(
        health::HealthResponse,
        TrafficRow,
        RangeSummary,
        Frame,
        LocationFrame,
        LocationStats,
        ClassStats,
    )),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Traffic", description = "Congestion-pricing traffic counts and aggregates")
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/data", get(traffic::get_data))
        .route("/filter", get(traffic::get_filter))
        .route("/realtime_series", get(traffic::get_realtime_series))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
