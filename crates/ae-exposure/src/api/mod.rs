//! Analytics Exposure HTTP API
//!
//! HTTP API endpoints for:
//! - Analytics event subscription management (create/list/get/replace/delete)
//! - On-demand analytics data fetch
//! - Health metadata
//! - OpenAPI document and Swagger UI

use axum::{
    routing::{get, post},
    extract::{Path, State},
    response::{IntoResponse, Response},
    http::{header, StatusCode},
    Json, Router,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use serde::Serialize;
use std::sync::Arc;
use ae_common::{
    AnalyticsData, AnalyticsEvent, AnalyticsEventFilter, AnalyticsEventFilterSubsc,
    AnalyticsEventNotif, AnalyticsEventSubsc, AnalyticsExposureSubsc, AnalyticsRequest,
    NetworkPerfInfo, ReportingInfo, TargetUeId, UeMobilityInfo,
};
use crate::{AnalyticsQueryEngine, ErrorResponse, SubscriptionRegistry};
use crate::error::ExposureError;
use tracing::debug;

/// Version segment of the northbound interface
pub const API_VERSION: &str = "v1";
/// Base path all subscription and fetch routes hang off
pub const BASE_PATH: &str = "/3gpp-analyticsexposure/v1";
/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "3GPP Analytics Exposure API";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SubscriptionRegistry>,
    pub analytics: Arc<AnalyticsQueryEngine>,
}

/// Health metadata response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status: UP
    pub status: String,
    /// Service name
    pub service: String,
    /// Northbound API version
    pub version: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "3GPP Analytics Exposure API",
        version = "v1",
        description = "Subscription management and on-demand retrieval for network analytics events"
    ),
    paths(
        health_handler,
        list_subscriptions,
        create_subscription,
        get_subscription,
        update_subscription,
        delete_subscription,
        fetch_analytics_data,
    ),
    components(schemas(
        AnalyticsExposureSubsc,
        AnalyticsEventSubsc,
        AnalyticsEventFilterSubsc,
        AnalyticsEventNotif,
        AnalyticsEvent,
        AnalyticsRequest,
        AnalyticsEventFilter,
        AnalyticsData,
        UeMobilityInfo,
        NetworkPerfInfo,
        ReportingInfo,
        TargetUeId,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "subscriptions", description = "Analytics event subscription management"),
        (name = "analytics", description = "On-demand analytics data retrieval"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the full router with all endpoints
pub fn create_router(
    registry: Arc<SubscriptionRegistry>,
    analytics: Arc<AnalyticsQueryEngine>,
) -> Router {
    let state = AppState {
        registry,
        analytics,
    };

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Basic health
        .route("/health", get(health_handler))
        // Standardized northbound interface
        .nest(
            BASE_PATH,
            Router::new()
                .route(
                    "/:af_id/subscriptions",
                    get(list_subscriptions).post(create_subscription),
                )
                .route(
                    "/:af_id/subscriptions/:subscription_id",
                    get(get_subscription)
                        .put(update_subscription)
                        .delete(delete_subscription),
                )
                .route("/:af_id/fetch", post(fetch_analytics_data)),
        )
        .with_state(state)
}

// ============================================================================
// Health Endpoints
// ============================================================================

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Health status", body = HealthResponse)
    )
)]
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: SERVICE_NAME.to_string(),
        version: API_VERSION.to_string(),
    })
}

// ============================================================================
// Subscription Endpoints
// ============================================================================

/// List all subscriptions owned by an application function
#[utoipa::path(
    get,
    path = "/3gpp-analyticsexposure/v1/{af_id}/subscriptions",
    tag = "subscriptions",
    params(
        ("af_id" = String, Path, description = "Application function identifier"),
        ("supp-feat" = Option<String>, Query, description = "Feature negotiation string, accepted and ignored")
    ),
    responses(
        (status = 200, description = "Subscriptions owned by the application function", body = Vec<AnalyticsExposureSubsc>)
    )
)]
async fn list_subscriptions(
    State(state): State<AppState>,
    Path(af_id): Path<String>,
) -> Json<Vec<AnalyticsExposureSubsc>> {
    Json(state.registry.list_subscriptions(&af_id))
}

/// Create a new analytics event subscription
#[utoipa::path(
    post,
    path = "/3gpp-analyticsexposure/v1/{af_id}/subscriptions",
    tag = "subscriptions",
    params(
        ("af_id" = String, Path, description = "Application function identifier")
    ),
    request_body = AnalyticsExposureSubsc,
    responses(
        (status = 201, description = "Subscription created, Location header points at the new resource", body = AnalyticsExposureSubsc),
        (status = 400, description = "Structurally invalid subscription", body = ErrorResponse)
    )
)]
async fn create_subscription(
    State(state): State<AppState>,
    Path(af_id): Path<String>,
    Json(subsc): Json<AnalyticsExposureSubsc>,
) -> Result<Response, ExposureError> {
    let stored = state.registry.create_subscription(&af_id, subsc)?;
    let subscription_id = stored.subscription_id.clone().unwrap_or_default();

    debug!(af_id = %af_id, subscription_id = %subscription_id, "Subscription created via API");

    let location = format!("{}/{}/subscriptions/{}", BASE_PATH, af_id, subscription_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(stored),
    )
        .into_response())
}

/// Retrieve one subscription
#[utoipa::path(
    get,
    path = "/3gpp-analyticsexposure/v1/{af_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    params(
        ("af_id" = String, Path, description = "Application function identifier"),
        ("subscription_id" = String, Path, description = "Subscription identifier"),
        ("supp-feat" = Option<String>, Query, description = "Feature negotiation string, accepted and ignored")
    ),
    responses(
        (status = 200, description = "The stored subscription", body = AnalyticsExposureSubsc),
        (status = 404, description = "Unknown owner or subscription", body = ErrorResponse)
    )
)]
async fn get_subscription(
    State(state): State<AppState>,
    Path((af_id, subscription_id)): Path<(String, String)>,
) -> Result<Json<AnalyticsExposureSubsc>, ExposureError> {
    let subsc = state.registry.get_subscription(&af_id, &subscription_id)?;
    Ok(Json(subsc))
}

/// Replace a subscription
#[utoipa::path(
    put,
    path = "/3gpp-analyticsexposure/v1/{af_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    params(
        ("af_id" = String, Path, description = "Application function identifier"),
        ("subscription_id" = String, Path, description = "Subscription identifier")
    ),
    request_body = AnalyticsExposureSubsc,
    responses(
        (status = 200, description = "The replacement as stored", body = AnalyticsExposureSubsc),
        (status = 400, description = "Structurally invalid subscription", body = ErrorResponse),
        (status = 404, description = "Unknown owner or subscription", body = ErrorResponse)
    )
)]
async fn update_subscription(
    State(state): State<AppState>,
    Path((af_id, subscription_id)): Path<(String, String)>,
    Json(subsc): Json<AnalyticsExposureSubsc>,
) -> Result<Json<AnalyticsExposureSubsc>, ExposureError> {
    let stored = state
        .registry
        .update_subscription(&af_id, &subscription_id, subsc)?;
    Ok(Json(stored))
}

/// Delete a subscription
#[utoipa::path(
    delete,
    path = "/3gpp-analyticsexposure/v1/{af_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    params(
        ("af_id" = String, Path, description = "Application function identifier"),
        ("subscription_id" = String, Path, description = "Subscription identifier")
    ),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 404, description = "Unknown owner or subscription", body = ErrorResponse)
    )
)]
async fn delete_subscription(
    State(state): State<AppState>,
    Path((af_id, subscription_id)): Path<(String, String)>,
) -> Result<StatusCode, ExposureError> {
    state
        .registry
        .delete_subscription(&af_id, &subscription_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Analytics Fetch Endpoint
// ============================================================================

/// Fetch an analytics snapshot
#[utoipa::path(
    post,
    path = "/3gpp-analyticsexposure/v1/{af_id}/fetch",
    tag = "analytics",
    params(
        ("af_id" = String, Path, description = "Application function identifier")
    ),
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Derived analytics snapshot", body = AnalyticsData),
        (status = 204, description = "Valid query, no data available"),
        (status = 400, description = "Structurally invalid request", body = ErrorResponse)
    )
)]
async fn fetch_analytics_data(
    State(state): State<AppState>,
    Path(af_id): Path<String>,
    Json(request): Json<AnalyticsRequest>,
) -> Result<Response, ExposureError> {
    let data = state.analytics.query(&af_id, &request)?;

    if data.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok((StatusCode::OK, Json(data)).into_response())
}
