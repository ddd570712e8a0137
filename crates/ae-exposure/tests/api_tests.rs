//! HTTP API Integration Tests
//!
//! Drives the full router with in-process requests (tower `oneshot`) and
//! asserts the externally observable contract: status codes, headers, and
//! JSON body shapes.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ae_exposure::api::{create_router, BASE_PATH};
use ae_exposure::{AnalyticsQueryEngine, SubscriptionRegistry};

fn app() -> Router {
    create_router(
        Arc::new(SubscriptionRegistry::new()),
        Arc::new(AnalyticsQueryEngine::new()),
    )
}

fn subscription_body() -> Value {
    json!({
        "analyEventsSubs": [{"analyEvent": "UE_MOBILITY"}],
        "notifUri": "http://af.example.com/notifications",
        "notifId": "notif-1",
        "suppFeat": "1"
    })
}

/// Send one request and return (status + headers, parsed JSON body if any).
async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&Value>,
) -> (axum::http::response::Parts, Option<Value>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (parts, json)
}

#[tokio::test]
async fn test_health_reports_service_metadata() {
    let (parts, body) = send(app(), "GET", "/health", None).await;

    assert_eq!(parts.status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], json!("UP"));
    assert_eq!(body["service"], json!("3GPP Analytics Exposure API"));
    assert_eq!(body["version"], json!("v1"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (parts, body) = send(app(), "GET", "/api-doc/openapi.json", None).await;

    assert_eq!(parts.status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["info"]["title"], json!("3GPP Analytics Exposure API"));
}

#[tokio::test]
async fn test_create_subscription_sets_location_and_id() {
    let app = app();
    let uri = format!("{}/af-1/subscriptions", BASE_PATH);

    let (parts, body) = send(app.clone(), "POST", &uri, Some(&subscription_body())).await;

    assert_eq!(parts.status, StatusCode::CREATED);
    let body = body.unwrap();
    let subscription_id = body["subscriptionId"].as_str().unwrap().to_string();
    assert!(!subscription_id.is_empty());
    assert_eq!(body["notifUri"], json!("http://af.example.com/notifications"));

    let location = parts
        .headers
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        location,
        format!("{}/af-1/subscriptions/{}", BASE_PATH, subscription_id)
    );

    // The Location header dereferences to the stored subscription.
    let (parts, fetched) = send(app, "GET", &location, None).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(fetched.unwrap(), body);
}

#[tokio::test]
async fn test_create_rejects_incomplete_subscriptions() {
    let app = app();
    let uri = format!("{}/af-1/subscriptions", BASE_PATH);

    let cases = [
        (
            json!({
                "notifUri": "http://af.example.com/notifications",
                "notifId": "notif-1"
            }),
            "analyEventsSubs",
        ),
        (
            json!({
                "analyEventsSubs": [{"analyEvent": "UE_COMM"}],
                "notifId": "notif-1"
            }),
            "notifUri",
        ),
        (
            json!({
                "analyEventsSubs": [{"analyEvent": "UE_COMM"}],
                "notifUri": "http://af.example.com/notifications"
            }),
            "notifId",
        ),
    ];

    for (body, missing_field) in cases {
        let (parts, response) = send(app.clone(), "POST", &uri, Some(&body)).await;
        assert_eq!(parts.status, StatusCode::BAD_REQUEST);
        let response = response.unwrap();
        assert_eq!(response["error"], json!("VALIDATION_ERROR"));
        assert!(
            response["message"]
                .as_str()
                .unwrap()
                .contains(missing_field),
            "message should name {}",
            missing_field
        );
    }

    // Nothing was stored by the rejected requests.
    let (parts, listed) = send(app, "GET", &uri, None).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(listed.unwrap(), json!([]));
}

#[tokio::test]
async fn test_get_unknown_subscription_is_404() {
    let uri = format!("{}/af-1/subscriptions/does-not-exist", BASE_PATH);
    let (parts, body) = send(app(), "GET", &uri, None).await;

    assert_eq!(parts.status, StatusCode::NOT_FOUND);
    let body = body.unwrap();
    assert_eq!(body["error"], json!("SUBSCRIPTION_NOT_FOUND"));
}

#[tokio::test]
async fn test_list_accepts_feature_query_param() {
    let uri = format!("{}/af-1/subscriptions?supp-feat=1", BASE_PATH);
    let (parts, body) = send(app(), "GET", &uri, None).await;

    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!([]));
}

#[tokio::test]
async fn test_list_scoped_to_owner() {
    let app = app();

    let create_uri = format!("{}/af-1/subscriptions", BASE_PATH);
    send(app.clone(), "POST", &create_uri, Some(&subscription_body())).await;
    send(app.clone(), "POST", &create_uri, Some(&subscription_body())).await;

    let (parts, listed) = send(app.clone(), "GET", &create_uri, None).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(listed.unwrap().as_array().unwrap().len(), 2);

    let other_uri = format!("{}/af-2/subscriptions", BASE_PATH);
    let (parts, listed) = send(app, "GET", &other_uri, None).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(listed.unwrap(), json!([]));
}

#[tokio::test]
async fn test_update_replaces_subscription() {
    let app = app();
    let create_uri = format!("{}/af-1/subscriptions", BASE_PATH);

    let (_, created) = send(app.clone(), "POST", &create_uri, Some(&subscription_body())).await;
    let created = created.unwrap();
    let subscription_id = created["subscriptionId"].as_str().unwrap().to_string();

    let replacement = json!({
        "analyEventsSubs": [{"analyEvent": "CONGESTION"}],
        "notifUri": "http://af.example.com/notifications-v2",
        "notifId": "notif-2"
    });
    let resource_uri = format!("{}/af-1/subscriptions/{}", BASE_PATH, subscription_id);

    let (parts, replaced) = send(app.clone(), "PUT", &resource_uri, Some(&replacement)).await;
    assert_eq!(parts.status, StatusCode::OK);
    let replaced = replaced.unwrap();
    assert_eq!(replaced["subscriptionId"], json!(subscription_id));
    assert_eq!(replaced["notifId"], json!("notif-2"));
    // Replacement is wholesale: the original suppFeat is gone, not merged.
    assert!(replaced.get("suppFeat").is_none());

    let (parts, fetched) = send(app.clone(), "GET", &resource_uri, None).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(fetched.unwrap(), replaced);

    // Replacing an unknown subscription is a 404, not an upsert.
    let missing_uri = format!("{}/af-1/subscriptions/does-not-exist", BASE_PATH);
    let (parts, body) = send(app, "PUT", &missing_uri, Some(&replacement)).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], json!("SUBSCRIPTION_NOT_FOUND"));
}

#[tokio::test]
async fn test_delete_subscription() {
    let app = app();
    let create_uri = format!("{}/af-1/subscriptions", BASE_PATH);

    let (_, created) = send(app.clone(), "POST", &create_uri, Some(&subscription_body())).await;
    let subscription_id = created.unwrap()["subscriptionId"]
        .as_str()
        .unwrap()
        .to_string();
    let resource_uri = format!("{}/af-1/subscriptions/{}", BASE_PATH, subscription_id);

    let (parts, body) = send(app.clone(), "DELETE", &resource_uri, None).await;
    assert_eq!(parts.status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (parts, _) = send(app.clone(), "GET", &resource_uri, None).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);

    let (parts, _) = send(app, "DELETE", &resource_uri, None).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fetch_mobility_snapshot() {
    let uri = format!("{}/af-1/fetch", BASE_PATH);
    let request = json!({"analyEvent": "UE_MOBILITY", "suppFeat": "1"});

    let (parts, body) = send(app(), "POST", &uri, Some(&request)).await;

    assert_eq!(parts.status, StatusCode::OK);
    let body = body.unwrap();
    let record = &body["ueMobilityInfos"][0];
    assert_eq!(record["duration"], json!(3600));
    assert_eq!(record["locInfo"], json!(["area1", "area2"]));
    assert_eq!(body["suppFeat"], json!("1"));
}

#[tokio::test]
async fn test_fetch_network_performance_with_filter() {
    let uri = format!("{}/af-1/fetch", BASE_PATH);
    let request = json!({
        "analyEvent": "NETWORK_PERFORMANCE",
        "analyEventFilter": {
            "locArea": "cell-42",
            "nwPerfTypes": ["MAX_NUM_OF_UE"]
        },
        "suppFeat": "1"
    });

    let (parts, body) = send(app(), "POST", &uri, Some(&request)).await;

    assert_eq!(parts.status, StatusCode::OK);
    let record = &body.unwrap()["nwPerfInfos"][0];
    assert_eq!(record["locArea"], json!("cell-42"));
    assert_eq!(record["nwPerfType"], json!("MAX_NUM_OF_UE"));
    assert_eq!(record["relativeRatio"], json!(0.95));
}

#[tokio::test]
async fn test_fetch_unsourced_event_returns_no_content() {
    let uri = format!("{}/af-1/fetch", BASE_PATH);
    let request = json!({"analyEvent": "UE_COMM", "suppFeat": "1"});

    let (parts, body) = send(app(), "POST", &uri, Some(&request)).await;

    assert_eq!(parts.status, StatusCode::NO_CONTENT);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_fetch_without_supp_feat_is_400() {
    let uri = format!("{}/af-1/fetch", BASE_PATH);
    let request = json!({"analyEvent": "UE_MOBILITY"});

    let (parts, body) = send(app(), "POST", &uri, Some(&request)).await;

    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    let body = body.unwrap();
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));
    assert!(body["message"].as_str().unwrap().contains("suppFeat"));
}
