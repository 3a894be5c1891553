//! REST API tests for the CropGuard portal
//!
//! Covers the full self-service flow:
//! - Tariff and catalog listing
//! - Premium, eligibility and order-total calculation
//! - OTP sign-in, checkout, and sign-out

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use cropguard_portal::{create_router, AppState, PortalConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let mut config = PortalConfig::default();
    config.session.otp_delay_ms = 0;
    config.checkout.processing_delay_ms = 0;
    create_router(AppState::from_config(&config).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_and_version() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/v1/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "cropguard-portal");
}

#[tokio::test]
async fn test_list_crops_and_plans() {
    let app = app();

    let (status, crops) = send(&app, "GET", "/api/v1/crops", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(crops.as_array().unwrap().len(), 8);
    assert_eq!(crops[0]["crop_name"], "Paddy");

    let (status, plans) = send(&app, "GET", "/api/v1/plans", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plans.as_array().unwrap().len(), 3);
    assert_eq!(plans[1]["tier_name"], "Standard Protection");
    assert_eq!(plans[1]["listed_premium"], "₹1,200");
}

#[tokio::test]
async fn test_premium_groundnut_standard() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/premium",
        Some(json!({"crop": "Groundnut", "plan": "Standard Protection", "area_acres": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], "Standard Protection");
    assert_eq!(body["sum_insured"], "100000");
    assert_eq!(body["gross_premium"], "6000");
    assert_eq!(body["subsidy_amount"], "3000");
    assert_eq!(body["net_premium"], "3000");
    assert_eq!(body["net_premium_display"], "₹3,000");
}

#[tokio::test]
async fn test_premium_accepts_form_text_area() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/premium",
        Some(json!({"crop": "paddy", "plan": "Basic", "area_acres": "2.5"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop"], "Paddy");
    assert_eq!(body["plan"], "Basic Protection");
    assert_eq!(body["sum_insured"], "125000");
    assert_eq!(body["net_premium"], "1250");
}

#[tokio::test]
async fn test_premium_with_state() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/premium",
        Some(json!({"state": "telangana", "crop": "Cotton", "plan": "Basic", "area_acres": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "Telangana");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/premium",
        Some(json!({"state": "Kerala", "crop": "Cotton", "plan": "Basic", "area_acres": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Kerala"));
}

#[tokio::test]
async fn test_premium_sum_insured_in_whole_rupees() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/premium",
        Some(json!({"crop": "Paddy", "plan": "Basic", "area_acres": "0.12345"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sum_insured"], "6173");
    assert_eq!(body["gross_premium"], "123");
}

#[tokio::test]
async fn test_premium_invalid_input() {
    let app = app();

    for body in [
        json!({"crop": "UnknownCrop", "plan": "Standard Protection", "area_acres": 1}),
        json!({"crop": "Paddy", "plan": "Gold", "area_acres": 1}),
        json!({"crop": "Paddy", "plan": "Basic", "area_acres": 0}),
        json!({"crop": "Paddy", "plan": "Basic", "area_acres": "many"}),
        json!({"crop": "Paddy", "plan": "Basic", "area_acres": null}),
    ] {
        let (status, response) = send(&app, "POST", "/api/v1/premium", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].as_str().unwrap().starts_with("Invalid input"));
    }
}

#[tokio::test]
async fn test_eligibility_by_ids_and_answers() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/eligibility",
        Some(json!({"checked": ["land", "aadhaar", "bank", "crop", "season"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/eligibility",
        Some(json!({
            "land_documents": true,
            "identity_document": true,
            "bank_account": false,
            "crop_and_area_known": true,
            "sowing_planned": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], false);
    assert_eq!(body["missing"], json!(["bank_account"]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/eligibility",
        Some(json!({"checked": ["land", "pan-card"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_eligibility_is_rejected() {
    let app = app();

    for body in [
        json!({"checked": "land"}),
        json!({"land_document": true}),
        json!({"checked": ["land"], "bank_account": true}),
    ] {
        let (status, response) = send(&app, "POST", "/api/v1/eligibility", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"]
            .as_str()
            .unwrap()
            .contains("Malformed eligibility checklist"));
    }
}

#[tokio::test]
async fn test_eligibility_questions() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/eligibility/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["id"], "land");
    assert_eq!(body[0]["item"], "land_documents");
    assert_eq!(body[1]["label"], "I have Aadhaar card");
}

#[tokio::test]
async fn test_order_total() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/v1/order-total", Some(json!({"amount": 1200}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tax_amount"], "216");
    assert_eq!(body["total_amount"], "1416");
    assert_eq!(body["total_display"], "₹1,416");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/order-total",
        Some(json!({"amount": "₹2,500"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], "2950");

    let (status, body) = send(&app, "POST", "/api/v1/order-total", Some(json!({"amount": 0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], "0");

    let (status, _) = send(&app, "POST", "/api/v1/order-total", Some(json!({"amount": "₹abc"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/v1/order-total", Some(json!({"amount": -5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plan_order_summary() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/plans/standard/order", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_amount"], "1200");
    assert_eq!(body["total_amount"], "1416");

    let (status, _) = send(&app, "GET", "/api/v1/plans/platinum/order", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_otp_sign_in_checkout_and_sign_out() {
    let app = app();

    let (status, _) = send(&app, "POST", "/api/v1/otp", Some(json!({"mobile": "99001 12233"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({"name": "Lakshmi", "mobile": "9900112233", "otp": "482913"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = session["id"].as_str().unwrap().to_string();

    let (status, current) = send(&app, "GET", &format!("/api/v1/sessions/{session_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["name"], "Lakshmi");

    let (status, receipt) = send(
        &app,
        "POST",
        "/api/v1/checkout",
        Some(json!({
            "session_id": session_id,
            "plan": "Standard Protection",
            "payment": {"method": "upi", "vpa": "lakshmi@upi"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["plan"], "Standard Protection");
    assert_eq!(receipt["order"]["total_amount"], "1416");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{session_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/v1/sessions/{session_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_in_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({"name": "Ramesh", "mobile": "12345", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("10-digit"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({"name": "Ramesh", "mobile": "9845012345", "otp": "123456"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_requires_session_and_details() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/checkout",
        Some(json!({
            "session_id": "00000000-0000-0000-0000-000000000000",
            "plan": "Basic",
            "payment": {"method": "bank_transfer"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, session) = send(
        &app,
        "POST",
        "/api/v1/sessions",
        Some(json!({"name": "Ramesh", "mobile": "9845012345", "password": "secret"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/checkout",
        Some(json!({
            "session_id": session["id"],
            "plan": "Basic",
            "payment": {"method": "net_banking", "bank": "Bank of Atlantis"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Bank of Atlantis"));
}

#[tokio::test]
async fn test_regions_and_registration() {
    let app = app();

    let (status, regions) = send(&app, "GET", "/api/v1/regions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(regions.as_array().unwrap().len(), 5);
    assert_eq!(regions[0]["state"], "Karnataka");
    assert_eq!(regions[0]["districts"][2], "Mandya");

    let form = json!({
        "name": "Suresh",
        "mobile": "9731234567",
        "otp": "246810",
        "password": "secret",
        "state": "Maharashtra",
        "district": "Mandya",
        "language": "hindi",
        "agree_terms": true
    });

    let (status, _) = send(&app, "POST", "/api/v1/registrations", Some(form.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/v1/otp", Some(json!({"mobile": "9731234567"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/v1/registrations", Some(form.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not in Maharashtra"));

    let mut form = form;
    form["district"] = json!("Nashik");
    let (status, profile) = send(&app, "POST", "/api/v1/registrations", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile["state"], "Maharashtra");
    assert_eq!(profile["district"], "Nashik");
    assert_eq!(profile["language"], "hindi");
}
