mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{send, setup_app};

fn quotation_body(broker: &str, product: &str, date: &str) -> Value {
    json!({
        "broker": broker,
        "insured": "Gulf Trading LLC",
        "productType": product,
        "estimatedPremium": "12500.50",
        "quotationDate": date,
    })
}

#[tokio::test]
async fn test_create_and_get_quotation() {
    let app = setup_app();
    let (status, created) = send(
        &app.router,
        "POST",
        "/departments/marine/quotations",
        Some(quotation_body("Howden", "Marine Cargo", "2025-03-04")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Open");
    assert_eq!(created["currency"], "AED");
    assert_eq!(created["department"], "marine");
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, fetched) = send(&app.router, "GET", &format!("/departments/marine/quotations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["broker"], "Howden");
    assert_eq!(fetched["estimatedPremium"], "12500.50");
}

#[tokio::test]
async fn test_quotation_is_scoped_to_department() {
    let app = setup_app();
    let (_, created) = send(
        &app.router,
        "POST",
        "/departments/marine/quotations",
        Some(quotation_body("Howden", "Marine Cargo", "2025-03-04")),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let (status, _) = send(&app.router, "GET", &format!("/departments/liability/quotations/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_department_is_rejected() {
    let app = setup_app();
    let (status, body) = send(&app.router, "GET", "/departments/aviation/quotations", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_invalid_premium_fails_validation() {
    let app = setup_app();
    let mut body = quotation_body("Howden", "Marine Cargo", "2025-03-04");
    body["estimatedPremium"] = json!("abc");
    let (status, body) = send(&app.router, "POST", "/departments/marine/quotations", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");
}

#[tokio::test]
async fn test_decline_requires_reason() {
    let app = setup_app();
    let (_, created) = send(
        &app.router,
        "POST",
        "/departments/property-engineering/quotations",
        Some(quotation_body("Marsh", "CAR", "2025-05-01")),
    )
    .await;
    let uri = format!("/departments/property-engineering/quotations/{}/status", created["id"].as_str().unwrap());

    let (status, _) = send(&app.router, "PUT", &uri, Some(json!({ "status": "Decline" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app.router,
        "PUT",
        &uri,
        Some(json!({ "status": "Decline", "declineReason": "Rate too low" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Decline");
    assert_eq!(updated["declineReason"], "Rate too low");

    let (status, reopened) = send(&app.router, "PUT", &uri, Some(json!({ "status": "Open" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reopened["declineReason"], Value::Null);
}

#[tokio::test]
async fn test_update_quotation_replaces_fields() {
    let app = setup_app();
    let (_, created) = send(
        &app.router,
        "POST",
        "/departments/marine/quotations",
        Some(quotation_body("Howden", "Marine Cargo", "2025-03-04")),
    )
    .await;
    let uri = format!("/departments/marine/quotations/{}", created["id"].as_str().unwrap());
    let mut edit = quotation_body("Aon", "Hull & Machinery", "2025-03-05");
    edit["estimatedPremium"] = json!("9000");
    let (status, updated) = send(&app.router, "PUT", &uri, Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["broker"], "Aon");
    assert_eq!(updated["estimatedPremium"], "9000");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_list_filters_and_pages() {
    let app = setup_app();
    for (broker, product, date) in [
        ("Howden", "Marine Cargo", "2025-01-10"),
        ("Aon", "Hull & Machinery", "2025-02-10"),
        ("Howden", "Goods in Transit", "2025-03-10"),
    ] {
        let (status, _) = send(
            &app.router,
            "POST",
            "/departments/marine/quotations",
            Some(quotation_body(broker, product, date)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app.router, "GET", "/departments/marine/quotations?search=howden", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 20);
    // Newest quotation date first.
    assert_eq!(page["items"][0]["quotationDate"], "2025-03-10");

    let (_, page) = send(&app.router, "GET", "/departments/marine/quotations?page=2&limit=2", None).await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let (_, page) = send(&app.router, "GET", "/departments/marine/quotations?status=Confirmed", None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_delete_and_bulk_delete() {
    let app = setup_app();
    let mut ids = Vec::new();
    for date in ["2025-01-10", "2025-01-11", "2025-01-12"] {
        let (_, created) = send(
            &app.router,
            "POST",
            "/departments/liability/quotations",
            Some(quotation_body("Lockton", "Professional Indemnity", date)),
        )
        .await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(&app.router, "DELETE", &format!("/departments/liability/quotations/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app.router, "DELETE", &format!("/departments/liability/quotations/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app.router,
        "POST",
        "/departments/liability/quotations/bulk-delete",
        Some(json!({ "ids": [ids[1], ids[2], ids[0]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = setup_app();
    let (status, _) = send(&app.router, "GET", "/departments/marine/quotations/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = setup_app();
    let (status, body) = send(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_edit_keeps_confirmed_status() {
    let app = setup_app();
    let mut body = quotation_body("Howden", "Marine Cargo", "2025-03-04");
    body["status"] = json!("Confirmed");
    let (_, created) = send(&app.router, "POST", "/departments/marine/quotations", Some(body)).await;
    assert_eq!(created["status"], "Confirmed");

    let uri = format!("/departments/marine/quotations/{}", created["id"].as_str().unwrap());
    let (status, updated) = send(&app.router, "PUT", &uri, Some(quotation_body("Aon", "Marine Cargo", "2025-03-04"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["broker"], "Aon");
    assert_eq!(updated["status"], "Confirmed");
}
