mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

use common::{send, setup_app, TestApp};
use underwriting_backend::model::common::{BusinessType, Currency, PolicyStatus};
use underwriting_backend::model::department::Department;
use underwriting_backend::model::order::Order;
use underwriting_backend::repository::order_repo::OrderRepository;

fn dec(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

async fn post_marine_order(app: &TestApp, product: &str, premium: &str, date: &str) {
    let (status, _) = send(
        &app.router,
        "POST",
        "/departments/marine/orders",
        Some(json!({
            "broker": "Howden",
            "insured": "Gulf Trading LLC",
            "productType": product,
            "premium": premium,
            "businessType": "New Business",
            "orderDate": date,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_january_cargo_hits_target() {
    let app = setup_app();
    post_marine_order(&app, "Marine Cargo", "5362614.00", "2025-01-10").await;

    let (status, snapshot) = send(&app.router, "GET", "/kpi/production?year=2025&month=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["targetYear"], 2025);
    assert_eq!(dec(&snapshot["cargo"]["actual"]), Decimal::from(5_362_614));
    assert_eq!(dec(&snapshot["cargo"]["target"]), Decimal::from(5_362_614));
    assert_eq!(dec(&snapshot["cargo"]["variance"]), Decimal::ZERO);
    assert_eq!(dec(&snapshot["cargo"]["progress"]), Decimal::from(100));
    assert_eq!(dec(&snapshot["hull"]["actual"]), Decimal::ZERO);
    assert_eq!(snapshot["orderCount"], 1);
}

#[tokio::test]
async fn test_other_departments_are_ignored() {
    let app = setup_app();
    let (status, _) = send(
        &app.router,
        "POST",
        "/departments/liability/orders",
        Some(json!({
            "broker": "Howden",
            "insured": "Gulf Trading LLC",
            "productType": "Marine Cargo",
            "premium": "1000",
            "businessType": "New Business",
            "orderDate": "2024-03-10",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, snapshot) = send(&app.router, "GET", "/kpi/production?year=2024", None).await;
    assert_eq!(snapshot["orderCount"], 0);
    assert_eq!(dec(&snapshot["total"]["actual"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_closing_day_rolls_into_next_month() {
    let app = setup_app();
    post_marine_order(&app, "Hull & Machinery", "1000", "2024-01-26").await;
    post_marine_order(&app, "Hull & Machinery", "500", "2024-01-25").await;
    // Rolls into January 2025, outside production year 2024.
    post_marine_order(&app, "Hull & Machinery", "700", "2024-12-27").await;

    let (_, january) = send(&app.router, "GET", "/kpi/production?year=2024&month=0", None).await;
    assert_eq!(dec(&january["hull"]["actual"]), Decimal::from(500));
    let (_, february) = send(&app.router, "GET", "/kpi/production?year=2024&month=1", None).await;
    assert_eq!(dec(&february["hull"]["actual"]), Decimal::from(1000));
    let (_, year) = send(&app.router, "GET", "/kpi/production?year=2024", None).await;
    assert_eq!(dec(&year["hull"]["actual"]), Decimal::from(1500));
    assert_eq!(year["month"], Value::Null);
}

#[tokio::test]
async fn test_unparsable_stored_premium_counts_as_zero() {
    let app = setup_app();
    let order = Order {
        id: None,
        department: Department::Marine,
        quotation_id: None,
        broker: "Howden".to_string(),
        insured: "Gulf Trading LLC".to_string(),
        product_type: "Marine Cargo".to_string(),
        premium: "abc".to_string(),
        currency: Currency::default(),
        business_type: BusinessType::NewBusiness,
        order_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        requires_satisfactory_survey: None,
        policy_status: PolicyStatus::default(),
        notes: None,
        created_at: None,
        updated_at: None,
    };
    app.orders.create(Department::Marine, order).await.unwrap();

    let (status, snapshot) = send(&app.router, "GET", "/kpi/production?year=2024&month=4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&snapshot["cargo"]["actual"]), Decimal::ZERO);
    assert_eq!(dec(&snapshot["cargo"]["progress"]), Decimal::ZERO);
    assert_eq!(snapshot["orderCount"], 1);
}

#[tokio::test]
async fn test_live_year_books_everything_to_january() {
    let app = setup_app();
    post_marine_order(&app, "Marine Cargo", "1000", "2025-06-10").await;

    let (_, january) = send(&app.router, "GET", "/kpi/production?year=2025&month=0", None).await;
    assert_eq!(january["liveYear"], true);
    assert_eq!(dec(&january["cargo"]["actual"]), Decimal::from(1000));
    let (_, june) = send(&app.router, "GET", "/kpi/production?year=2025&month=5", None).await;
    assert_eq!(dec(&june["cargo"]["actual"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_unknown_year_uses_default_targets() {
    let app = setup_app();
    let (status, snapshot) = send(&app.router, "GET", "/kpi/production?year=2031", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["year"], 2031);
    assert_eq!(snapshot["targetYear"], 2025);
    assert_eq!(dec(&snapshot["total"]["target"]), Decimal::from(81_537_010));
}

#[tokio::test]
async fn test_month_out_of_range_is_rejected() {
    let app = setup_app();
    let (status, body) = send(&app.router, "GET", "/kpi/production?year=2025&month=12", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_monthly_breakdown_sums_to_year() {
    let app = setup_app();
    post_marine_order(&app, "Marine Cargo", "100", "2024-02-10").await;
    post_marine_order(&app, "Marine Hull", "250.50", "2024-07-30").await;
    post_marine_order(&app, "Fine Art", "999", "2024-09-01").await;

    let (status, breakdown) = send(&app.router, "GET", "/kpi/production/monthly?year=2024", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown["targetYear"], 2024);
    assert_eq!(breakdown["knownTargetYears"], json!([2024, 2025]));
    let months = breakdown["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    let monthly_total: Decimal = months.iter().map(|m| dec(&m["total"]["actual"])).sum();

    let (_, year) = send(&app.router, "GET", "/kpi/production?year=2024", None).await;
    assert_eq!(monthly_total, dec(&year["total"]["actual"]));
    assert_eq!(monthly_total, Decimal::from_str("350.50").unwrap());
    assert_eq!(year["uncategorisedCount"], 1);
    assert_eq!(dec(&months[7]["hull"]["actual"]), Decimal::from_str("250.50").unwrap());
}

#[tokio::test]
async fn test_oversized_premium_is_rejected_and_stored_ones_do_not_break_reports() {
    let app = setup_app();
    let huge = "79228162514264337593543950335";
    let (status, body) = send(
        &app.router,
        "POST",
        "/departments/marine/orders",
        Some(json!({
            "broker": "Howden",
            "insured": "Gulf Trading LLC",
            "productType": "Marine Cargo",
            "premium": huge,
            "businessType": "New Business",
            "orderDate": "2024-03-10",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");

    for day in [10, 11] {
        let order = Order {
            id: None,
            department: Department::Marine,
            quotation_id: None,
            broker: "Howden".to_string(),
            insured: "Gulf Trading LLC".to_string(),
            product_type: "Marine Cargo".to_string(),
            premium: huge.to_string(),
            currency: Currency::default(),
            business_type: BusinessType::NewBusiness,
            order_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            requires_satisfactory_survey: None,
            policy_status: PolicyStatus::default(),
            notes: None,
            created_at: None,
            updated_at: None,
        };
        app.orders.create(Department::Marine, order).await.unwrap();
    }

    let (status, snapshot) = send(&app.router, "GET", "/kpi/production?year=2024", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&snapshot["cargo"]["actual"]), Decimal::MAX);

    let (status, summary) = send(&app.router, "GET", "/departments/marine/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&summary["totalPremium"]), Decimal::MAX);

    let (status, _) = send(
        &app.router,
        "POST",
        "/reports/analysis",
        Some(json!({ "from": "2024-01-01", "to": "2024-12-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_out_of_range_year_is_rejected() {
    let app = setup_app();
    let (status, body) = send(&app.router, "GET", "/kpi/production?year=-2147483648", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    let (status, _) = send(&app.router, "GET", "/kpi/production/monthly?year=2147483647", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
