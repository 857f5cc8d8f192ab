mod common;

use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::json;

use common::{calculation_app, test_route};

#[actix_rt::test]
async fn test_quote_returns_breakdown() {
    let app = test::init_service(calculation_app()).await;
    let travel_date = (Utc::now() + Duration::days(7)).date_naive();

    let req = test::TestRequest::post()
        .uri("/api/pricing/quote")
        .set_json(&json!({
            "route": test_route(40.0),
            "travelDate": travel_date,
            "availableSeats": 15,
            "totalSeats": 30
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["basePrice"], 40.0);
    assert_eq!(body["occupancyRate"], 0.5);
    assert_eq!(body["demandFactor"], 1.0);
    assert_eq!(body["holidayFactor"], 1.0);
    assert_eq!(body["floorApplied"], false);
    assert!(body["price"].as_f64().unwrap() > 0.0);
}

#[actix_rt::test]
async fn test_quote_enforces_cost_floor() {
    let app = test::init_service(calculation_app()).await;
    let travel_date = (Utc::now() + Duration::days(3)).date_naive();

    let mut route = test_route(10.0);
    route["estimatedFuelCost"] = json!(40);
    route["tollCharges"] = json!(8);

    let req = test::TestRequest::post()
        .uri("/api/pricing/quote")
        .set_json(&json!({
            "route": route,
            "travelDate": travel_date,
            "availableSeats": 1,
            "totalSeats": 30
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["costFloor"], 60.0);
    assert_eq!(body["price"], 60.0);
    assert_eq!(body["floorApplied"], true);
}

#[actix_rt::test]
async fn test_quote_missing_route_is_bad_request() {
    let app = test::init_service(calculation_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/pricing/quote")
        .set_json(&json!({
            "travelDate": "2025-06-24",
            "availableSeats": 1,
            "totalSeats": 30
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_quote_with_huge_base_price() {
    let app = test::init_service(calculation_app()).await;
    let travel_date = (Utc::now() + Duration::days(7)).date_naive();

    let req = test::TestRequest::post()
        .uri("/api/pricing/quote")
        .set_json(&json!({
            "route": test_route(7e28),
            "travelDate": travel_date,
            "availableSeats": 30,
            "totalSeats": 30
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["price"].as_f64().unwrap() > 0.0);
}
