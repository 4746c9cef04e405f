// HTTP tests for fee lookup and payout quotes against the built-in tariff

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, App};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use helpers::TestFixtures;

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .map(|s| s.parse().unwrap())
        .unwrap_or_else(|| value.to_string().parse().unwrap())
}

macro_rules! app {
    () => {{
        let services = TestFixtures::at(Utc.with_ymd_and_hms(2024, 6, 3, 5, 0, 0).unwrap()).services();
        test::init_service(App::new().configure(move |cfg| services.configure(cfg))).await
    }};
}

#[actix_web::test]
async fn test_fee_quote_send_money() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/fees/quote")
        .set_json(json!({ "amount_kes": "300", "channel": "mpesa_send" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["fee"]), Decimal::from(7));
    assert_eq!(body["outcome"]["kind"], "matched");
    assert_eq!(decimal(&body["bracket"]["min_amount"]), Decimal::from(101));
}

#[actix_web::test]
async fn test_fee_quote_accepts_ui_label_and_saturates() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/fees/quote")
        .set_json(json!({ "amount_kes": "300000", "channel": "M-PESA Paybill" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["fee"]), Decimal::from(108));
    assert_eq!(body["outcome"]["kind"], "saturated");
}

#[actix_web::test]
async fn test_fee_quote_between_tiers_is_zero() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/fees/quote")
        .set_json(json!({ "amount_kes": "500.55", "channel": "paybill" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&body["fee"]), Decimal::ZERO);
    assert_eq!(body["outcome"]["kind"], "configuration_gap");
    assert!(body["bracket"].is_null());
}

#[actix_web::test]
async fn test_fee_quote_rejects_bad_input() {
    let app = app!();

    let unknown_channel = test::TestRequest::post()
        .uri("/api/fees/quote")
        .set_json(json!({ "amount_kes": "300", "channel": "bank_transfer" }))
        .to_request();
    let resp = test::call_service(&app, unknown_channel).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");

    let negative = test::TestRequest::post()
        .uri("/api/fees/quote")
        .set_json(json!({ "amount_kes": "-5" }))
        .to_request();
    let resp = test::call_service(&app, negative).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_list_brackets_and_validation() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/fees/paybill").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let brackets = body["brackets"].as_array().unwrap();
    assert_eq!(brackets.len(), 20);
    assert_eq!(body["channel"], "paybill");

    let mins: Vec<Decimal> = brackets.iter().map(|b| decimal(&b["min_amount"])).collect();
    assert!(mins.windows(2).all(|w| w[0] < w[1]));

    let req = test::TestRequest::get().uri("/api/fees/validation").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valid"], true);
    assert!(body["issues"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get().uri("/api/fees/western_union").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_payout_quote() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/payouts/quote")
        .set_json(json!({
            "principal_kd": "10",
            "rate_kes_per_kd": "150",
            "channel": "paybill"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["amount_kes"]), Decimal::from(1500));
    assert_eq!(decimal(&body["fee_kes"]), Decimal::from(15));
    assert_eq!(decimal(&body["payout_kes"]), Decimal::from(1515));
}

#[actix_web::test]
async fn test_payout_quote_with_override_and_invalid_rate() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/payouts/quote")
        .set_json(json!({
            "principal_kd": "10",
            "rate_kes_per_kd": "150",
            "channel": "paybill",
            "fee_override": "0"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(decimal(&body["payout_kes"]), Decimal::from(1500));
    assert!(body["fee_outcome"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/payouts/quote")
        .set_json(json!({ "principal_kd": "10", "rate_kes_per_kd": "0" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_health() {
    let app = app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["fee_brackets"], 35);
}
