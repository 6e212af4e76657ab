mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{cheerios_usda, tylenol_fda, Harness, MockFda, MockLlm, MockUsda};
use product_insight::api::create_api;

fn app(harness: Harness) -> Router {
    create_api(Arc::new(harness.pipeline), "mock-model".to_string())
}

async fn post_main(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/main")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn food_lookup_returns_full_payload() {
    let harness = Harness::new(&[("016000141544", "Cheerios")], cheerios_usda(), MockFda::default(), MockLlm::default());

    let (status, body) = post_main(app(harness), json!({ "input": "016000141544" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_title"], "Cheerios");
    assert_eq!(body["record_kind"], "food");
    assert!(body["nutrition_info"].as_str().unwrap().starts_with("Food Title: Cheerios"));
    assert_eq!(body["record"]["kind"], "nutrition");
    assert_eq!(body["rating"], "4.5 - Looks Good");
    assert_eq!(body["rating_score"], 4.5);
    assert_eq!(body["pros"], json!(["Tasty"]));
    assert_eq!(body["cons"], json!(["Sugary"]));
    assert_eq!(body["analysis_failed"], false);
}

#[tokio::test]
async fn code_alias_and_medicine_kind() {
    let harness = Harness::new(&[("42", "TYLENOL PM")], MockUsda::default(), tylenol_fda(), MockLlm::default());

    let (status, body) = post_main(app(harness), json!({ "code": "42" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_kind"], "medicine");
    assert!(body["nutrition_info"].as_str().unwrap().starts_with("Brand: TYLENOL PM"));
}

#[tokio::test]
async fn unresolved_code_is_a_typed_404() {
    let harness = Harness::new(&[], cheerios_usda(), MockFda::default(), MockLlm::default());

    let (status, body) = post_main(app(harness), json!({ "input": "000" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["lookup"], "identity");
}

#[tokio::test]
async fn exhausted_sources_report_source_lookup() {
    let harness = Harness::new(&[("7", "Widget")], MockUsda::default(), MockFda::default(), MockLlm::default());

    let (status, body) = post_main(app(harness), json!({ "input": "7" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["lookup"], "source");
}

#[tokio::test]
async fn upstream_outage_is_a_bad_gateway() {
    let harness = Harness::new(
        &[("016000141544", "Cheerios")],
        MockUsda { fail_search: true, ..Default::default() },
        MockFda::default(),
        MockLlm::default(),
    );

    let (status, body) = post_main(app(harness), json!({ "input": "016000141544" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_failure");
}

#[tokio::test]
async fn failed_analysis_still_returns_record() {
    let harness = Harness::new(
        &[("016000141544", "Cheerios")],
        cheerios_usda(),
        MockFda::default(),
        MockLlm { fail: true, ..Default::default() },
    );

    let (status, body) = post_main(app(harness), json!({ "input": "016000141544" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis_failed"], true);
    assert!(body["analysis"].is_null());
    assert!(body["analysis_error"].as_str().unwrap().contains("service unavailable"));
    assert!(body["nutrition_info"].as_str().unwrap().starts_with("Food Title: Cheerios"));
}

#[tokio::test]
async fn blank_or_missing_input_is_rejected() {
    let harness = Harness::new(&[], MockUsda::default(), MockFda::default(), MockLlm::default());
    let router = app(harness);

    let (status, body) = post_main(router.clone(), json!({ "input": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_request");

    let (status, _) = post_main(router, json!({ "barcode": "123" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_reports_model() {
    let harness = Harness::new(&[], MockUsda::default(), MockFda::default(), MockLlm::default());

    let response = app(harness)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok", "model": "mock-model" }));
}
