mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{crop_body, fertilizer_body, irrigation_body, shipped_models};
use growwell::{create_router, AppState, ModelSet};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::ServiceExt; // for oneshot

fn app() -> Router {
    let models = ModelSet::load(&shipped_models());
    assert!(models.failures.is_empty());
    create_router(AppState::from_models(&models))
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

async fn post(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, json_response(response).await)
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_response(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_limits_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/limits").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_response(response).await;
    assert_eq!(body.as_object().unwrap().len(), 9);
    assert_eq!(body["n"], json!({"min": 0.0, "max": 200.0}));
    assert_eq!(body["ph"], json!({"min": 3.5, "max": 10.0}));
    assert_eq!(body["farm_area"]["min"], json!(0.1));
}

#[tokio::test]
async fn test_crop_recommend() {
    let (status, body) = post(app(), "/crop/recommend", &crop_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("rice"));
}

#[tokio::test]
async fn test_fertilizer_recommend() {
    let (status, body) = post(app(), "/fertilizer/recommend", &fertilizer_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"fertilizer": "DAP"}));
}

#[tokio::test]
async fn test_irrigation_predict_is_rounded() {
    let (status, body) = post(app(), "/irrigation/predict", &irrigation_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(566.38));

    let mut kharif = irrigation_body();
    kharif["Season"] = json!("Kharif");
    let (_, body) = post(app(), "/irrigation/predict", &kharif).await;
    assert_eq!(body, json!(406.38));
}

#[tokio::test]
async fn test_out_of_bounds_is_rejected_at_boundary() {
    let mut body = crop_body();
    body["N"] = json!(250);
    let (status, body) = post(app(), "/crop/recommend", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"detail": [{
            "loc": ["body", "N"],
            "msg": "Input should be less than or equal to 200",
            "type": "less_than_equal"
        }]})
    );
}

#[tokio::test]
async fn test_missing_and_malformed_fields() {
    let mut body = fertilizer_body();
    body.as_object_mut().unwrap().remove("Moisture");
    let (status, body) = post(app(), "/fertilizer/recommend", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "Moisture"]));
    assert_eq!(body["detail"][0]["type"], json!("missing"));

    let mut body = irrigation_body();
    body["Farm_Area"] = json!("large");
    let (status, body) = post(app(), "/irrigation/predict", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_array());

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/crop/recommend")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_response(response).await;
    assert_eq!(body["detail"][0]["type"], json!("json_invalid"));
}

#[tokio::test]
async fn test_inference_failure_is_reported_in_body() {
    let mut body = irrigation_body();
    body["Region"] = json!("Antarctica");
    let (status, body) = post(app(), "/irrigation/predict", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "Irrigation prediction failed: unknown category 'Antarctica' for feature column 'Region'"})
    );
}

#[tokio::test]
async fn test_failed_model_disables_its_routes() {
    let mut paths = shipped_models();
    paths.fertilizer = PathBuf::from("/missing/fertilizer.json");
    let models = ModelSet::load(&paths).ensure_servable(false).unwrap();
    let app = create_router(AppState::from_models(&models));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/fertilizer/recommend")
                .header("content-type", "application/json")
                .body(Body::from(fertilizer_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, body) = post(app, "/crop/recommend", &crop_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("rice"));
}

#[tokio::test]
async fn test_concurrent_requests_share_models() {
    let app = app();
    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post(app, "/crop/recommend", &crop_body()).await
        }));
    }
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("rice"));
    }
}
