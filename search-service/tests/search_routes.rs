use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use scan_search::config::ServiceConfig;
use scan_search::routes::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(&ServiceConfig::default())
}

async fn post_search(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn status_reports_running() {
    let response = app()
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"service": "search-service", "status": "running"}));
}

#[tokio::test]
async fn search_returns_matches_in_order() {
    let request = json!({
        "searchTerm": "the",
        "books": [
            {
                "identifier": "9780000528531",
                "title": "Twenty Thousand Leagues Under the Sea",
                "content": [
                    {"page": 31, "line": 8, "text": "now simply went on by her own momentum.  The dark-"},
                    {"page": 31, "line": 9, "text": "ness was then profound; and however good the Canadian's"}
                ]
            },
            {
                "identifier": "1",
                "title": "Fake Book",
                "content": [{"page": 1, "line": 1, "text": "the"}]
            }
        ]
    });

    let (status, body) = post_search(app(), request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "searchTerm": "the",
            "results": [
                {"identifier": "9780000528531", "page": 31, "line": 9},
                {"identifier": "1", "page": 1, "line": 1}
            ]
        })
    );
}

#[tokio::test]
async fn search_with_null_inputs_returns_empty_results() {
    let (status, body) =
        post_search(app(), json!({"searchTerm": null, "books": null}).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"searchTerm": null, "results": []}));
}

#[tokio::test]
async fn search_with_missing_fields_echoes_null() {
    let (status, body) = post_search(app(), "{}".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"searchTerm": null, "results": []}));
}

#[tokio::test]
async fn search_accepts_isbn_style_keys() {
    let request = json!({
        "SearchTerm": "Canadian",
        "books": [{
            "ISBN": "9780000528531",
            "Title": "Twenty Thousand Leagues Under the Sea",
            "Content": [{"Page": 31, "Line": 9, "Text": "however good the Canadian's"}]
        }]
    });

    let (status, body) = post_search(app(), request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searchTerm"], json!("Canadian"));
    assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn search_with_malformed_record_is_unprocessable() {
    let request = json!({
        "searchTerm": "the",
        "books": [{"identifier": "1", "title": "No content"}]
    });

    let (status, _) = post_search(app(), request.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_rejects_body_over_limit() {
    let config = ServiceConfig {
        max_body_bytes: 16,
        ..ServiceConfig::default()
    };
    let request = json!({"searchTerm": "the", "books": []}).to_string();
    assert!(request.len() > 16);

    let (status, _) = post_search(build_router(&config), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
