//! # ヘルスチェックの統合テスト
//!
//! `/health`（JSON）と `/status`（プレーンテキスト）が祝日カレンダーの
//! 利用可否を正しく反映することを検証する。

use std::sync::Arc;

use axum::{Router, body::Body};
use chrono::{TimeZone, Utc};
use eigyobi_domain::clock::FixedClock;
use eigyobi_web::{build_app, config::CalendarConfig, state::CalendarStatus};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(calendar: CalendarStatus) -> Router {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap(),
    ));
    build_app(calendar, clock).unwrap()
}

fn available() -> CalendarStatus {
    CalendarStatus::load(&CalendarConfig::default())
}

fn unavailable() -> CalendarStatus {
    CalendarStatus::Unavailable {
        reason: "祝日データが空です".to_string(),
    }
}

async fn get(app: Router, uri: &str) -> http::Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_healthはカレンダー利用可能ならok() {
    let response = get(app_with(available()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "status": "OK",
            "gem_available": true,
            "timestamp": "2024-01-15T10:00:00+09:00"
        })
    );
}

#[tokio::test]
async fn test_healthはカレンダー利用不可ならwarningとメッセージ() {
    let response = get(app_with(unavailable()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "WARNING");
    assert_eq!(body["gem_available"], false);
    assert_eq!(body["timestamp"], "2024-01-15T10:00:00+09:00");
    assert_eq!(
        body["message"],
        "holiday calendar not available: 祝日データが空です"
    );
}

#[tokio::test]
async fn test_statusはカレンダー利用可能ならok() {
    let response = get(app_with(available()), "/status").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_statusはカレンダー利用不可ならgem_unavailable() {
    let response = get(app_with(unavailable()), "/status").await;

    assert_eq!(body_string(response).await, "GEM_UNAVAILABLE");
}

#[tokio::test]
async fn test_入力フォームは今日を既定値にする() {
    let response = get(app_with(available()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"value="2024-01-15""#));
    assert!(html.contains(r#"max="2034-12-31""#));
}
