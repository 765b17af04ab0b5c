use axum::http::{self, Request, StatusCode};
use geo_mock_server::{app, app_with, DailyTrivia, LevelProgress, Mistake, Store, User, DEMO_USER_ID};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- health ---

#[tokio::test]
async fn health_reports_healthy() {
    let resp = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

// --- users ---

#[tokio::test]
async fn get_missing_user_returns_detail() {
    let resp = app().oneshot(get("/api/users/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn empty_user_update_is_rejected() {
    let resp = app()
        .oneshot(json_request("PUT", &format!("/api/users/{DEMO_USER_ID}"), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "No fields to update");
}

#[tokio::test]
async fn user_progress_summarizes_levels() {
    let resp = app()
        .oneshot(get(&format!("/api/users/{DEMO_USER_ID}/progress")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["completed_levels"], 1);
    assert_eq!(body["current_level_id"], "level-2");
    assert_eq!(body["total_stars"], 5);
}

// --- trivia ---

#[tokio::test]
async fn today_trivia_prefers_featured_item() {
    let resp = app().oneshot(get("/api/trivia/today")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let trivia: DailyTrivia = body_json(resp).await;
    assert_eq!(trivia.id, "trivia-2");
}

#[tokio::test]
async fn today_trivia_falls_back_to_newest() {
    let mut store = Store::seeded();
    for item in &mut store.trivia {
        item.featured_date = None;
    }
    store.trivia[0].created_at = "2099-01-01T00:00:00+00:00".to_string();
    let resp = app_with(store).oneshot(get("/api/trivia/today")).await.unwrap();
    let trivia: DailyTrivia = body_json(resp).await;
    assert_eq!(trivia.id, "trivia-1");
}

#[tokio::test]
async fn today_trivia_without_content_is_404() {
    let resp = app_with(Store::default()).oneshot(get("/api/trivia/today")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "No trivia available");
}

#[tokio::test]
async fn trivia_list_is_paginated_newest_first() {
    let resp = app().oneshot(get("/api/trivia?limit=1&offset=0")).await.unwrap();
    let items: Vec<DailyTrivia> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "trivia-2");

    let resp = app().oneshot(get("/api/trivia?limit=1&offset=1")).await.unwrap();
    let items: Vec<DailyTrivia> = body_json(resp).await;
    assert_eq!(items[0].id, "trivia-1");
}

// --- levels ---

#[tokio::test]
async fn level_progress_synthesizes_locked_rows() {
    let resp = app()
        .oneshot(get(&format!("/api/levels/user/{DEMO_USER_ID}/progress")))
        .await
        .unwrap();
    let rows: Vec<LevelProgress> = body_json(resp).await;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].status, "completed");
    assert_eq!(rows[0].level_name.as_deref(), Some("Continents and Oceans"));
    assert_eq!(rows[2].status, "locked");
    assert!(rows[2].id.is_none());
    assert_eq!(rows[3].level_order, Some(4));
}

#[tokio::test]
async fn out_of_range_stars_are_422_without_string_detail() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            &format!("/api/levels/user/{DEMO_USER_ID}/progress/level-3"),
            r#"{"stars":5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(resp).await;
    assert!(body["detail"].is_array());
}

// --- mistakes ---

#[tokio::test]
async fn mistakes_filter_by_category_newest_first() {
    let resp = app().oneshot(get("/api/mistakes?category=physical")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Mistake> = body_json(resp).await;
    let ids: Vec<&str> = items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["mistake-4", "mistake-1"]);
}

#[tokio::test]
async fn mistakes_limit_above_cap_is_rejected() {
    let resp = app().oneshot(get("/api/mistakes?limit=500")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_mistake_with_unknown_category_is_rejected() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/mistakes",
            r#"{"user_id":"u1","title":"Capital of Peru","category":"political"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_missing_mistake_is_404() {
    let resp = app()
        .oneshot(Request::builder().method("DELETE").uri("/api/mistakes/nope").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "Mistake not found");
}

// --- geo features and landforms ---

#[tokio::test]
async fn search_decodes_percent_encoded_term() {
    let resp = app()
        .oneshot(get("/api/geo-features/search/amazon%20river?limit=10"))
        .await
        .unwrap();
    let items: Vec<Value> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Amazon River");
}

#[tokio::test]
async fn region_filter_is_case_insensitive_substring() {
    let resp = app().oneshot(get("/api/geo-features?region=asia")).await.unwrap();
    let items: Vec<Value> = body_json(resp).await;
    let names: Vec<&str> = items.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Mount Everest", "Mount Fuji"]);
}

#[tokio::test]
async fn landforms_filter_by_type() {
    let resp = app().oneshot(get("/api/ar-landforms?landform_type=peak")).await.unwrap();
    let items: Vec<Value> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "peak");
}

// --- full progress lifecycle ---

#[tokio::test]
async fn completing_a_level_stamps_time_and_recounts_stars() {
    use tower::Service;

    let mut app = app().into_service();

    // start level 3
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/levels/user/{DEMO_USER_ID}/progress/level-3"),
            r#"{"status":"active"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let started: LevelProgress = body_json(resp).await;
    assert_eq!(started.status, "active");
    assert!(started.completed_at.is_none());
    assert!(started.id.is_some());

    // complete it with two stars
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/levels/user/{DEMO_USER_ID}/progress/level-3"),
            r#"{"status":"completed","score":80,"stars":2,"completion_percentage":100}"#,
        ))
        .await
        .unwrap();
    let completed: LevelProgress = body_json(resp).await;
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.score, 80);
    assert!(completed.completed_at.is_some());

    // user total reflects the new stars
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/users/{DEMO_USER_ID}")))
        .await
        .unwrap();
    let user: User = body_json(resp).await;
    assert_eq!(user.total_stars, 7);

    // delete a mistake, then it is gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().method("DELETE").uri("/api/mistakes/mistake-1").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/mistakes/mistake-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
