//! Request handlers, one group per resource.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::model::*;
use crate::store::{now, today};
use crate::Db;

/// Error response in the service's `{ "detail": ... }` shape.
pub type Rejection = (StatusCode, Json<Value>);
type Reply<T> = Result<Json<T>, Rejection>;

fn detail(status: StatusCode, message: &str) -> Rejection {
    (status, Json(json!({ "detail": message })))
}

fn not_found(what: &str) -> Rejection {
    detail(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

fn nothing_to_update() -> Rejection {
    detail(StatusCode::BAD_REQUEST, "No fields to update")
}

/// Validation failures carry a list of issues, not a string.
fn invalid(field: &str, message: &str) -> Rejection {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "loc": ["body", field], "msg": message }] })),
    )
}

fn check_literal(field: &str, value: &str, allowed: &[&str]) -> Result<(), Rejection> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("expected one of {}", allowed.join(", "))))
    }
}

fn page<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Reply<User> {
    let store = db.read().await;
    store.user(&id).cloned().map(Json).ok_or_else(|| not_found("User"))
}

pub async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Reply<User> {
    if input.name.is_none() && input.avatar_url.is_none() && input.level.is_none() && input.total_stars.is_none() {
        return Err(nothing_to_update());
    }
    let mut store = db.write().await;
    let user = store.user_mut(&id).ok_or_else(|| not_found("User"))?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(avatar_url) = input.avatar_url {
        user.avatar_url = Some(avatar_url);
    }
    if let Some(level) = input.level {
        user.level = level;
    }
    if let Some(total_stars) = input.total_stars {
        user.total_stars = total_stars;
    }
    Ok(Json(user.clone()))
}

pub async fn get_user_progress(State(db): State<Db>, Path(id): Path<String>) -> Reply<UserProgress> {
    let store = db.read().await;
    let user = store.user(&id).ok_or_else(|| not_found("User"))?;
    let records = store.progress.iter().filter(|p| p.user_id == id);
    let completed_levels = records.clone().filter(|p| p.status == "completed").count() as u32;
    let current_level_id = records
        .clone()
        .find(|p| p.status == "active")
        .map(|p| p.level_id.clone());
    Ok(Json(UserProgress {
        user_id: user.id.clone(),
        total_stars: user.total_stars,
        level: user.level.clone(),
        completed_levels,
        current_level_id,
    }))
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct TriviaQuery {
    #[serde(default = "default_trivia_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_trivia_limit() -> usize {
    20
}

/// Today's featured item, or the newest one when nothing is featured today.
pub async fn get_today_trivia(State(db): State<Db>) -> Reply<DailyTrivia> {
    let store = db.read().await;
    let today = today();
    store
        .trivia
        .iter()
        .find(|t| t.featured_date.as_deref() == Some(today.as_str()))
        .or_else(|| store.trivia.iter().max_by(|a, b| a.created_at.cmp(&b.created_at)))
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "No trivia available"))
}

pub async fn list_trivia(State(db): State<Db>, Query(query): Query<TriviaQuery>) -> Json<Vec<DailyTrivia>> {
    let store = db.read().await;
    let mut items = store.trivia.clone();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(page(items, query.offset, query.limit))
}

pub async fn get_trivia(State(db): State<Db>, Path(id): Path<String>) -> Reply<DailyTrivia> {
    let store = db.read().await;
    store
        .trivia
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Trivia"))
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

pub async fn list_levels(State(db): State<Db>) -> Json<Vec<Level>> {
    let store = db.read().await;
    Json(store.ordered_levels().into_iter().cloned().collect())
}

pub async fn get_level(State(db): State<Db>, Path(id): Path<String>) -> Reply<Level> {
    let store = db.read().await;
    store
        .levels
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Level"))
}

/// Every level joined with the user's record, or a synthesized `locked`
/// record for levels the user has not touched.
pub async fn get_user_level_progress(
    State(db): State<Db>,
    Path(user_id): Path<String>,
) -> Json<Vec<LevelProgress>> {
    let store = db.read().await;
    let rows = store
        .ordered_levels()
        .into_iter()
        .map(|level| {
            let mut row = store.progress_for(&user_id, &level.id).cloned().unwrap_or_else(|| LevelProgress {
                id: None,
                user_id: user_id.clone(),
                level_id: level.id.clone(),
                status: "locked".to_string(),
                score: 0,
                stars: 0,
                completion_percentage: 0,
                completed_at: None,
                level_name: None,
                level_order: None,
            });
            row.level_name = Some(level.name.clone());
            row.level_order = Some(level.order_index);
            row
        })
        .collect();
    Json(rows)
}

pub async fn update_level_progress(
    State(db): State<Db>,
    Path((user_id, level_id)): Path<(String, String)>,
    Json(input): Json<UpdateLevelProgress>,
) -> Reply<LevelProgress> {
    if input.status.is_none() && input.score.is_none() && input.stars.is_none() && input.completion_percentage.is_none() {
        return Err(nothing_to_update());
    }
    if let Some(status) = input.status.as_deref() {
        check_literal("status", status, &LEVEL_STATUSES)?;
    }
    if input.stars.is_some_and(|s| s > 3) {
        return Err(invalid("stars", "must be between 0 and 3"));
    }
    if input.completion_percentage.is_some_and(|c| c > 100) {
        return Err(invalid("completion_percentage", "must be between 0 and 100"));
    }

    let mut store = db.write().await;
    let existing = store
        .progress
        .iter()
        .position(|p| p.user_id == user_id && p.level_id == level_id);
    let index = match existing {
        Some(index) => index,
        None => {
            debug!(%user_id, %level_id, "creating level progress record");
            store.progress.push(LevelProgress {
                id: Some(Uuid::new_v4().to_string()),
                user_id: user_id.clone(),
                level_id: level_id.clone(),
                status: "locked".to_string(),
                score: 0,
                stars: 0,
                completion_percentage: 0,
                completed_at: None,
                level_name: None,
                level_order: None,
            });
            store.progress.len() - 1
        }
    };

    let record = &mut store.progress[index];
    if let Some(status) = input.status {
        if status == "completed" && record.completed_at.is_none() {
            record.completed_at = Some(now());
        }
        record.status = status;
    }
    if let Some(score) = input.score {
        record.score = score;
    }
    if let Some(completion) = input.completion_percentage {
        record.completion_percentage = completion;
    }
    let stars_changed = input.stars.is_some();
    if let Some(stars) = input.stars {
        record.stars = stars;
    }
    let updated = record.clone();

    if stars_changed {
        store.refresh_total_stars(&user_id);
    }
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Mistakes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct MistakeQuery {
    user_id: Option<String>,
    category: Option<String>,
    mastery_level: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

pub async fn list_mistakes(State(db): State<Db>, Query(query): Query<MistakeQuery>) -> Reply<Vec<Mistake>> {
    let limit = query.limit.unwrap_or(50);
    if limit > 100 {
        return Err(invalid("limit", "must be at most 100"));
    }
    let store = db.read().await;
    let mut items: Vec<Mistake> = store
        .mistakes
        .iter()
        .filter(|m| query.user_id.as_ref().map_or(true, |u| &m.user_id == u))
        .filter(|m| query.category.as_ref().map_or(true, |c| &m.category == c))
        .filter(|m| query.mastery_level.as_ref().map_or(true, |l| &m.mastery_level == l))
        .cloned()
        .collect();
    items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    Ok(Json(page(items, query.offset.unwrap_or(0), limit)))
}

pub async fn get_mistake(State(db): State<Db>, Path(id): Path<String>) -> Reply<Mistake> {
    let store = db.read().await;
    store
        .mistakes
        .iter()
        .find(|m| m.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Mistake"))
}

pub async fn create_mistake(
    State(db): State<Db>,
    Json(input): Json<CreateMistake>,
) -> Result<(StatusCode, Json<Mistake>), Rejection> {
    if input.title.trim().is_empty() {
        return Err(invalid("title", "must not be empty"));
    }
    check_literal("category", &input.category, &CATEGORIES)?;
    check_literal("mastery_level", &input.mastery_level, &MASTERY_LEVELS)?;
    let mistake = Mistake {
        id: Uuid::new_v4().to_string(),
        user_id: input.user_id,
        title: input.title,
        question: input.question,
        category: input.category,
        mastery_level: input.mastery_level,
        image_url: input.image_url,
        added_at: now(),
    };
    db.write().await.mistakes.push(mistake.clone());
    Ok((StatusCode::CREATED, Json(mistake)))
}

pub async fn update_mistake(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMistake>,
) -> Reply<Mistake> {
    if input.title.is_none()
        && input.question.is_none()
        && input.category.is_none()
        && input.mastery_level.is_none()
        && input.image_url.is_none()
    {
        return Err(nothing_to_update());
    }
    if let Some(category) = input.category.as_deref() {
        check_literal("category", category, &CATEGORIES)?;
    }
    if let Some(mastery) = input.mastery_level.as_deref() {
        check_literal("mastery_level", mastery, &MASTERY_LEVELS)?;
    }

    let mut store = db.write().await;
    let mistake = store
        .mistakes
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| not_found("Mistake"))?;
    if let Some(title) = input.title {
        mistake.title = title;
    }
    if let Some(question) = input.question {
        mistake.question = Some(question);
    }
    if let Some(category) = input.category {
        mistake.category = category;
    }
    if let Some(mastery) = input.mastery_level {
        mistake.mastery_level = mastery;
    }
    if let Some(image_url) = input.image_url {
        mistake.image_url = Some(image_url);
    }
    Ok(Json(mistake.clone()))
}

pub async fn delete_mistake(State(db): State<Db>, Path(id): Path<String>) -> Reply<Value> {
    let mut store = db.write().await;
    let before = store.mistakes.len();
    store.mistakes.retain(|m| m.id != id);
    if store.mistakes.len() == before {
        return Err(not_found("Mistake"));
    }
    Ok(Json(json!({ "message": "Mistake deleted successfully" })))
}

// ---------------------------------------------------------------------------
// Geographic features
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct FeatureQuery {
    feature_type: Option<String>,
    region: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    limit: Option<usize>,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Type matches exactly; region matches as a case-insensitive substring.
pub async fn list_features(State(db): State<Db>, Query(query): Query<FeatureQuery>) -> Reply<Vec<GeoFeature>> {
    let limit = query.limit.unwrap_or(50);
    if limit > 100 {
        return Err(invalid("limit", "must be at most 100"));
    }
    let store = db.read().await;
    let mut items: Vec<GeoFeature> = store
        .features
        .iter()
        .filter(|f| query.feature_type.as_ref().map_or(true, |t| f.feature_type.as_ref() == Some(t)))
        .filter(|f| query.region.as_deref().map_or(true, |r| contains_ci(f.region.as_deref(), r)))
        .cloned()
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(page(items, query.offset.unwrap_or(0), limit)))
}

pub async fn get_feature(State(db): State<Db>, Path(id): Path<String>) -> Reply<GeoFeature> {
    let store = db.read().await;
    store
        .features
        .iter()
        .find(|f| f.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Geographic feature"))
}

/// Name or description containing the term, case-insensitively.
pub async fn search_features(
    State(db): State<Db>,
    Path(term): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<GeoFeature>> {
    let store = db.read().await;
    let hits = store
        .features
        .iter()
        .filter(|f| contains_ci(Some(f.name.as_str()), &term) || contains_ci(f.description.as_deref(), &term))
        .take(query.limit.unwrap_or(10))
        .cloned()
        .collect();
    Json(hits)
}

// ---------------------------------------------------------------------------
// AR landforms
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LandformQuery {
    landform_type: Option<String>,
}

pub async fn list_landforms(State(db): State<Db>, Query(query): Query<LandformQuery>) -> Json<Vec<ArLandform>> {
    let store = db.read().await;
    let mut items: Vec<ArLandform> = store
        .landforms
        .iter()
        .filter(|l| query.landform_type.as_ref().map_or(true, |t| &l.landform_type == t))
        .cloned()
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Json(items)
}

pub async fn get_landform(State(db): State<Db>, Path(id): Path<String>) -> Reply<ArLandform> {
    let store = db.read().await;
    store
        .landforms
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("AR landform"))
}

