//! `/api/levels` bindings, including per-user level progress.

use crate::api::{segment, to_json};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{Level, LevelProgressUpdate, UserLevelProgress};

pub fn build_list_levels() -> HttpRequest {
    HttpRequest::get("/api/levels")
}

pub fn build_get_level(level_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/levels/{}", segment(level_id)))
}

pub fn build_get_user_level_progress(user_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/levels/user/{}/progress", segment(user_id)))
}

pub fn build_update_level_progress(
    user_id: &str,
    level_id: &str,
    update: &LevelProgressUpdate,
) -> Result<HttpRequest> {
    Ok(HttpRequest::with_body(
        HttpMethod::Put,
        format!(
            "/api/levels/user/{}/progress/{}",
            segment(user_id),
            segment(level_id)
        ),
        to_json(update)?,
    ))
}

pub struct LevelsApi<'a> {
    transport: &'a Transport,
}

impl<'a> LevelsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// All levels in the service's `order_index` order.
    pub async fn list_levels(&self) -> Result<Vec<Level>> {
        self.transport.fetch(build_list_levels()).await
    }

    pub async fn get_level(&self, level_id: &str) -> Result<Level> {
        self.transport.fetch(build_get_level(level_id)).await
    }

    pub async fn get_user_level_progress(&self, user_id: &str) -> Result<Vec<UserLevelProgress>> {
        self.transport.fetch(build_get_user_level_progress(user_id)).await
    }

    pub async fn update_level_progress(
        &self,
        user_id: &str,
        level_id: &str,
        update: &LevelProgressUpdate,
    ) -> Result<UserLevelProgress> {
        self.transport
            .fetch(build_update_level_progress(user_id, level_id, update)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LevelStatus;

    #[test]
    fn update_progress_targets_composite_key() {
        let update = LevelProgressUpdate {
            status: Some(LevelStatus::Active),
            ..Default::default()
        };
        let req = build_update_level_progress("u1", "lv3", &update).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "/api/levels/user/u1/progress/lv3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "active" }));
    }
}
