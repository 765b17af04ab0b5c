//! `/api/users` bindings.

use crate::api::{segment, to_json};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{User, UserProgress, UserUpdate};

pub fn build_get_user(user_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/users/{}", segment(user_id)))
}

pub fn build_update_user(user_id: &str, update: &UserUpdate) -> Result<HttpRequest> {
    Ok(HttpRequest::with_body(
        HttpMethod::Put,
        format!("/api/users/{}", segment(user_id)),
        to_json(update)?,
    ))
}

pub fn build_get_user_progress(user_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/users/{}/progress", segment(user_id)))
}

pub struct UsersApi<'a> {
    transport: &'a Transport,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.transport.fetch(build_get_user(user_id)).await
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        self.transport.fetch(build_update_user(user_id, update)?).await
    }

    pub async fn get_user_progress(&self, user_id: &str) -> Result<UserProgress> {
        self.transport.fetch(build_get_user_progress(user_id)).await
    }
}
