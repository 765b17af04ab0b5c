//! `/api/mistakes` bindings.

use crate::api::{segment, to_json, QueryString};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{DeleteConfirmation, MasteryLevel, Mistake, MistakeCategory, MistakeUpdate, NewMistake};

/// Filters for the mistake list. Every field is optional and only the
/// supplied ones reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MistakeFilter {
    pub user_id: Option<String>,
    pub category: Option<MistakeCategory>,
    pub mastery_level: Option<MasteryLevel>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl MistakeFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: MistakeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn mastery_level(mut self, mastery_level: MasteryLevel) -> Self {
        self.mastery_level = Some(mastery_level);
        self
    }
}

pub fn build_list_mistakes(filter: &MistakeFilter) -> HttpRequest {
    let mut query = QueryString::default();
    query
        .push_opt("user_id", filter.user_id.as_deref())
        .push_opt("category", filter.category)
        .push_opt("mastery_level", filter.mastery_level)
        .push_opt("limit", filter.limit)
        .push_opt("offset", filter.offset);
    HttpRequest::get(query.append_to("/api/mistakes"))
}

pub fn build_get_mistake(mistake_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/mistakes/{}", segment(mistake_id)))
}

pub fn build_create_mistake(input: &NewMistake) -> Result<HttpRequest> {
    Ok(HttpRequest::with_body(HttpMethod::Post, "/api/mistakes", to_json(input)?))
}

pub fn build_update_mistake(mistake_id: &str, update: &MistakeUpdate) -> Result<HttpRequest> {
    Ok(HttpRequest::with_body(
        HttpMethod::Put,
        format!("/api/mistakes/{}", segment(mistake_id)),
        to_json(update)?,
    ))
}

pub fn build_delete_mistake(mistake_id: &str) -> HttpRequest {
    HttpRequest::delete(format!("/api/mistakes/{}", segment(mistake_id)))
}

pub struct MistakesApi<'a> {
    transport: &'a Transport,
}

impl<'a> MistakesApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list_mistakes(&self, filter: &MistakeFilter) -> Result<Vec<Mistake>> {
        self.transport.fetch(build_list_mistakes(filter)).await
    }

    pub async fn get_mistake(&self, mistake_id: &str) -> Result<Mistake> {
        self.transport.fetch(build_get_mistake(mistake_id)).await
    }

    pub async fn create_mistake(&self, input: &NewMistake) -> Result<Mistake> {
        self.transport.fetch(build_create_mistake(input)?).await
    }

    pub async fn update_mistake(&self, mistake_id: &str, update: &MistakeUpdate) -> Result<Mistake> {
        self.transport.fetch(build_update_mistake(mistake_id, update)?).await
    }

    pub async fn delete_mistake(&self, mistake_id: &str) -> Result<DeleteConfirmation> {
        self.transport.fetch(build_delete_mistake(mistake_id)).await
    }
}
