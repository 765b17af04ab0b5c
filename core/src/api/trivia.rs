//! `/api/trivia` bindings.

use crate::api::{segment, QueryString};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::DailyTrivia;

/// Page of the trivia archive. Both values are always sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriviaPage {
    pub limit: u32,
    pub offset: u32,
}

impl Default for TriviaPage {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

pub fn build_get_today_trivia() -> HttpRequest {
    HttpRequest::get("/api/trivia/today")
}

pub fn build_list_trivia(page: TriviaPage) -> HttpRequest {
    let mut query = QueryString::default();
    query.push("limit", page.limit).push("offset", page.offset);
    HttpRequest::get(query.append_to("/api/trivia"))
}

pub fn build_get_trivia(trivia_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/trivia/{}", segment(trivia_id)))
}

pub struct TriviaApi<'a> {
    transport: &'a Transport,
}

impl<'a> TriviaApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn get_today_trivia(&self) -> Result<DailyTrivia> {
        self.transport.fetch(build_get_today_trivia()).await
    }

    pub async fn list_trivia(&self, page: TriviaPage) -> Result<Vec<DailyTrivia>> {
        self.transport.fetch(build_list_trivia(page)).await
    }

    pub async fn get_trivia(&self, trivia_id: &str) -> Result<DailyTrivia> {
        self.transport.fetch(build_get_trivia(trivia_id)).await
    }
}
