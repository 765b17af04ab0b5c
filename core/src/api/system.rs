//! Service liveness probe.

use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::HealthStatus;

pub fn build_health() -> HttpRequest {
    HttpRequest::get("/health")
}

pub struct SystemApi<'a> {
    transport: &'a Transport,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.transport.fetch(build_health()).await
    }
}
