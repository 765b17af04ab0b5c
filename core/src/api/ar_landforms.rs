//! `/api/ar-landforms` bindings used by the AR view.

use crate::api::{segment, QueryString};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::{ArLandform, LandformType};

pub fn build_list_landforms(landform_type: Option<LandformType>) -> HttpRequest {
    let mut query = QueryString::default();
    query.push_opt("landform_type", landform_type);
    HttpRequest::get(query.append_to("/api/ar-landforms"))
}

pub fn build_get_landform(landform_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/ar-landforms/{}", segment(landform_id)))
}

pub struct ArLandformsApi<'a> {
    transport: &'a Transport,
}

impl<'a> ArLandformsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list_landforms(&self, landform_type: Option<LandformType>) -> Result<Vec<ArLandform>> {
        self.transport.fetch(build_list_landforms(landform_type)).await
    }

    pub async fn get_landform(&self, landform_id: &str) -> Result<ArLandform> {
        self.transport.fetch(build_get_landform(landform_id)).await
    }
}
