//! `/api/geo-features` bindings used by the globe view.

use crate::api::{segment, QueryString};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::GeographicFeature;

/// Result cap applied to searches when the caller gives none.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeatureFilter {
    pub feature_type: Option<String>,
    pub region: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub fn build_list_features(filter: &FeatureFilter) -> HttpRequest {
    let mut query = QueryString::default();
    query
        .push_opt("feature_type", filter.feature_type.as_deref())
        .push_opt("region", filter.region.as_deref())
        .push_opt("limit", filter.limit)
        .push_opt("offset", filter.offset);
    HttpRequest::get(query.append_to("/api/geo-features"))
}

pub fn build_get_feature(feature_id: &str) -> HttpRequest {
    HttpRequest::get(format!("/api/geo-features/{}", segment(feature_id)))
}

/// The term travels in the path; the limit is always sent.
pub fn build_search_features(term: &str, limit: Option<u32>) -> HttpRequest {
    let mut query = QueryString::default();
    query.push("limit", limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
    HttpRequest::get(query.append_to(&format!("/api/geo-features/search/{}", segment(term))))
}

pub struct GeoFeaturesApi<'a> {
    transport: &'a Transport,
}

impl<'a> GeoFeaturesApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list_features(&self, filter: &FeatureFilter) -> Result<Vec<GeographicFeature>> {
        self.transport.fetch(build_list_features(filter)).await
    }

    pub async fn get_feature(&self, feature_id: &str) -> Result<GeographicFeature> {
        self.transport.fetch(build_get_feature(feature_id)).await
    }

    pub async fn search_features(&self, term: &str, limit: Option<u32>) -> Result<Vec<GeographicFeature>> {
        self.transport.fetch(build_search_features(term, limit)).await
    }
}
