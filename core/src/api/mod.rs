//! Resource bindings for the GeoExplorer service.
//!
//! # Design
//! Each submodule owns one resource family and exposes `build_*` functions:
//! pure mappings from parameters to an `HttpRequest` with a path relative to
//! the service root. `GeoApi` pairs those builders with a `Transport`, one
//! accessor per family (`api.mistakes().delete_mistake(id)`). Bindings never
//! catch errors; whatever the transport returns reaches the caller as is.

pub mod ar_landforms;
pub mod geo_features;
pub mod levels;
pub mod mistakes;
pub mod system;
pub mod trivia;
pub mod users;

use crate::config::ClientConfig;
use crate::transport::Transport;

pub use ar_landforms::ArLandformsApi;
pub use geo_features::{FeatureFilter, GeoFeaturesApi};
pub use levels::LevelsApi;
pub use mistakes::{MistakeFilter, MistakesApi};
pub use system::SystemApi;
pub use trivia::{TriviaApi, TriviaPage};
pub use users::UsersApi;

/// Entry point to every resource binding.
///
/// Cheap to clone; clones share the underlying executor.
#[derive(Debug, Clone)]
pub struct GeoApi {
    transport: Transport,
}

impl GeoApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Transport::new(&config.base_url))
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.transport)
    }

    pub fn trivia(&self) -> TriviaApi<'_> {
        TriviaApi::new(&self.transport)
    }

    pub fn levels(&self) -> LevelsApi<'_> {
        LevelsApi::new(&self.transport)
    }

    pub fn mistakes(&self) -> MistakesApi<'_> {
        MistakesApi::new(&self.transport)
    }

    pub fn geo_features(&self) -> GeoFeaturesApi<'_> {
        GeoFeaturesApi::new(&self.transport)
    }

    pub fn ar_landforms(&self) -> ArLandformsApi<'_> {
        ArLandformsApi::new(&self.transport)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(&self.transport)
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Serialize a request payload, mapping failures to `ApiError::Serialization`.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> crate::error::Result<String> {
    serde_json::to_string(value).map_err(|e| crate::error::ApiError::Serialization(e.to_string()))
}

/// Query string made only of the parameters that were supplied.
#[derive(Debug, Default)]
pub(crate) struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub(crate) fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Pushes `value` unless it is absent or renders as an empty string.
    pub(crate) fn push_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value.map(|v| v.to_string()).filter(|v| !v.is_empty()) {
            self.push(key, value);
        }
        self
    }

    /// `path` followed by `?k=v&...`, or `path` alone when nothing was pushed.
    pub(crate) fn append_to(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}
