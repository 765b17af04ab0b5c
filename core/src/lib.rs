//! Client data-access layer for the GeoExplorer service.
//!
//! # Overview
//! Screens get at remote data through three layers:
//! - `Transport` issues one request against the configured base address and
//!   turns the response into a typed value or an `ApiError`.
//! - `api` holds one binding module per resource family. Each binding builds
//!   an `HttpRequest` and hands it to the transport.
//! - `QueryController` and the mutation controllers wrap those calls in
//!   observable `loading` / `data` / `error` state.
//!
//! # Design
//! - Bindings are pure request builders; the network round trip happens
//!   behind the `HttpExecutor` trait so tests can run the full stack without
//!   a socket.
//! - Nothing is cached or shared between controllers. Each query re-fetches,
//!   and mutations report what they touched instead of invalidating queries.
//! - The default user id is configuration, passed explicitly to every
//!   user-scoped controller.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod mutation;
pub mod queries;
pub mod query;
pub mod transport;
pub mod types;

pub use api::{FeatureFilter, GeoApi, MistakeFilter, TriviaPage};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mutation::{
    LevelProgressActions, MistakeActions, MutationState, ResourceKey, ResourceKind, UserActions,
};
pub use query::{CommitPolicy, QueryController, QueryState};
pub use transport::{HttpExecutor, ReqwestExecutor, Transport};
pub use types::*;
