//! Imperative write actions with their own loading/error state.
//!
//! # Design
//! Mutation controllers never raise: a failed action stores the error in
//! its `MutationState` and returns the failure sentinel (`false` or `None`).
//! They also never touch query controllers. After a success the state records
//! the `ResourceKey` that was written, and it is up to the application layer
//! to refetch whatever queries watch that key.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tracing::warn;

use crate::api::GeoApi;
use crate::error::{ApiError, Result};
use crate::types::{
    LevelProgressUpdate, LevelStatus, MasteryLevel, MistakeUpdate, User, UserLevelProgress,
    UserUpdate,
};

const FAILED_TO_DELETE: &str = "Failed to delete";
const FAILED_TO_UPDATE: &str = "Failed to update";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Resource families the mutation controllers write to.
pub enum ResourceKind {
    User,
    LevelProgress,
    Mistake,
}

/// Identity of a remote resource: its family plus its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceKey {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Level progress is keyed by the `(user, level)` pair.
    pub fn level_progress(user_id: &str, level_id: &str) -> Self {
        Self::new(ResourceKind::LevelProgress, format!("{user_id}/{level_id}"))
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Resource written by the most recent successful action.
    pub last_affected: Option<ResourceKey>,
}

/// Shared loading/error bookkeeping for one set of actions.
#[derive(Clone)]
struct Tracker {
    state: Arc<watch::Sender<MutationState>>,
}

impl Tracker {
    fn new() -> Self {
        let (state, _) = watch::channel(MutationState::default());
        Self {
            state: Arc::new(state),
        }
    }

    async fn run<T, Fut>(&self, fallback: &str, key: ResourceKey, action: Fut) -> Option<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = AssertUnwindSafe(action)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ApiError::Client(fallback.to_string())));

        self.state.send_modify(|state| {
            match &result {
                Ok(_) => state.last_affected = Some(key.clone()),
                Err(error) => {
                    warn!(resource = %key, %error, "mutation failed");
                    state.error = Some(error.clone());
                }
            }
            state.loading = false;
        });
        result.ok()
    }

    fn snapshot(&self) -> MutationState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }
}

macro_rules! state_accessors {
    () => {
        pub fn state(&self) -> MutationState {
            self.tracker.snapshot()
        }

        pub fn subscribe(&self) -> watch::Receiver<MutationState> {
            self.tracker.subscribe()
        }
    };
}

/// Actions on the mistake list.
#[derive(Clone)]
pub struct MistakeActions {
    api: GeoApi,
    tracker: Tracker,
}

impl MistakeActions {
    pub fn new(api: &GeoApi) -> Self {
        Self {
            api: api.clone(),
            tracker: Tracker::new(),
        }
    }

    state_accessors!();

    pub async fn delete_mistake(&self, mistake_id: &str) -> bool {
        let key = ResourceKey::new(ResourceKind::Mistake, mistake_id);
        let action = async { self.api.mistakes().delete_mistake(mistake_id).await };
        self.tracker.run(FAILED_TO_DELETE, key, action).await.is_some()
    }

    pub async fn update_mastery(&self, mistake_id: &str, mastery_level: MasteryLevel) -> bool {
        let key = ResourceKey::new(ResourceKind::Mistake, mistake_id);
        let update = MistakeUpdate {
            mastery_level: Some(mastery_level),
            ..Default::default()
        };
        let action = async { self.api.mistakes().update_mistake(mistake_id, &update).await };
        self.tracker.run(FAILED_TO_UPDATE, key, action).await.is_some()
    }
}

/// Level progress actions for one user.
#[derive(Clone)]
pub struct LevelProgressActions {
    api: GeoApi,
    user_id: String,
    tracker: Tracker,
}

impl LevelProgressActions {
    pub fn new(api: &GeoApi, user_id: impl Into<String>) -> Self {
        Self {
            api: api.clone(),
            user_id: user_id.into(),
            tracker: Tracker::new(),
        }
    }

    state_accessors!();

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Send a partial progress update. The status ordering is left to the
    /// service.
    pub async fn update_progress(
        &self,
        level_id: &str,
        update: LevelProgressUpdate,
    ) -> Option<UserLevelProgress> {
        let key = ResourceKey::level_progress(&self.user_id, level_id);
        let action = async {
            self.api
                .levels()
                .update_level_progress(&self.user_id, level_id, &update)
                .await
        };
        self.tracker.run(FAILED_TO_UPDATE, key, action).await
    }

    pub async fn set_status(&self, level_id: &str, status: LevelStatus) -> Option<UserLevelProgress> {
        let update = LevelProgressUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update_progress(level_id, update).await
    }

    pub async fn complete_level(&self, level_id: &str, score: u32, stars: u32) -> Option<UserLevelProgress> {
        let update = LevelProgressUpdate {
            status: Some(LevelStatus::Completed),
            score: Some(score),
            stars: Some(stars),
            completion_percentage: Some(100),
        };
        self.update_progress(level_id, update).await
    }

    pub async fn start_level(&self, level_id: &str) -> Option<UserLevelProgress> {
        self.set_status(level_id, LevelStatus::Active).await
    }
}

/// Profile edits for one user.
#[derive(Clone)]
pub struct UserActions {
    api: GeoApi,
    user_id: String,
    tracker: Tracker,
}

impl UserActions {
    pub fn new(api: &GeoApi, user_id: impl Into<String>) -> Self {
        Self {
            api: api.clone(),
            user_id: user_id.into(),
            tracker: Tracker::new(),
        }
    }

    state_accessors!();

    pub async fn update_user(&self, update: UserUpdate) -> Option<User> {
        let key = ResourceKey::new(ResourceKind::User, self.user_id.clone());
        let action = async { self.api.users().update_user(&self.user_id, &update).await };
        self.tracker.run(FAILED_TO_UPDATE, key, action).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracker_records_success_key() {
        let tracker = Tracker::new();
        let key = ResourceKey::new(ResourceKind::Mistake, "m1");
        let out = tracker.run(FAILED_TO_DELETE, key.clone(), async { Ok(7) }).await;
        assert_eq!(out, Some(7));
        let state = tracker.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.last_affected, Some(key));
    }

    #[tokio::test]
    async fn tracker_stores_error_without_raising() {
        let tracker = Tracker::new();
        let out: Option<()> = tracker
            .run(
                FAILED_TO_UPDATE,
                ResourceKey::new(ResourceKind::User, "u1"),
                async {
                    Err(ApiError::Remote {
                        status: 400,
                        message: "No fields to update".to_string(),
                    })
                },
            )
            .await;
        assert!(out.is_none());
        let state = tracker.snapshot();
        assert_eq!(state.error.unwrap().message(), "No fields to update");
        assert!(state.last_affected.is_none());
    }

    #[tokio::test]
    async fn panicking_action_uses_fallback_message() {
        let tracker = Tracker::new();
        let out: Option<u8> = tracker
            .run(FAILED_TO_DELETE, ResourceKey::new(ResourceKind::Mistake, "m1"), async {
                let missing: Option<u8> = None;
                Ok(missing.expect("boom"))
            })
            .await;
        assert!(out.is_none());
        assert_eq!(
            tracker.snapshot().error,
            Some(ApiError::Client("Failed to delete".to_string()))
        );
    }

    #[test]
    fn level_progress_key_is_composite() {
        let key = ResourceKey::level_progress("u1", "lv2");
        assert_eq!(key.kind, ResourceKind::LevelProgress);
        assert_eq!(key.id, "u1/lv2");
        assert_eq!(key.to_string(), "LevelProgress:u1/lv2");
    }
}
