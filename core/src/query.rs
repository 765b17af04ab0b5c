//! Observable tri-state wrapper around a fetch.
//!
//! # Design
//! A `QueryController` owns a fetch factory and its current dependency value.
//! Each fetch cycle flips `loading` on, clears `error`, awaits the fetch, then
//! commits either `data` or `error` and flips `loading` off. State lives in a
//! `tokio::sync::watch` channel so any number of observers can follow it.
//!
//! Superseded fetches are never cancelled. Which settled fetch may commit is
//! decided by the `CommitPolicy`: with `LatestIssued` every cycle takes a
//! generation token and only the newest token commits; `LastSettled` lets
//! whichever fetch finishes last overwrite the state.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{ApiError, Result, UNKNOWN_ERROR};

/// Which settled fetch is allowed to write the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Only the most recently issued fetch commits; older results are dropped.
    #[default]
    LatestIssued,
    /// Every fetch commits when it settles, so the last to settle wins.
    LastSettled,
}

/// Snapshot of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

type FetchFn<D, T> = dyn Fn(D) -> BoxFuture<'static, Result<T>> + Send + Sync;

struct Inner<D, T> {
    fetch: Box<FetchFn<D, T>>,
    deps: watch::Sender<D>,
    state: watch::Sender<QueryState<T>>,
    generation: AtomicU64,
    policy: CommitPolicy,
}

/// Reactive query over a fetch parameterized by dependencies `D`.
///
/// Dependencies compare by value; a tuple of several values compares element
/// by element. Clones share state.
pub struct QueryController<D, T> {
    inner: Arc<Inner<D, T>>,
}

impl<D, T> Clone for QueryController<D, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D, T> QueryController<D, T>
where
    D: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(deps: D, fetch: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::with_policy(deps, CommitPolicy::default(), fetch)
    }

    pub fn with_policy<F, Fut>(deps: D, policy: CommitPolicy, fetch: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (deps, _) = watch::channel(deps);
        let (state, _) = watch::channel(QueryState::default());
        Self {
            inner: Arc::new(Inner {
                fetch: Box::new(move |d| fetch(d).boxed()),
                deps,
                state,
                generation: AtomicU64::new(0),
                policy,
            }),
        }
    }

    /// Run the first fetch cycle.
    pub async fn activate(&self) {
        self.refetch().await;
    }

    /// Repeat the fetch with the current dependencies.
    pub async fn refetch(&self) {
        let deps = self.inner.deps.borrow().clone();
        self.run_cycle(deps).await;
    }

    /// Replace the dependencies. Runs one fetch cycle and returns `true` when
    /// the new value differs from the current one; otherwise does nothing.
    pub async fn set_deps(&self, deps: D) -> bool {
        let changed = self.inner.deps.send_if_modified(|current| {
            if *current == deps {
                return false;
            }
            *current = deps.clone();
            true
        });
        if changed {
            self.run_cycle(deps).await;
        }
        changed
    }

    pub fn deps(&self) -> D {
        self.inner.deps.borrow().clone()
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.inner.state.subscribe()
    }

    pub fn policy(&self) -> CommitPolicy {
        self.inner.policy
    }

    async fn run_cycle(&self, deps: D) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let fetch = async { (self.inner.fetch)(deps).await };
        let result = AssertUnwindSafe(fetch)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ApiError::Client(UNKNOWN_ERROR.to_string())));

        if self.inner.policy == CommitPolicy::LatestIssued {
            let latest = self.inner.generation.load(Ordering::SeqCst);
            if generation != latest {
                debug!(generation, latest, "discarding stale query result");
                return;
            }
        }

        self.inner.state.send_modify(|state| {
            match result {
                Ok(data) => state.data = Some(data),
                Err(error) => state.error = Some(error),
            }
            state.loading = false;
        });
    }
}
