// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cached query results.
//!
//! A [`Query`] holds the last fetched value for a single [`QueryKey`]
//! and deduplicates concurrent fetches. Invalidating a query marks its
//! value as stale. The value remains readable until the next fetch has
//! finished.

use std::{collections::HashMap, fmt, future::Future, sync::Arc};

use discro::{Publisher, Ref, Subscriber};
use parking_lot::Mutex;
use smol_str::SmolStr;

use crate::{
    Error, Result,
    scope::ViewScope,
    util::{
        remote::DataSnapshot,
        roundtrip::{Generation, PendingToken, Watermark},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(SmolStr);

impl QueryKey {
    #[must_use]
    pub const fn new_static(key: &'static str) -> Self {
        Self(SmolStr::new_static(key))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub enum FetchState<T> {
    Initial,
    Pending {
        fetched_before: Option<DataSnapshot<T>>,
    },
    Ready {
        fetched: DataSnapshot<T>,
    },
    Failed {
        fetched_before: Option<DataSnapshot<T>>,
        err_msg: String,
    },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Initial
    }
}

impl<T> FetchState<T> {
    #[must_use]
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    #[must_use]
    pub fn last_snapshot(&self) -> Option<&DataSnapshot<T>> {
        match self {
            Self::Initial => None,
            Self::Ready { fetched } => Some(fetched),
            Self::Pending { fetched_before } | Self::Failed { fetched_before, .. } => {
                fetched_before.as_ref()
            }
        }
    }

    #[must_use]
    pub fn err_msg(&self) -> Option<&str> {
        match self {
            Self::Failed { err_msg, .. } => Some(err_msg),
            Self::Initial | Self::Pending { .. } | Self::Ready { .. } => None,
        }
    }

    fn take_last_snapshot(&mut self) -> Option<DataSnapshot<T>> {
        match std::mem::take(self) {
            Self::Initial => None,
            Self::Ready { fetched } => Some(fetched),
            Self::Pending { fetched_before } | Self::Failed { fetched_before, .. } => {
                fetched_before
            }
        }
    }

    fn start_pending(&mut self) {
        let fetched_before = self.take_last_snapshot();
        *self = Self::Pending { fetched_before };
    }

    fn fetch_succeeded(&mut self, fetched: DataSnapshot<T>) {
        debug_assert!(self.is_pending());
        *self = Self::Ready { fetched };
    }

    fn fetch_failed(&mut self, err_msg: String) {
        debug_assert!(self.is_pending());
        let fetched_before = self.take_last_snapshot();
        *self = Self::Failed {
            fetched_before,
            err_msg,
        };
    }

    /// Discards the previous error if any.
    fn abort_pending(&mut self) {
        debug_assert!(self.is_pending());
        *self = match self.take_last_snapshot() {
            Some(fetched) => Self::Ready { fetched },
            None => Self::Initial,
        };
    }
}

/// Observable state of a [`Query`].
#[derive(Debug)]
pub struct QueryState<T> {
    fetch: FetchState<T>,
    watermark: Watermark,
    generation: Generation,
    fetched_generation: Option<Generation>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            fetch: FetchState::Initial,
            watermark: Watermark::new(),
            generation: Generation::initial(),
            fetched_generation: None,
        }
    }
}

impl<T> QueryState<T> {
    #[must_use]
    pub fn fetch(&self) -> &FetchState<T> {
        &self.fetch
    }

    /// Pending without any value to display.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_pending() && self.fetch.last_snapshot().is_none()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.watermark.is_pending()
    }

    #[must_use]
    pub fn last_snapshot(&self) -> Option<&DataSnapshot<T>> {
        self.fetch.last_snapshot()
    }

    #[must_use]
    pub fn last_value(&self) -> Option<&T> {
        self.last_snapshot().map(|snapshot| &snapshot.value)
    }

    #[must_use]
    pub fn err_msg(&self) -> Option<&str> {
        self.fetch.err_msg()
    }

    /// The last value has been invalidated after its fetch was started.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.fetched_generation
            .is_some_and(|fetched_generation| fetched_generation != self.generation)
    }

    #[must_use]
    pub fn should_fetch(&self) -> bool {
        if self.is_pending() {
            return false;
        }
        match self.fetch {
            FetchState::Initial | FetchState::Failed { .. } => true,
            FetchState::Ready { .. } => self.is_stale(),
            FetchState::Pending { .. } => false,
        }
    }

    /// Mark the current value as stale.
    ///
    /// Values of fetches that are currently pending will be stale
    /// when finished.
    pub fn invalidate(&mut self) -> bool {
        if self.fetch.is_initial() && !self.is_pending() {
            return false;
        }
        self.generation.bump();
        true
    }

    /// Start fetching unless a fetch is already pending.
    pub fn start_pending(&mut self) -> Option<PendingToken> {
        if self.is_pending() {
            return None;
        }
        let token = self.watermark.start_pending(self.generation);
        self.fetch.start_pending();
        Some(token)
    }

    /// Start fetching if needed.
    pub fn start_pending_if_needed(&mut self) -> Option<PendingToken> {
        if !self.should_fetch() {
            return None;
        }
        self.start_pending()
    }

    /// Finish the pending fetch.
    ///
    /// Returns `false` if the token has been rejected.
    pub fn finish_pending(
        &mut self,
        token: PendingToken,
        result: std::result::Result<T, String>,
    ) -> bool {
        if !self.watermark.finish_pending(token) {
            log::debug!("Discarding result of outdated fetch");
            return false;
        }
        match result {
            Ok(value) => {
                self.fetch.fetch_succeeded(DataSnapshot::now(value));
                self.fetched_generation = Some(token.generation());
            }
            Err(err_msg) => {
                self.fetch.fetch_failed(err_msg);
            }
        }
        true
    }

    /// Abort the pending fetch and restore the last value.
    pub fn abort_pending(&mut self, token: PendingToken) -> bool {
        if !self.watermark.finish_pending(token) {
            return false;
        }
        self.fetch.abort_pending();
        true
    }
}

/// Aborts the pending fetch when dropped before finishing.
struct PendingFetch<'a, T> {
    query: &'a Query<T>,
    token: Option<PendingToken>,
}

impl<T> PendingFetch<'_, T> {
    fn finish(mut self, result: std::result::Result<T, String>) {
        if let Some(token) = self.token.take() {
            self.query
                .state
                .modify(|state| state.finish_pending(token, result));
        }
    }
}

impl<T> Drop for PendingFetch<'_, T> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            log::debug!("Aborting pending fetch of {}", self.query.key);
            self.query
                .state
                .modify(|state| state.abort_pending(token));
        }
    }
}

/// A cached and observable query result.
#[derive(Debug)]
pub struct Query<T> {
    key: QueryKey,
    state: Publisher<QueryState<T>>,
}

impl<T> Query<T> {
    #[must_use]
    pub fn new(key: QueryKey) -> Self {
        Self {
            key,
            state: Publisher::new(QueryState::default()),
        }
    }

    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    #[must_use]
    pub fn read(&self) -> Ref<'_, QueryState<T>> {
        self.state.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<QueryState<T>> {
        self.state.subscribe_changed()
    }

    #[allow(clippy::must_use_candidate)]
    pub fn invalidate(&self) -> bool {
        let invalidated = self.state.modify(QueryState::invalidate);
        if invalidated {
            log::debug!("Invalidated {}", self.key);
        }
        invalidated
    }

    /// Ensure that the state is neither initial nor stale.
    ///
    /// Starts a new fetch if needed or waits for a pending fetch to
    /// finish. Fetch errors are stored in the state and shared with
    /// all waiters. Returns an error only if the scope has been
    /// cancelled.
    pub async fn fetch_fresh<F, R>(&self, scope: &ViewScope, mut fetch: F) -> Result<()>
    where
        F: FnMut() -> R,
        R: Future<Output = Result<T>>,
    {
        let mut state_sub = self.state.subscribe();
        let mut awaited = false;
        loop {
            if awaited && self.read().fetch().is_failed() {
                // Share the outcome of the awaited fetch
                return Ok(());
            }
            let mut token = None;
            self.state.modify(|state| {
                token = state.start_pending_if_needed();
                token.is_some()
            });
            if let Some(token) = token {
                log::debug!("Fetching {}", self.key);
                let pending = PendingFetch {
                    query: self,
                    token: Some(token),
                };
                match scope.run(fetch()).await {
                    Ok(value) => pending.finish(Ok(value)),
                    Err(Error::Cancelled) => {
                        // Dropping the pending fetch aborts it
                        return Err(Error::Cancelled);
                    }
                    Err(err) => {
                        log::warn!("Failed to fetch {}: {err}", self.key);
                        pending.finish(Err(err.to_string()));
                    }
                }
                return Ok(());
            }
            let (should_fetch, is_pending) = {
                let state = state_sub.read_ack();
                (state.should_fetch(), state.is_pending())
            };
            if should_fetch {
                continue;
            }
            if !is_pending {
                return Ok(());
            }
            log::debug!("Awaiting pending fetch of {}", self.key);
            awaited = true;
            let changed = scope.run(async { Ok(state_sub.changed().await) }).await?;
            if changed.is_err() {
                // Unreachable while borrowing the publisher
                return Ok(());
            }
        }
    }
}

/// Owns all queries, one per key.
#[derive(Debug)]
pub struct QueryClient<T> {
    queries: Mutex<HashMap<QueryKey, Arc<Query<T>>>>,
}

impl<T> Default for QueryClient<T> {
    fn default() -> Self {
        Self {
            queries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> QueryClient<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the query for the given key.
    #[must_use]
    pub fn query(&self, key: &QueryKey) -> Arc<Query<T>> {
        let mut queries = self.queries.lock();
        if let Some(query) = queries.get(key) {
            return Arc::clone(query);
        }
        let query = Arc::new(Query::new(key.clone()));
        queries.insert(key.clone(), Arc::clone(&query));
        query
    }

    /// Returns `false` if the key is unknown or nothing
    /// has been fetched yet.
    #[allow(clippy::must_use_candidate)]
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let query = self.queries.lock().get(key).map(Arc::clone);
        query.is_some_and(|query| query.invalidate())
    }

    pub fn invalidate_all(&self) {
        let queries = self.queries.lock().values().map(Arc::clone).collect::<Vec<_>>();
        for query in queries {
            query.invalidate();
        }
    }
}
