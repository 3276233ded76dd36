//! Search session state machine.
//!
//! [`SessionState`] holds the committed state and its pure transitions;
//! every transition is testable without a runtime. [`SearchSession`] is the
//! async shell that drives transitions around gateway calls and enforces
//! the staleness discipline: each `search` takes the next value of a
//! monotonic sequence counter, and a response commits only if its number is
//! still the latest issued at resolution time. Earlier-issued responses
//! that resolve late are discarded without touching state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::pagination::total_pages;
use crate::gateway::UserGateway;
use crate::model::{FetchError, SearchPage, UserSummary};

/// Committed search-session state.
///
/// Invariants:
/// - `page` is in `[1, max(total_pages, 1)]` for any committed state
/// - `users` and `total_count` always come from the same completed fetch
/// - `total_pages` is derived from `total_count` at commit time
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Last submitted non-empty trimmed query; empty means no active
    /// search.
    pub query: String,
    /// Current page, always >= 1.
    pub page: u32,
    /// Result items for `(query, page)`.
    pub users: Vec<UserSummary>,
    /// Total matches reported by the remote source.
    pub total_count: u32,
    /// Derived page count; 0 when `total_count` is 0.
    pub total_pages: u32,
    /// True strictly between issuing a fetch and its resolution.
    pub is_loading: bool,
    /// Last failure, cleared explicitly or by the next successful search.
    pub error: Option<FetchError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            users: Vec::new(),
            total_count: 0,
            total_pages: 0,
            is_loading: false,
            error: None,
        }
    }
}

impl SessionState {
    /// Idle state: no query, no results, page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous reset to idle. Used for an empty-query submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enter the loading state for a submitted query.
    ///
    /// Records the query immediately so `change_page` targets it, but
    /// leaves page/results untouched until the fetch resolves.
    pub fn begin(&mut self, query: &str) {
        self.query = query.to_string();
        self.is_loading = true;
        self.error = None;
    }

    /// Commit a successful fetch for `page`.
    pub fn commit_success(&mut self, page: u32, result: SearchPage, per_page: u32) {
        self.total_pages = total_pages(result.total_count, per_page);
        self.total_count = result.total_count;
        self.users = result.items;
        self.page = page.max(1);
        self.error = None;
        self.is_loading = false;
    }

    /// Commit a failed fetch. The page is left unchanged; results and
    /// counts are cleared so no stale list outlives its query.
    pub fn commit_failure(&mut self, error: FetchError) {
        self.error = Some(error);
        self.users = Vec::new();
        self.total_count = 0;
        self.total_pages = 0;
        self.is_loading = false;
    }

    /// Clear the error. Idempotent; no other state changes.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Whether `change_page(page)` would do anything: a query must be
    /// active, the target in `[1, total_pages]`, and different from the
    /// current page.
    pub fn can_change_to(&self, page: u32) -> bool {
        !self.query.is_empty() && page >= 1 && page <= self.total_pages && page != self.page
    }
}

/// Async shell around [`SessionState`].
///
/// One logical owner per UI surface. Methods take `&self`; overlapping
/// `search` calls are safe and resolve under the latest-issued-wins rule.
/// The mutex is never held across an await.
pub struct SearchSession<G> {
    gateway: G,
    per_page: u32,
    state: Mutex<SessionState>,
    seq: AtomicU64,
}

impl<G: UserGateway> SearchSession<G> {
    /// Create an idle session fetching `per_page` results per page through
    /// `gateway`.
    pub fn new(gateway: G, per_page: u32) -> Self {
        Self {
            gateway,
            per_page: per_page.max(1),
            state: Mutex::new(SessionState::new()),
            seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the committed state.
    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    /// Submit a search for `query` at `page`.
    ///
    /// An empty trimmed query resets the session synchronously, with no
    /// network call, and supersedes any in-flight request. Otherwise the
    /// session enters loading, fetches, and commits the response only if no
    /// newer `search` was issued meanwhile.
    pub async fn search(&self, query: &str, page: u32) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            // The reset also takes a sequence number so an in-flight
            // response cannot resurrect results after the clear.
            self.seq.fetch_add(1, Ordering::SeqCst);
            self.state().reset();
            return;
        }

        let page = page.max(1);
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().begin(trimmed);
        debug!(query = trimmed, page, token, "search issued");

        let outcome = self.gateway.search_users(trimmed, page).await;

        let mut state = self.state();
        if token != self.seq.load(Ordering::SeqCst) {
            debug!(token, "discarding superseded search response");
            return;
        }
        match outcome {
            Ok(result) => {
                debug!(
                    query = trimmed,
                    page,
                    total_count = result.total_count,
                    "search committed"
                );
                state.commit_success(page, result, self.per_page);
            }
            Err(error) => {
                warn!(query = trimmed, page, %error, "search failed");
                state.commit_failure(error);
            }
        }
    }

    /// Move to `page` within the active query.
    ///
    /// No-op unless a query is active, the target is within
    /// `[1, total_pages]`, and it differs from the current page.
    pub async fn change_page(&self, page: u32) {
        let query = {
            let state = self.state();
            if !state.can_change_to(page) {
                return;
            }
            state.query.clone()
        };
        self.search(&query, page).await;
    }

    /// Dismiss the current error, if any.
    pub fn clear_error(&self) {
        self.state().clear_error();
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means a panic elsewhere mid-transition;
        // the state itself is still a coherent committed value.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
