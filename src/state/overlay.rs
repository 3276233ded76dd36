//! Detail overlay state machine.
//!
//! Independent of the search session: selecting a result seeds the overlay
//! with the summary already in hand, so there is something to render while
//! the full profile loads. A failed detail fetch keeps the seed and logs;
//! the overlay never shows an error of its own. Closing is a full reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::gateway::UserGateway;
use crate::model::{UserDetail, UserSummary};

/// Overlay state: closed, or open over a (possibly still loading) entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    /// Displayed record: the full profile once loaded, or the summary seed
    /// while loading (and after a failed fetch).
    pub entity: Option<UserDetail>,
    /// Whether the overlay is shown.
    pub is_open: bool,
    /// True while the detail fetch is in flight.
    pub is_loading_detail: bool,
}

impl OverlayState {
    /// Closed, empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open over a summary seed and enter loading.
    pub fn open_with(&mut self, seed: UserSummary) {
        self.entity = Some(UserDetail::from(seed));
        self.is_open = true;
        self.is_loading_detail = true;
    }

    /// Replace the seed with the full profile.
    pub fn resolve(&mut self, detail: UserDetail) {
        self.entity = Some(detail);
        self.is_loading_detail = false;
    }

    /// Keep the seed after a failed fetch; just stop loading.
    pub fn resolve_with_seed(&mut self) {
        self.is_loading_detail = false;
    }

    /// Full reset, independent of any in-flight fetch.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Async controller around [`OverlayState`].
///
/// Re-selections follow the same latest-issued-wins rule as the search
/// session, so a slow response for an earlier selection never rebinds the
/// entity.
pub struct DetailOverlay<G> {
    gateway: G,
    state: Mutex<OverlayState>,
    seq: AtomicU64,
}

impl<G: UserGateway> DetailOverlay<G> {
    /// Create a closed overlay fetching profiles through `gateway`.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(OverlayState::new()),
            seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the overlay state.
    pub fn snapshot(&self) -> OverlayState {
        self.state().clone()
    }

    /// Select a result item: open immediately over the summary, then load
    /// the full profile.
    ///
    /// A fetch failure is recoverable: the overlay keeps the seeded
    /// summary and the failure goes to the log, not the user.
    pub async fn select(&self, user: UserSummary) {
        let login = user.login.clone();
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().open_with(user);
        debug!(login = %login, token, "detail fetch issued");

        let outcome = self.gateway.fetch_user(&login).await;

        let mut state = self.state();
        if token != self.seq.load(Ordering::SeqCst) {
            debug!(token, "discarding superseded detail response");
            return;
        }
        match outcome {
            Ok(detail) => state.resolve(detail),
            Err(error) => {
                warn!(login = %login, %error, "detail fetch failed; keeping summary");
                state.resolve_with_seed();
            }
        }
    }

    /// Close the overlay and discard any in-flight fetch's result.
    pub fn close(&self) {
        // Closing takes a sequence number so a late response cannot reopen
        // the entity binding.
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.state().close();
    }

    fn state(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
