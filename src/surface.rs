//! Search surface integration.
//!
//! Wires the search session, the URL synchronization controller, and the
//! detail overlay behind a [`Navigator`], mirroring what a rendering layer
//! needs: submit a search, move pages, react to location changes, select a
//! result. The surface owns one of each piece; views render from the
//! snapshots it exposes.

use std::sync::Arc;

use crate::gateway::UserGateway;
use crate::location::sync::{NavId, SyncAction, SyncController};
use crate::model::UserSummary;
use crate::state::{DetailOverlay, OverlayState, SearchSession, SessionState};

/// Sink for outbound location changes.
///
/// Implementations push without scrolling or otherwise disturbing the
/// viewport, and report observed location changes (including the echoes of
/// their own pushes) back to [`SearchSurface::handle_location_change`] with
/// the tag they were pushed with.
pub trait Navigator {
    /// Push `location` as a new history entry, tagged with `nav`.
    fn push(&mut self, location: &str, nav: NavId);

    /// Replace the current history entry with `location`, tagged with
    /// `nav`. Used for canonicalization redirects.
    fn replace(&mut self, location: &str, nav: NavId);
}

/// One search UI surface: session + overlay + URL sync over a shared
/// gateway.
pub struct SearchSurface<G, N> {
    session: SearchSession<Arc<G>>,
    overlay: DetailOverlay<Arc<G>>,
    sync: SyncController,
    navigator: N,
}

impl<G: UserGateway, N: Navigator> SearchSurface<G, N> {
    /// Create a surface over `gateway`, fetching `per_page` results per
    /// page and pushing location changes through `navigator`.
    pub fn new(gateway: G, per_page: u32, navigator: N) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            session: SearchSession::new(Arc::clone(&gateway), per_page),
            overlay: DetailOverlay::new(gateway),
            sync: SyncController::new(),
            navigator,
        }
    }

    /// Process the location present at mount time.
    ///
    /// Issues exactly one initial fetch if the location encodes a query;
    /// later observations of the same location are deduplicated.
    pub async fn mount(&mut self, location: &str) {
        self.handle_location_change(location, None).await;
    }

    /// React to an observed location change.
    ///
    /// `nav` is the tag the change carries when it is the echo of a push
    /// this surface made; browser back/forward and external links carry
    /// `None`.
    pub async fn handle_location_change(&mut self, location: &str, nav: Option<NavId>) {
        let Some(action) = self.sync.observe(location, nav) else {
            return;
        };
        match action {
            SyncAction::Search { query, page } => self.session.search(&query, page).await,
            SyncAction::Reset => self.session.search("", 1).await,
            SyncAction::Canonicalize {
                redirect,
                query,
                page,
            } => {
                self.navigator.replace(&redirect.location, redirect.nav);
                self.session.search(&query, page).await;
            }
            SyncAction::Redirect { redirect } => {
                self.navigator.replace(&redirect.location, redirect.nav);
            }
        }
    }

    /// User-submitted search: push the canonical location, then fetch
    /// page 1.
    pub async fn submit_search(&mut self, query: &str) {
        let outbound = self.sync.outbound(query, 1);
        self.navigator.push(&outbound.location, outbound.nav);
        self.session.search(query, 1).await;
    }

    /// User-selected page: push the canonical location, then fetch.
    ///
    /// Without an active query there is nothing to paginate, so nothing is
    /// pushed either.
    pub async fn select_page(&mut self, page: u32) {
        let query = self.session.snapshot().query;
        if query.is_empty() {
            return;
        }
        let outbound = self.sync.outbound(&query, page);
        self.navigator.push(&outbound.location, outbound.nav);
        self.session.change_page(page).await;
    }

    /// Dismiss the session's error.
    pub fn clear_error(&self) {
        self.session.clear_error();
    }

    /// User clicked a result card: open the overlay and load the profile.
    pub async fn select_user(&self, user: UserSummary) {
        self.overlay.select(user).await;
    }

    /// Close the overlay.
    pub fn close_overlay(&self) {
        self.overlay.close();
    }

    /// Snapshot of the session state.
    pub fn session_state(&self) -> SessionState {
        self.session.snapshot()
    }

    /// Snapshot of the overlay state.
    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.snapshot()
    }

    /// The navigator this surface pushes through.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
