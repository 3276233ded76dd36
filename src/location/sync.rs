//! URL synchronization controller.
//!
//! Keeps the displayed location and the search session consistent without
//! feedback loops or duplicate fetches. Self-initiated navigations are
//! tagged with a [`NavId`]; an observed location change carrying the
//! controller's own most recent id is its echo and is ignored. Everything
//! else is parsed, deduplicated against the last processed `(query, page)`
//! pair, and turned into a [`SyncAction`] for the caller to execute.
//!
//! The controller is pure: it never fetches or pushes anything itself.

use tracing::debug;

use super::{canonicalize, encode, parse};

/// Monotonic identifier tagging a self-initiated navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavId(u64);

/// A prepared outbound navigation: the canonical location and the id the
/// caller must attach when pushing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    /// Canonical location for the `(query, page)` pair.
    pub location: String,
    /// Tag for the push; the controller ignores the echo carrying it.
    pub nav: NavId,
}

/// What an observed location change asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Run a search for the parsed pair.
    Search {
        /// Decoded query.
        query: String,
        /// Requested page, >= 1.
        page: u32,
    },
    /// The location no longer encodes a query; clear the session.
    Reset,
    /// The location spells page 1 explicitly: replace it with the
    /// canonical form, then run the search.
    Canonicalize {
        /// Prepared replacement push.
        redirect: Outbound,
        /// Decoded query.
        query: String,
        /// Always 1 for a canonicalization.
        page: u32,
    },
    /// Replace the location with its canonical form only; the pair was
    /// already processed, so no fetch is needed.
    Redirect {
        /// Prepared replacement push.
        redirect: Outbound,
    },
}

/// Bidirectional bridge between session state and the displayed location.
///
/// One controller per UI surface. Exactly one initial fetch is issued for
/// the location present at mount; later observations are deduplicated.
#[derive(Debug, Default)]
pub struct SyncController {
    next_nav: u64,
    /// Single-slot "last self-navigation id" (the generalized re-entrancy
    /// flag). Cleared by the observation that consumes it.
    last_self_nav: Option<NavId>,
    /// Last `(query, page)` pair this controller processed, inbound or
    /// outbound.
    last_processed: Option<(String, u32)>,
    initialized: bool,
}

impl SyncController {
    /// Create a controller that has not yet observed a mount location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare an outbound navigation for a user action.
    ///
    /// Records the pair as processed (so a later identical notification is
    /// deduplicated) and arms the re-entrancy slot with a fresh id. The
    /// caller pushes `location` tagged with `nav`, without scrolling.
    pub fn outbound(&mut self, query: &str, page: u32) -> Outbound {
        let nav = self.next_id();
        let page = page.max(1);
        self.last_self_nav = Some(nav);
        self.last_processed = Some((query.trim().to_string(), page));
        self.initialized = true;
        Outbound {
            location: encode(query, page),
            nav,
        }
    }

    /// Classify an observed location change.
    ///
    /// `nav` is the tag the change arrived with, if any; browser
    /// back/forward and direct links carry none. Returns `None` when
    /// nothing should happen: the change was this controller's own echo, or
    /// a duplicate of the last processed pair, or an idle mount location.
    pub fn observe(&mut self, location: &str, nav: Option<NavId>) -> Option<SyncAction> {
        if nav.is_some() && nav == self.last_self_nav {
            // Echo of our own push; consume the slot.
            self.last_self_nav = None;
            debug!(location, "ignoring self-caused location change");
            return None;
        }

        if let Some(redirect_to) = canonicalize(location) {
            let parsed = parse(location);
            let pair = (parsed.query.clone(), 1);
            let duplicate = self.initialized && self.last_processed.as_ref() == Some(&pair);
            let nav = self.next_id();
            self.last_self_nav = Some(nav);
            self.last_processed = Some(pair);
            self.initialized = true;
            debug!(location, redirect_to = %redirect_to, duplicate, "canonicalizing page-1 location");
            let redirect = Outbound {
                location: redirect_to,
                nav,
            };
            return Some(if duplicate {
                SyncAction::Redirect { redirect }
            } else {
                SyncAction::Canonicalize {
                    redirect,
                    query: parsed.query,
                    page: 1,
                }
            });
        }

        let parsed = parse(location);
        let pair = (parsed.query.clone(), parsed.page);

        if !self.initialized {
            self.initialized = true;
            self.last_processed = Some(pair);
            if parsed.query.is_empty() {
                return None;
            }
            debug!(query = %parsed.query, page = parsed.page, "mount fetch");
            return Some(SyncAction::Search {
                query: parsed.query,
                page: parsed.page,
            });
        }

        if self.last_processed.as_ref() == Some(&pair) {
            debug!(location, "duplicate location change ignored");
            return None;
        }
        self.last_processed = Some(pair);

        if parsed.query.is_empty() {
            Some(SyncAction::Reset)
        } else {
            Some(SyncAction::Search {
                query: parsed.query,
                page: parsed.page,
            })
        }
    }

    fn next_id(&mut self) -> NavId {
        self.next_nav += 1;
        NavId(self.next_nav)
    }
}
