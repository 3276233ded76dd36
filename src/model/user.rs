//! User records returned by the search and detail endpoints.
//!
//! [`UserSummary`] is the lightweight card the search endpoint returns;
//! [`UserDetail`] is the full profile from the by-login endpoint. The detail
//! record is a strict superset of the summary, so an overlay can be seeded
//! from a summary while the detail fetch is in flight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight result item from the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSummary {
    /// Unique login name.
    pub login: String,
    /// Numeric account id.
    pub id: u64,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
}

/// Full profile record from the by-login endpoint.
///
/// Every field beyond the summary set is optional: the API omits unset
/// profile fields, and a record constructed from a [`UserSummary`] seed has
/// none of them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserDetail {
    /// Unique login name.
    pub login: String,
    /// Numeric account id.
    pub id: u64,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Profile bio.
    #[serde(default)]
    pub bio: Option<String>,
    /// Company field.
    #[serde(default)]
    pub company: Option<String>,
    /// Free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub blog: Option<String>,
    /// Twitter handle without the leading `@`.
    #[serde(default)]
    pub twitter_username: Option<String>,
    /// Follower count.
    #[serde(default)]
    pub followers: u64,
    /// Following count.
    #[serde(default)]
    pub following: u64,
    /// Public repository count.
    #[serde(default)]
    pub public_repos: u64,
    /// Public gist count.
    #[serde(default)]
    pub public_gists: u64,
    /// Account creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<UserSummary> for UserDetail {
    /// Seed a detail record from a summary. Detail-only fields stay empty
    /// until the full profile arrives, if it ever does.
    fn from(summary: UserSummary) -> Self {
        Self {
            login: summary.login,
            id: summary.id,
            avatar_url: summary.avatar_url,
            html_url: summary.html_url,
            name: None,
            bio: None,
            company: None,
            location: None,
            blog: None,
            twitter_username: None,
            followers: 0,
            following: 0,
            public_repos: 0,
            public_gists: 0,
            created_at: None,
        }
    }
}

/// One page of search results as reported by the remote source.
///
/// `total_count` covers the whole result set, not just this page, so the
/// two fields together are what the session commits atomically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchPage {
    /// Total matches for the query across all pages.
    pub total_count: u32,
    /// Items for the requested page.
    pub items: Vec<UserSummary>,
}
