//! Result-fetch gateway.
//!
//! [`UserGateway`] is the seam between the state machines and the remote
//! user directory: two idempotent read operations with a uniform error
//! value. The production implementation is [`GitHubGateway`]; tests script
//! their own implementations of the trait.

pub mod github;

pub use github::GitHubGateway;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{FetchError, SearchPage, UserDetail};

/// Remote lookups used by the search session and the detail overlay.
///
/// Each call performs exactly one outbound request; no retries, no caching.
/// Implementations validate locally before touching the network: an empty
/// trimmed query fails with [`FetchError::EmptyQuery`] and an empty trimmed
/// login with [`FetchError::EmptyLogin`].
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Search users matching `query`, returning the requested page.
    ///
    /// A page below 1 is clamped to 1; page 0 is never passed through to
    /// the remote source.
    async fn search_users(&self, query: &str, page: u32) -> Result<SearchPage, FetchError>;

    /// Fetch one user's full profile by login.
    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError>;
}

#[async_trait]
impl<G: UserGateway + ?Sized> UserGateway for Arc<G> {
    async fn search_users(&self, query: &str, page: u32) -> Result<SearchPage, FetchError> {
        (**self).search_users(query, page).await
    }

    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError> {
        (**self).fetch_user(login).await
    }
}

/// Best-effort error body: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Map a non-2xx response to a [`FetchError`].
///
/// 403 means rate limiting on either endpoint. 404 maps to
/// [`FetchError::NotFound`] only when `detail_lookup` is set; the search
/// endpoint treats 404 like any other HTTP failure. If the body parses as a
/// structured error its message is surfaced, otherwise the generic HTTP
/// error carries the status.
pub(crate) fn map_error_response(status: u16, body: &str, detail_lookup: bool) -> FetchError {
    if status == 403 {
        return FetchError::RateLimited;
    }
    if detail_lookup && status == 404 {
        return FetchError::NotFound;
    }
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => FetchError::Api {
            message: parsed.message,
        },
        Err(_) => FetchError::Http { status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_403_is_rate_limited_on_both_endpoints() {
        assert_eq!(map_error_response(403, "", false), FetchError::RateLimited);
        assert_eq!(map_error_response(403, "", true), FetchError::RateLimited);
    }

    #[test]
    fn status_404_is_not_found_only_for_detail_lookups() {
        assert_eq!(map_error_response(404, "", true), FetchError::NotFound);
        assert_eq!(
            map_error_response(404, "", false),
            FetchError::Http { status: 404 }
        );
    }

    #[test]
    fn structured_body_message_is_surfaced() {
        let err = map_error_response(422, r#"{"message": "Validation Failed"}"#, false);
        assert_eq!(
            err,
            FetchError::Api {
                message: "Validation Failed".to_string()
            }
        );
    }

    #[test]
    fn unparsable_body_falls_back_to_http_error() {
        let err = map_error_response(500, "<html>Internal Server Error</html>", false);
        assert_eq!(err, FetchError::Http { status: 500 });
    }

    #[test]
    fn empty_body_falls_back_to_http_error() {
        let err = map_error_response(502, "", true);
        assert_eq!(err, FetchError::Http { status: 502 });
    }

    #[test]
    fn rate_limit_wins_over_structured_body() {
        let err = map_error_response(403, r#"{"message": "API rate limit exceeded"}"#, false);
        assert_eq!(err, FetchError::RateLimited);
    }
}
