//! HTTP gateway backed by the GitHub users API.

use async_trait::async_trait;
use percent_encoding::utf8_percent_encode;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use super::{map_error_response, UserGateway};
use crate::config::ResolvedConfig;
use crate::location::PATH_SEGMENT;
use crate::model::{FetchError, SearchPage, UserDetail};

/// Media type GitHub's v3 REST API expects.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Gateway over the GitHub users API.
///
/// Holds one `reqwest::Client`; base URL and page size are fixed at
/// construction for the process lifetime.
pub struct GitHubGateway {
    client: Client,
    base_url: String,
    per_page: u32,
}

impl GitHubGateway {
    /// Create a gateway against `base_url` fetching `per_page` results per
    /// search page. A `per_page` of 0 is clamped to 1.
    pub fn new(base_url: impl Into<String>, per_page: u32) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page: per_page.max(1),
        }
    }

    /// Create a gateway from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.per_page)
    }
}

#[async_trait]
impl UserGateway for GitHubGateway {
    async fn search_users(&self, query: &str, page: u32) -> Result<SearchPage, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::EmptyQuery);
        }
        let page = page.max(1);

        debug!(query, page, "search request issued");
        let response = self
            .client
            .get(format!("{}/search/users", self.base_url))
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&[("q", query)])
            .query(&[("per_page", self.per_page), ("page", page)])
            .send()
            .await
            .map_err(|err| FetchError::Network {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status.as_u16(), &body, false));
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|err| FetchError::Network {
                message: err.to_string(),
            })
    }

    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(FetchError::EmptyLogin);
        }

        debug!(login, "detail request issued");
        let encoded = utf8_percent_encode(login, PATH_SEGMENT);
        let response = self
            .client
            .get(format!("{}/users/{}", self.base_url, encoded))
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|err| FetchError::Network {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status.as_u16(), &body, true));
        }

        response
            .json::<UserDetail>()
            .await
            .map_err(|err| FetchError::Network {
                message: err.to_string(),
            })
    }
}
