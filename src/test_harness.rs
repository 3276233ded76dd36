//! Shared test doubles for the state machines.
//!
//! `FakeGateway` scripts gateway responses per call (FIFO) and records the
//! arguments of every call. `BlockedGateway` parks a chosen search call on
//! a oneshot channel so tests can control resolution order and exercise the
//! staleness discipline deterministically.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::gateway::UserGateway;
use crate::model::{FetchError, SearchPage, UserDetail, UserSummary};

/// Build a summary with deterministic fields from an index.
pub fn summary(index: u64) -> UserSummary {
    UserSummary {
        login: format!("user-{index}"),
        id: index,
        avatar_url: format!("https://avatars.test/{index}"),
        html_url: format!("https://github.test/user-{index}"),
    }
}

/// Build a page of `len` summaries reporting `total_count` total matches.
pub fn page(total_count: u32, len: u64) -> SearchPage {
    SearchPage {
        total_count,
        items: (0..len).map(summary).collect(),
    }
}

/// Scripted gateway: responses are served FIFO, calls are recorded.
///
/// When a queue runs dry the fake answers with an empty page (or a
/// summary-less profile), so tests only script what they assert on.
#[derive(Default)]
pub struct FakeGateway {
    search_responses: Mutex<VecDeque<Result<SearchPage, FetchError>>>,
    detail_responses: Mutex<VecDeque<Result<UserDetail, FetchError>>>,
    search_calls: Mutex<Vec<(String, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_search(&self, response: Result<SearchPage, FetchError>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    pub fn push_detail(&self, response: Result<UserDetail, FetchError>) {
        self.detail_responses.lock().unwrap().push_back(response);
    }

    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserGateway for FakeGateway {
    async fn search_users(&self, query: &str, page_num: u32) -> Result<SearchPage, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::EmptyQuery);
        }
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), page_num));
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(page(0, 0)))
    }

    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(FetchError::EmptyLogin);
        }
        self.detail_calls.lock().unwrap().push(login.to_string());
        self.detail_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(UserDetail::from(summary(0))))
    }
}

/// Gateway that parks the search for one designated query until the test
/// releases it, answering everything else immediately.
pub struct BlockedGateway {
    blocked_query: String,
    release: Mutex<Option<oneshot::Receiver<Result<SearchPage, FetchError>>>>,
    immediate: FakeGateway,
}

impl BlockedGateway {
    /// Block searches for `query`; the returned sender releases them.
    pub fn new(query: &str) -> (Self, oneshot::Sender<Result<SearchPage, FetchError>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                blocked_query: query.to_string(),
                release: Mutex::new(Some(rx)),
                immediate: FakeGateway::new(),
            },
            tx,
        )
    }

    /// Script a response for the non-blocked queries.
    pub fn push_search(&self, response: Result<SearchPage, FetchError>) {
        self.immediate.push_search(response);
    }

    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.immediate.search_calls()
    }
}

#[async_trait]
impl UserGateway for BlockedGateway {
    async fn search_users(&self, query: &str, page_num: u32) -> Result<SearchPage, FetchError> {
        if query == self.blocked_query {
            self.immediate
                .search_calls
                .lock()
                .unwrap()
                .push((query.to_string(), page_num));
            let rx = self
                .release
                .lock()
                .unwrap()
                .take()
                .expect("blocked query fetched twice");
            return rx.await.expect("release sender dropped");
        }
        self.immediate.search_users(query, page_num).await
    }

    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError> {
        self.immediate.fetch_user(login).await
    }
}

/// Gateway that parks the detail fetch for one designated login until the
/// test releases it, answering everything else immediately.
pub struct BlockedDetailGateway {
    blocked_login: String,
    release: Mutex<Option<oneshot::Receiver<Result<UserDetail, FetchError>>>>,
    immediate: FakeGateway,
}

impl BlockedDetailGateway {
    /// Block detail fetches for `login`; the returned sender releases them.
    pub fn new(login: &str) -> (Self, oneshot::Sender<Result<UserDetail, FetchError>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                blocked_login: login.to_string(),
                release: Mutex::new(Some(rx)),
                immediate: FakeGateway::new(),
            },
            tx,
        )
    }

    /// Script a response for the non-blocked logins.
    pub fn push_detail(&self, response: Result<UserDetail, FetchError>) {
        self.immediate.push_detail(response);
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.immediate.detail_calls()
    }
}

#[async_trait]
impl UserGateway for BlockedDetailGateway {
    async fn search_users(&self, query: &str, page_num: u32) -> Result<SearchPage, FetchError> {
        self.immediate.search_users(query, page_num).await
    }

    async fn fetch_user(&self, login: &str) -> Result<UserDetail, FetchError> {
        if login == self.blocked_login {
            self.immediate
                .detail_calls
                .lock()
                .unwrap()
                .push(login.to_string());
            let rx = self
                .release
                .lock()
                .unwrap()
                .take()
                .expect("blocked login fetched twice");
            return rx.await.expect("release sender dropped");
        }
        self.immediate.fetch_user(login).await
    }
}
