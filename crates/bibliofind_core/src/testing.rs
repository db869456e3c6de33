//! crates/bibliofind_core/src/testing.rs
//!
//! An in-memory `BibliofindApi` and a fixed `Clock` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    ApiResponse, NotificationRequest, SearchCriteria, SearchEndpoint, SearchResults,
};
use crate::ports::{BibliofindApi, Clock, PortError, PortResult};

/// Every call the fake received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(SearchEndpoint, SearchCriteria),
    ResolveAuthor(String),
    ResolveSeries(String),
    FavoriteAuthor(String),
    FavoriteSeries(String),
    Email(NotificationRequest),
}

type Scripted<T> = Mutex<VecDeque<PortResult<ApiResponse<T>>>>;

/// Replays scripted responses per endpoint. An endpoint with nothing scripted
/// answers with a transport failure.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    searches: Scripted<SearchResults>,
    author_ids: Scripted<String>,
    series_ids: Scripted<String>,
    favorites: Scripted<()>,
    emails: Scripted<()>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(self, response: PortResult<ApiResponse<SearchResults>>) -> Self {
        self.searches.lock().unwrap().push_back(response);
        self
    }

    pub fn on_author_id(self, response: PortResult<ApiResponse<String>>) -> Self {
        self.author_ids.lock().unwrap().push_back(response);
        self
    }

    pub fn on_series_id(self, response: PortResult<ApiResponse<String>>) -> Self {
        self.series_ids.lock().unwrap().push_back(response);
        self
    }

    pub fn on_favorite(self, response: PortResult<ApiResponse<()>>) -> Self {
        self.favorites.lock().unwrap().push_back(response);
        self
    }

    pub fn on_email(self, response: PortResult<ApiResponse<()>>) -> Self {
        self.emails.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record<T>(&self, call: Call, script: &Scripted<T>) -> PortResult<ApiResponse<T>> {
        let endpoint = format!("{:?}", call);
        self.calls.lock().unwrap().push(call);
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(PortError::Transport(format!("nothing scripted for {}", endpoint)))
            })
    }
}

#[async_trait]
impl BibliofindApi for FakeApi {
    async fn search(
        &self,
        endpoint: SearchEndpoint,
        criteria: &SearchCriteria,
    ) -> PortResult<ApiResponse<SearchResults>> {
        self.record(Call::Search(endpoint, criteria.clone()), &self.searches)
    }

    async fn resolve_author_id(&self, author_name: &str) -> PortResult<ApiResponse<String>> {
        self.record(Call::ResolveAuthor(author_name.to_string()), &self.author_ids)
    }

    async fn resolve_series_id(&self, series_name: &str) -> PortResult<ApiResponse<String>> {
        self.record(Call::ResolveSeries(series_name.to_string()), &self.series_ids)
    }

    async fn add_favorite_author(&self, author_id: &str) -> PortResult<ApiResponse<()>> {
        self.record(Call::FavoriteAuthor(author_id.to_string()), &self.favorites)
    }

    async fn add_favorite_series(&self, series_id: &str) -> PortResult<ApiResponse<()>> {
        self.record(Call::FavoriteSeries(series_id.to_string()), &self.favorites)
    }

    async fn email_results(&self, request: &NotificationRequest) -> PortResult<ApiResponse<()>> {
        self.record(Call::Email(request.clone()), &self.emails)
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}
