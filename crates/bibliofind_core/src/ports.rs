//! crates/bibliofind_core/src/ports.rs
//!
//! Defines the service contracts (traits) the interaction components depend on.
//! The core never talks HTTP itself; a concrete adapter implements `BibliofindApi`.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use crate::domain::{
    ApiResponse, NotificationRequest, SearchCriteria, SearchEndpoint, SearchResults,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The JSON endpoints exposed by the Bibliofind server.
///
/// Every method returns the normalized `ApiResponse` contract. A remote failure
/// signalled in the body is an `Ok(ApiResponse { outcome: Error, .. })`; only
/// transport and decoding problems are `Err`.
#[async_trait]
pub trait BibliofindApi: Send + Sync {
    // --- Search ---
    async fn search(
        &self,
        endpoint: SearchEndpoint,
        criteria: &SearchCriteria,
    ) -> PortResult<ApiResponse<SearchResults>>;

    // --- Id Resolution ---
    async fn resolve_author_id(&self, author_name: &str) -> PortResult<ApiResponse<String>>;

    async fn resolve_series_id(&self, series_name: &str) -> PortResult<ApiResponse<String>>;

    // --- Favorites ---
    async fn add_favorite_author(&self, author_id: &str) -> PortResult<ApiResponse<()>>;

    async fn add_favorite_series(&self, series_id: &str) -> PortResult<ApiResponse<()>>;

    // --- Notifications ---
    async fn email_results(&self, request: &NotificationRequest) -> PortResult<ApiResponse<()>>;
}

/// Source of "today" for the search date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Today's date in the human-readable form the server expects, e.g. `Mon Oct 19 2026`.
    fn search_date(&self) -> String {
        format_search_date(self.today())
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub fn format_search_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
