//! crates/bibliofind_core/src/domain.rs
//!
//! Defines the pure, core data structures for the search pages.
//! These structs are independent of any transport or serialization format.

use std::fmt;
use std::str::FromStr;

/// Which kind of query the user chose on the search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Author,
    Series,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Author => write!(f, "author"),
            SearchMode::Series => write!(f, "series"),
        }
    }
}

/// The bound restricting which book the server may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    OneYear,
    #[default]
    FiveYears,
    TenYears,
    AllTime,
}

impl Timeframe {
    /// The value posted in the `timeframe` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneYear => "1y",
            Timeframe::FiveYears => "5y",
            Timeframe::TenYears => "10y",
            Timeframe::AllTime => "all",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a known timeframe (expected 1y, 5y, 10y or all)")]
pub struct UnknownTimeframe(pub String);

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1y" => Ok(Timeframe::OneYear),
            "5y" => Ok(Timeframe::FiveYears),
            "10y" => Ok(Timeframe::TenYears),
            "all" => Ok(Timeframe::AllTime),
            other => Err(UnknownTimeframe(other.to_string())),
        }
    }
}

/// Which search endpoint a page submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEndpoint {
    /// `/search.json`, used by the combined author/series search page.
    Search,
    /// `/series-result.json`, used by the series result page.
    SeriesResult,
}

/// What the user is searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Author {
        name: String,
        favorite: Option<String>,
    },
    Series {
        id: String,
        name: String,
        favorite: Option<String>,
    },
}

impl SearchQuery {
    pub fn mode(&self) -> SearchMode {
        match self {
            SearchQuery::Author { .. } => SearchMode::Author,
            SearchQuery::Series { .. } => SearchMode::Series,
        }
    }

    /// The human-readable name of the query, used in button labels and email titles.
    pub fn display_name(&self) -> &str {
        match self {
            SearchQuery::Author { name, .. } => name,
            SearchQuery::Series { name, .. } => name,
        }
    }
}

/// Local validation failures. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter only an author or a series, not both.")]
    BothQueries,
    #[error("Please enter a value to submit!")]
    NoQuery,
    #[error("Please select a series to search!")]
    NoSeriesSelected,
}

/// A fully validated search, created on submit and consumed by the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: SearchQuery,
    pub timeframe: Timeframe,
    /// The client's date, formatted like `Mon Oct 19 2026`.
    pub search_date: String,
}

/// Raw field values read from the search form.
#[derive(Debug, Clone, Default)]
pub struct SearchFields<'a> {
    pub author: &'a str,
    pub favorite_author: &'a str,
    pub series_id: &'a str,
    pub series_name: &'a str,
    pub favorite_series: &'a str,
}

impl SearchCriteria {
    /// Builds criteria from form fields, enforcing that exactly one of
    /// author name and series id is present.
    pub fn from_fields(
        fields: SearchFields<'_>,
        timeframe: Timeframe,
        search_date: String,
    ) -> Result<Self, ValidationError> {
        let author = fields.author.trim();
        let series_id = fields.series_id.trim();

        let query = match (author.is_empty(), series_id.is_empty()) {
            (false, false) => return Err(ValidationError::BothQueries),
            (true, true) => return Err(ValidationError::NoQuery),
            (false, true) => SearchQuery::Author {
                name: author.to_string(),
                favorite: non_empty(fields.favorite_author),
            },
            (true, false) => {
                let name = match fields.series_name.trim() {
                    "" => series_id.to_string(),
                    name => name.to_string(),
                };
                SearchQuery::Series {
                    id: series_id.to_string(),
                    name,
                    favorite: non_empty(fields.favorite_series),
                }
            }
        };

        Ok(Self {
            query,
            timeframe,
            search_date,
        })
    }

    pub fn mode(&self) -> SearchMode {
        self.query.mode()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A single book returned by a search. An absent title means nothing was
/// found in the timeframe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: Option<String>,
    pub publication_date: Option<String>,
    pub cover_image_url: Option<String>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.title.is_some()
    }

    pub fn not_found() -> Self {
        Self::default()
    }
}

/// The timeframe-bounded result plus the optional unrestricted "most recent" book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub result: SearchResult,
    pub most_recent: Option<SearchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Author,
    Series,
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteKind::Author => write!(f, "author"),
            FavoriteKind::Series => write!(f, "series"),
        }
    }
}

/// The author or series a user wants to mark as a favorite.
/// A `None` id has to be resolved from the display name first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteTarget {
    pub kind: FavoriteKind,
    pub id: Option<String>,
    pub display_name: String,
}

impl FavoriteTarget {
    pub fn author_by_name(name: impl Into<String>) -> Self {
        Self {
            kind: FavoriteKind::Author,
            id: None,
            display_name: name.into(),
        }
    }

    pub fn series_by_name(name: impl Into<String>) -> Self {
        Self {
            kind: FavoriteKind::Series,
            id: None,
            display_name: name.into(),
        }
    }

    /// A target whose id is already known, e.g. from an author or series detail page.
    pub fn with_id(
        kind: FavoriteKind,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            id: Some(id.into()),
            display_name: display_name.into(),
        }
    }
}

/// An "email me this" request. The body is an opaque HTML snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub html_body: String,
}

impl NotificationRequest {
    pub fn for_search_results(display_name: &str, html_body: impl Into<String>) -> Self {
        Self {
            title: format!("Bibliofind Search Results for {}", display_name),
            html_body: html_body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

/// The single normalized response contract every endpoint is mapped onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub outcome: Outcome,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            outcome: Outcome::Ok,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == Outcome::Ok
    }
}
