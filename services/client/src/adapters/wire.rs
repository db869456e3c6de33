//! services/client/src/adapters/wire.rs
//!
//! Form bodies and "impure" JSON records exchanged with the Bibliofind server,
//! and their conversion into the core's normalized `ApiResponse` contract.

use bibliofind_core::domain::{ApiResponse, Outcome, SearchResult, SearchResults};
use serde::{Deserialize, Serialize};
use serde_json::Value;

//=========================================================================================
// Request Form Bodies
//=========================================================================================

#[derive(Serialize, Debug)]
pub struct SearchForm<'a> {
    pub date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<&'a str>,
    pub timeframe: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SeriesResultForm<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub date: &'a str,
    pub timeframe: &'a str,
}

#[derive(Serialize, Debug)]
pub struct AuthorNameForm<'a> {
    pub author: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SeriesNameForm<'a> {
    pub series_name: &'a str,
}

#[derive(Serialize, Debug)]
pub struct AuthorIdForm<'a> {
    pub author_id: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SeriesIdForm<'a> {
    pub series_id: &'a str,
}

#[derive(Serialize, Debug)]
pub struct EmailForm<'a> {
    pub title: &'a str,
    pub result: &'a str,
}

//=========================================================================================
// Response Records
//=========================================================================================

/// A book as the server sends it: either `[title, date, cover]` or named fields.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum BookRecord {
    Positional(Vec<Value>),
    Named(NamedBookRecord),
}

#[derive(Deserialize, Debug)]
pub struct NamedBookRecord {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default, alias = "publication_date")]
    date: Option<Value>,
    #[serde(default, alias = "coverUrl", alias = "cover")]
    cover_url: Option<Value>,
}

impl BookRecord {
    fn to_domain(self) -> SearchResult {
        match self {
            BookRecord::Positional(fields) => {
                let mut fields = fields.into_iter().map(text);
                SearchResult {
                    title: fields.next().flatten(),
                    publication_date: fields.next().flatten(),
                    cover_image_url: fields.next().flatten(),
                }
            }
            BookRecord::Named(book) => SearchResult {
                title: book.title.and_then(text),
                publication_date: book.date.and_then(text),
                cover_image_url: book.cover_url.and_then(text),
            },
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SearchRecord {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Option<BookRecord>,
    #[serde(default)]
    most_recent: Option<BookRecord>,
}

impl SearchRecord {
    pub fn into_response(self) -> ApiResponse<SearchResults> {
        let message = self.status.unwrap_or_else(|| "ok".to_string());
        if is_error(&message) {
            return ApiResponse::error(message);
        }
        ApiResponse {
            outcome: Outcome::Ok,
            message,
            payload: self.results.map(|results| SearchResults {
                result: results.to_domain(),
                most_recent: self.most_recent.map(BookRecord::to_domain),
            }),
        }
    }
}

/// Answer of the id lookup endpoints. Authors report `auth_status`, series `status`.
#[derive(Deserialize, Debug)]
pub struct IdRecord {
    #[serde(default, alias = "auth_status")]
    status: Option<String>,
    #[serde(default)]
    id: Option<Value>,
}

impl IdRecord {
    pub fn into_response(self) -> ApiResponse<String> {
        let message = self.status.unwrap_or_default();
        match self.id.and_then(text) {
            Some(id) if message == "ok" => ApiResponse::ok(message, id),
            // "ok" without an id carries no reason worth showing.
            None if message == "ok" => ApiResponse::error(""),
            _ => ApiResponse::error(message),
        }
    }
}

/// Answer of the favorite and email endpoints: a free-form message under
/// `result` or `status`.
#[derive(Deserialize, Debug)]
pub struct MessageRecord {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl MessageRecord {
    pub fn into_response(self) -> ApiResponse<()> {
        let failed = self.status.as_deref().is_some_and(is_error);
        let message = self.result.or(self.status).unwrap_or_default();
        if failed {
            ApiResponse::error(message)
        } else {
            ApiResponse::ok(message, ())
        }
    }
}

fn is_error(status: &str) -> bool {
    status.eq_ignore_ascii_case("error")
}

/// Reads a JSON scalar as text. `null` and empty strings count as absent.
fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search(value: Value) -> ApiResponse<SearchResults> {
        serde_json::from_value::<SearchRecord>(value).unwrap().into_response()
    }

    #[test]
    fn positional_results_are_read_in_order() {
        let response = search(json!({
            "status": "ok",
            "results": ["The Hobbit", 1937, "img.jpg"]
        }));
        assert!(response.is_ok());
        let results = response.payload.unwrap();
        assert_eq!(results.result.title.as_deref(), Some("The Hobbit"));
        assert_eq!(results.result.publication_date.as_deref(), Some("1937"));
        assert_eq!(results.result.cover_image_url.as_deref(), Some("img.jpg"));
        assert!(results.most_recent.is_none());
    }

    #[test]
    fn null_positional_results_mean_not_found() {
        let response = search(json!({ "results": [null, null, null] }));
        let results = response.payload.unwrap();
        assert!(!results.result.found());
        assert_eq!(results.result, SearchResult::not_found());
    }

    #[test]
    fn named_results_and_most_recent() {
        let response = search(json!({
            "status": "ok",
            "results": { "title": "Mort", "date": "1987", "coverUrl": "mort.jpg" },
            "most_recent": { "title": "The Shepherd's Crown", "date": "2015", "cover_url": null }
        }));
        let results = response.payload.unwrap();
        assert_eq!(results.result.cover_image_url.as_deref(), Some("mort.jpg"));
        let most_recent = results.most_recent.unwrap();
        assert_eq!(most_recent.title.as_deref(), Some("The Shepherd's Crown"));
        assert!(most_recent.cover_image_url.is_none());
    }

    #[test]
    fn error_status_has_no_payload() {
        let response = search(json!({ "status": "error" }));
        assert_eq!(response.outcome, Outcome::Error);
        assert!(response.payload.is_none());
    }

    #[test]
    fn id_lookup_requires_ok_status() {
        let author: IdRecord =
            serde_json::from_value(json!({ "auth_status": "ok", "id": 17 })).unwrap();
        assert_eq!(author.into_response(), ApiResponse::ok("ok", "17".to_string()));

        let missing: IdRecord =
            serde_json::from_value(json!({ "status": "Series not found", "id": null })).unwrap();
        assert_eq!(missing.into_response(), ApiResponse::error("Series not found"));

        let no_id: IdRecord =
            serde_json::from_value(json!({ "status": "ok", "id": null })).unwrap();
        assert_eq!(no_id.into_response(), ApiResponse::error(""));
    }

    #[test]
    fn message_prefers_result_over_status() {
        let favorite: MessageRecord =
            serde_json::from_value(json!({ "result": "Added to favorites!" })).unwrap();
        assert_eq!(favorite.into_response(), ApiResponse::ok("Added to favorites!", ()));

        let email: MessageRecord = serde_json::from_value(json!({ "status": "Sent!" })).unwrap();
        assert_eq!(email.into_response(), ApiResponse::ok("Sent!", ()));
    }
}
