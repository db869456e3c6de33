//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `BibliofindApi` port from the `core` crate. Every endpoint is a
//! form-encoded POST answered with JSON.

use async_trait::async_trait;
use bibliofind_core::domain::{
    ApiResponse, NotificationRequest, SearchCriteria, SearchEndpoint, SearchQuery, SearchResults,
};
use bibliofind_core::ports::{BibliofindApi, PortError, PortResult};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::wire::{
    AuthorIdForm, AuthorNameForm, EmailForm, IdRecord, MessageRecord, SearchForm, SearchRecord,
    SeriesIdForm, SeriesNameForm, SeriesResultForm,
};
use crate::config::Config;
use crate::error::ClientError;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements the `BibliofindApi` port.
#[derive(Clone)]
pub struct HttpApiAdapter {
    client: Client,
    base_url: Url,
}

impl HttpApiAdapter {
    /// Creates a new `HttpApiAdapter`. `base_url` should end with `/`.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Builds the underlying client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| {
                ClientError::Internal(format!("Invalid session cookie: {}", e))
            })?;
            headers.insert(COOKIE, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?, config.base_url.clone()))
    }

    /// Posts `form` to `endpoint` and decodes the JSON answer.
    async fn post_form<F, R>(&self, endpoint: &str, form: &F) -> PortResult<R>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PortError::Unexpected(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(PortError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(PortError::NotFound(endpoint.to_string())),
            status => {
                return Err(PortError::Unexpected(format!(
                    "{} answered with {}",
                    endpoint, status
                )))
            }
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_decode() {
                PortError::MalformedResponse(format!("{}: {}", endpoint, e))
            } else {
                PortError::Transport(e.to_string())
            }
        })
    }
}

//=========================================================================================
// Port Implementation
//=========================================================================================

#[async_trait]
impl BibliofindApi for HttpApiAdapter {
    async fn search(
        &self,
        endpoint: SearchEndpoint,
        criteria: &SearchCriteria,
    ) -> PortResult<ApiResponse<SearchResults>> {
        let date = criteria.search_date.as_str();
        let timeframe = criteria.timeframe.as_str();

        let record: SearchRecord = match (endpoint, &criteria.query) {
            (SearchEndpoint::Search, SearchQuery::Author { name, .. }) => {
                let form = SearchForm {
                    date,
                    author: Some(name.as_str()),
                    series: None,
                    timeframe,
                };
                self.post_form("search.json", &form).await?
            }
            (SearchEndpoint::Search, SearchQuery::Series { id, .. }) => {
                let form = SearchForm {
                    date,
                    author: None,
                    series: Some(id.as_str()),
                    timeframe,
                };
                self.post_form("search.json", &form).await?
            }
            (SearchEndpoint::SeriesResult, SearchQuery::Series { id, name, .. }) => {
                let form = SeriesResultForm {
                    id,
                    name,
                    date,
                    timeframe,
                };
                self.post_form("series-result.json", &form).await?
            }
            (SearchEndpoint::SeriesResult, SearchQuery::Author { .. }) => {
                return Err(PortError::Unexpected(
                    "The series result endpoint only accepts series queries".to_string(),
                ))
            }
        };
        Ok(record.into_response())
    }

    async fn resolve_author_id(&self, author_name: &str) -> PortResult<ApiResponse<String>> {
        let form = AuthorNameForm {
            author: author_name,
        };
        let record: IdRecord = self.post_form("get-author-id.json", &form).await?;
        Ok(record.into_response())
    }

    async fn resolve_series_id(&self, series_name: &str) -> PortResult<ApiResponse<String>> {
        let form = SeriesNameForm { series_name };
        let record: IdRecord = self.post_form("get-series-id.json", &form).await?;
        Ok(record.into_response())
    }

    async fn add_favorite_author(&self, author_id: &str) -> PortResult<ApiResponse<()>> {
        let form = AuthorIdForm { author_id };
        let record: MessageRecord = self.post_form("update-fav-author.json", &form).await?;
        Ok(record.into_response())
    }

    async fn add_favorite_series(&self, series_id: &str) -> PortResult<ApiResponse<()>> {
        let form = SeriesIdForm { series_id };
        let record: MessageRecord = self.post_form("update-fav-series.json", &form).await?;
        Ok(record.into_response())
    }

    async fn email_results(&self, request: &NotificationRequest) -> PortResult<ApiResponse<()>> {
        let form = EmailForm {
            title: &request.title,
            result: &request.html_body,
        };
        let record: MessageRecord = self.post_form("email-info.json", &form).await?;
        Ok(record.into_response())
    }
}
