//! crates/bibliofind_core/src/controller.rs
//!
//! The search interaction controller: one parameterized implementation of the
//! search-panel state machine shared by the search and series result pages.
//!
//! A results cycle moves `Idle → ModeSelected → Submitting → {Rendered | Error}`.
//! Favorite and email actions are allowed any number of times from `Rendered`
//! and never change the cycle state.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    ApiResponse, FavoriteKind, FavoriteTarget, NotificationRequest, Outcome, SearchCriteria,
    SearchEndpoint, SearchFields, SearchMode, SearchQuery, SearchResults, ValidationError,
};
use crate::favorites::{FavoriteActionHandler, FavoriteReport};
use crate::notification::NotificationActionHandler;
use crate::page::{
    Page, PageConfig, ProgressIndicator, ValidationSurface, RETRY_MESSAGE, SEARCHING_TEXT,
    SEARCH_LABEL,
};
use crate::ports::{BibliofindApi, Clock, PortResult};
use crate::render::{render_most_recent, render_result};

//=========================================================================================
// Cycle State, Errors and Small Types
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    ModeSelected(SearchMode),
    Submitting,
    Rendered,
    Error,
}

/// Misuse of the controller, as opposed to a user-facing validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("This page does not offer a {0} search")]
    UnsupportedMode(SearchMode),
    #[error("There are no rendered results to act on")]
    NoResults,
}

/// A user edit to one of the search fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Author(String),
    FavoriteAuthor(String),
    Series(String),
    FavoriteSeries(String),
}

/// What a field edit did to its partner field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEffect {
    Unchanged,
    FavoriteCleared,
    PrimaryOverwritten,
}

/// What was searched in the current results cycle. Favorite and email
/// actions read this instead of the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsContext {
    pub query: SearchQuery,
}

impl ResultsContext {
    pub fn mode(&self) -> SearchMode {
        self.query.mode()
    }

    pub fn favorite_target(&self, resolve_series_by_name: bool) -> FavoriteTarget {
        match &self.query {
            SearchQuery::Author { name, .. } => FavoriteTarget::author_by_name(name.as_str()),
            SearchQuery::Series { name, .. } if resolve_series_by_name => {
                FavoriteTarget::series_by_name(name.as_str())
            }
            SearchQuery::Series { id, name, .. } => {
                FavoriteTarget::with_id(FavoriteKind::Series, id.as_str(), name.as_str())
            }
        }
    }

    pub fn favorite_label(&self) -> String {
        format!("Add {} to Favorites", self.query.display_name())
    }
}

/// A search that has been validated and announced on the page but whose
/// response has not been applied yet.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    generation: u64,
    criteria: SearchCriteria,
}

impl PendingSearch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCompletion {
    Rendered,
    Failed,
    /// A newer search or mode change superseded this one; the page was left alone.
    Stale,
}

//=========================================================================================
// The Controller
//=========================================================================================

pub struct SearchInteractionController {
    api: Arc<dyn BibliofindApi>,
    clock: Arc<dyn Clock>,
    config: PageConfig,
    page: Page,
    state: CycleState,
    generation: u64,
    context: Option<ResultsContext>,
    favorites: FavoriteActionHandler,
    notifications: NotificationActionHandler,
}

impl SearchInteractionController {
    /// Creates a controller for one page view. Pages offering a single search
    /// mode start with that mode selected.
    pub fn new(
        api: Arc<dyn BibliofindApi>,
        clock: Arc<dyn Clock>,
        config: PageConfig,
        page: Page,
    ) -> Self {
        let single_mode = match config.modes.as_slice() {
            [mode] => Some(*mode),
            _ => None,
        };

        let mut controller = Self {
            favorites: FavoriteActionHandler::new(api.clone()),
            notifications: NotificationActionHandler::new(api.clone()),
            api,
            clock,
            config,
            page,
            state: CycleState::Idle,
            generation: 0,
            context: None,
        };

        if let Some(mode) = single_mode {
            controller.show_mode(mode);
        }
        controller
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn context(&self) -> Option<&ResultsContext> {
        self.context.as_ref()
    }

    // --- Mode Panels ---

    /// Shows the field group for `mode`, hides the other one, resets the
    /// favorite selectors and clears anything left from the previous cycle.
    pub fn select_mode(&mut self, mode: SearchMode) -> Result<(), ControllerError> {
        if !self.config.supports(mode) {
            return Err(ControllerError::UnsupportedMode(mode));
        }
        self.show_mode(mode);
        Ok(())
    }

    fn show_mode(&mut self, mode: SearchMode) {
        let favorites = self.config.favorite_fields;
        let page = &mut self.page;

        page.search_form_visible = true;
        page.author_field_visible = mode == SearchMode::Author;
        page.favorite_author_field_visible = favorites && mode == SearchMode::Author;
        page.series_field_visible = mode == SearchMode::Series;
        page.favorite_series_field_visible = favorites && mode == SearchMode::Series;

        page.favorite_author.clear();
        page.favorite_series.clear();
        match mode {
            SearchMode::Author => page.series.clear(),
            SearchMode::Series => page.author.clear(),
        }

        page.clear_results();
        page.submit_button.restore(SEARCH_LABEL);
        self.context = None;
        // Anything still in flight belongs to the previous cycle.
        self.generation += 1;
        self.state = CycleState::ModeSelected(mode);
        debug!(%mode, generation = self.generation, "Search mode selected");
    }

    // --- Field Synchronization ---

    /// Keeps the favorite selectors consistent with the primary fields.
    ///
    /// Picking a favorite always overwrites the primary field. Editing the
    /// primary field to something else clears a non-empty favorite.
    pub fn sync_favorite_field(&mut self, change: FieldChange) -> SyncEffect {
        let page = &mut self.page;
        match change {
            FieldChange::Author(value) => {
                page.author = value;
                clear_if_diverged(&page.author, &mut page.favorite_author)
            }
            FieldChange::Series(value) => {
                page.series = value;
                clear_if_diverged(&page.series, &mut page.favorite_series)
            }
            FieldChange::FavoriteAuthor(value) => {
                page.author = value.clone();
                page.favorite_author = value;
                SyncEffect::PrimaryOverwritten
            }
            FieldChange::FavoriteSeries(value) => {
                page.series = value.clone();
                page.favorite_series = value;
                SyncEffect::PrimaryOverwritten
            }
        }
    }

    // --- Search Submission ---

    /// Validates the form, issues the search and applies its response.
    ///
    /// A validation failure is shown on the page and returned; no request is sent.
    pub async fn submit_search(&mut self) -> Result<SearchCompletion, ValidationError> {
        let pending = self.begin_search()?;
        info!(
            endpoint = ?self.config.endpoint,
            mode = %pending.criteria.mode(),
            timeframe = %pending.criteria.timeframe,
            "Submitting search"
        );
        let response = self.api.search(self.config.endpoint, &pending.criteria).await;
        Ok(self.complete_search(pending, response))
    }

    /// The synchronous first half of `submit_search`: validation, the
    /// in-progress indicator and a fresh request generation.
    pub fn begin_search(&mut self) -> Result<PendingSearch, ValidationError> {
        let criteria = match self.read_criteria() {
            Ok(criteria) => criteria,
            Err(e) => {
                debug!("Search rejected locally: {}", e);
                match self.config.validation_surface {
                    ValidationSurface::StatusLine => self.page.status_line = e.to_string(),
                    ValidationSurface::Acknowledgement => self.page.notices.push(e.to_string()),
                }
                return Err(e);
            }
        };

        self.generation += 1;
        let page = &mut self.page;
        match self.config.progress {
            ProgressIndicator::StatusText => {
                page.status_line = SEARCHING_TEXT.to_string();
                page.results_headline_visible = true;
            }
            ProgressIndicator::Spinner => {
                page.clear_results();
                self.context = None;
                page.submit_button.spin();
            }
        }
        page.submit_button.enabled = false;
        self.state = CycleState::Submitting;

        Ok(PendingSearch {
            generation: self.generation,
            criteria,
        })
    }

    fn read_criteria(&self) -> Result<SearchCriteria, ValidationError> {
        let page = &self.page;
        let series_name = if page.series.is_empty() {
            String::new()
        } else {
            page.series_name(&page.series)
        };

        let fields = match self.config.endpoint {
            SearchEndpoint::Search => SearchFields {
                author: &page.author,
                favorite_author: &page.favorite_author,
                series_id: &page.series,
                series_name: &series_name,
                favorite_series: &page.favorite_series,
            },
            SearchEndpoint::SeriesResult => SearchFields {
                series_id: &page.series,
                series_name: &series_name,
                ..Default::default()
            },
        };

        SearchCriteria::from_fields(fields, page.timeframe, self.clock.search_date()).map_err(|e| {
            match (self.config.endpoint, e) {
                (SearchEndpoint::SeriesResult, ValidationError::NoQuery) => {
                    ValidationError::NoSeriesSelected
                }
                (_, e) => e,
            }
        })
    }

    /// The second half of `submit_search`: applies a response to the page,
    /// unless a newer search or mode change has happened since `pending` began.
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        response: PortResult<ApiResponse<SearchResults>>,
    ) -> SearchCompletion {
        if pending.generation != self.generation {
            debug!(
                stale = pending.generation,
                current = self.generation,
                "Discarding superseded search response"
            );
            return SearchCompletion::Stale;
        }

        let results = match response {
            Ok(ApiResponse {
                outcome: Outcome::Ok,
                payload: Some(results),
                ..
            }) => results,
            Ok(response) => {
                warn!("Search failed on the server: {}", response.message);
                return self.fail();
            }
            Err(e) => {
                warn!("Search request failed: {:?}", e);
                return self.fail();
            }
        };

        match self.render(pending.criteria, &results) {
            Ok(()) => SearchCompletion::Rendered,
            Err(e) => {
                error!("Failed to render search results: {}", e);
                self.fail()
            }
        }
    }

    fn render(
        &mut self,
        criteria: SearchCriteria,
        results: &SearchResults,
    ) -> Result<(), askama::Error> {
        let height = self.config.cover_height;
        let rendered = render_result(&results.result, self.config.phrase_style, height)?;
        let most_recent = match (&results.most_recent, self.config.most_recent_panel) {
            (Some(most_recent), true) => Some(render_most_recent(most_recent, height)?),
            _ => None,
        };

        let context = ResultsContext {
            query: criteria.query,
        };
        let page = &mut self.page;
        page.results_html = rendered.html;
        page.results_text = rendered.text;
        page.most_recent_html = most_recent.map(|r| r.html).unwrap_or_default();
        page.results_headline_visible = true;
        page.email_button.visible = true;
        page.favorite_button.set_label(context.favorite_label());
        page.favorite_button.visible = true;
        page.status_line.clear();
        page.submit_button.restore(SEARCH_LABEL);
        page.scroll_requests += 1;

        info!(
            found = results.result.found(),
            query = context.query.display_name(),
            "Search results rendered"
        );
        self.context = Some(context);
        self.state = CycleState::Rendered;
        Ok(())
    }

    fn fail(&mut self) -> SearchCompletion {
        self.page.notices.push(RETRY_MESSAGE);
        self.page.status_line.clear();
        self.page.submit_button.restore(SEARCH_LABEL);
        self.state = CycleState::Error;
        SearchCompletion::Failed
    }

    // --- Follow-up Actions ---

    /// Adds what was just searched to the user's favorites.
    pub async fn add_favorite(&mut self) -> Result<FavoriteReport, ControllerError> {
        let target = self
            .context
            .as_ref()
            .ok_or(ControllerError::NoResults)?
            .favorite_target(self.config.resolve_series_by_name);
        Ok(self.favorites.add_favorite(&target, &mut self.page.notices).await)
    }

    /// Emails the current contents of the results panel.
    pub async fn send_results_by_email(&mut self) -> Result<String, ControllerError> {
        let context = self.context.as_ref().ok_or(ControllerError::NoResults)?;
        let request = NotificationRequest::for_search_results(
            context.query.display_name(),
            self.page.results_html.clone(),
        );

        let button = if self.config.email_spinner {
            Some(&mut self.page.email_button)
        } else {
            None
        };
        Ok(self
            .notifications
            .send_by_email(&request, button, &mut self.page.notices)
            .await)
    }
}

fn clear_if_diverged(primary: &str, favorite: &mut String) -> SyncEffect {
    if !favorite.is_empty() && favorite.as_str() != primary {
        favorite.clear();
        SyncEffect::FavoriteCleared
    } else {
        SyncEffect::Unchanged
    }
}
