//! crates/bibliofind_core/src/page.rs
//!
//! The explicit, typed state of a search page and the per-page configuration
//! that parameterizes the interaction components.

use crate::domain::{SearchEndpoint, SearchMode, Timeframe};

pub const SEARCH_LABEL: &str = "Search";
pub const EMAIL_LABEL: &str = "Send Results to Email";
pub const SEARCHING_TEXT: &str = "Searching...";
pub const RETRY_MESSAGE: &str = "An error occurred. Please try again.";

//=========================================================================================
// Page Configuration
//=========================================================================================

/// How a page shows that a search is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressIndicator {
    /// Writes "Searching..." into the status line.
    StatusText,
    /// Replaces the submit button's content with a spinner.
    Spinner,
}

/// How a page phrases a found result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseStyle {
    /// `Results: {title}, publication date: {date}.`
    Sentence,
    /// `{title} <br> {date}.`
    TwoLine,
}

/// Where local validation messages are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSurface {
    StatusLine,
    Acknowledgement,
}

/// Per-page parameters for the shared search controller.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub endpoint: SearchEndpoint,
    pub modes: Vec<SearchMode>,
    /// Whether the page has "favorite author" / "favorite series" selectors.
    pub favorite_fields: bool,
    /// Whether the page has a panel for the unrestricted most-recent book.
    pub most_recent_panel: bool,
    pub progress: ProgressIndicator,
    pub phrase_style: PhraseStyle,
    pub cover_height: u32,
    pub validation_surface: ValidationSurface,
    /// Series favorites go through name resolution instead of the known id.
    pub resolve_series_by_name: bool,
    /// Show a spinner on the email button while the email request runs.
    pub email_spinner: bool,
}

impl PageConfig {
    /// The combined author/series search page.
    pub fn search_page() -> Self {
        Self {
            endpoint: SearchEndpoint::Search,
            modes: vec![SearchMode::Author, SearchMode::Series],
            favorite_fields: true,
            most_recent_panel: false,
            progress: ProgressIndicator::StatusText,
            phrase_style: PhraseStyle::Sentence,
            cover_height: 200,
            validation_surface: ValidationSurface::StatusLine,
            resolve_series_by_name: false,
            email_spinner: false,
        }
    }

    /// The page listing a user's series, where one is picked and searched.
    pub fn series_results_page() -> Self {
        Self {
            endpoint: SearchEndpoint::SeriesResult,
            modes: vec![SearchMode::Series],
            favorite_fields: false,
            most_recent_panel: true,
            progress: ProgressIndicator::Spinner,
            phrase_style: PhraseStyle::TwoLine,
            cover_height: 150,
            validation_surface: ValidationSurface::Acknowledgement,
            resolve_series_by_name: true,
            email_spinner: true,
        }
    }

    pub fn supports(&self, mode: SearchMode) -> bool {
        self.modes.contains(&mode)
    }
}

//=========================================================================================
// Page Widgets
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonContent {
    Text(String),
    Spinner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub visible: bool,
    pub enabled: bool,
    pub content: ButtonContent,
}

impl Button {
    pub fn new(label: &str, visible: bool) -> Self {
        Self {
            visible,
            enabled: true,
            content: ButtonContent::Text(label.to_string()),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match &self.content {
            ButtonContent::Text(label) => Some(label),
            ButtonContent::Spinner => None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.content == ButtonContent::Spinner
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.content = ButtonContent::Text(label.into());
    }

    /// Shows the spinner and disables the button until `restore` is called.
    pub fn spin(&mut self) {
        self.content = ButtonContent::Spinner;
        self.enabled = false;
    }

    pub fn restore(&mut self, label: &str) {
        self.set_label(label);
        self.enabled = true;
    }
}

/// Blocking acknowledgements ("alerts") waiting to be shown to the user, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    pending: Vec<String>,
}

impl Notices {
    pub fn push(&mut self, message: impl Into<String>) {
        self.pending.push(message.into());
    }

    pub fn last(&self) -> Option<&str> {
        self.pending.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes every pending acknowledgement, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}

/// One entry of the series selector / series radio list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesOption {
    pub id: String,
    pub name: String,
}

//=========================================================================================
// Page State
//=========================================================================================

/// Everything the user can see on a search page.
#[derive(Debug, Clone)]
pub struct Page {
    // --- Form panels ---
    pub search_form_visible: bool,
    pub author_field_visible: bool,
    pub favorite_author_field_visible: bool,
    pub series_field_visible: bool,
    pub favorite_series_field_visible: bool,

    // --- Form fields ---
    pub author: String,
    pub favorite_author: String,
    pub series: String,
    pub favorite_series: String,
    pub series_options: Vec<SeriesOption>,
    pub timeframe: Timeframe,

    // --- Results ---
    /// The short status line under the form (validation messages, "Searching...").
    pub status_line: String,
    pub results_headline_visible: bool,
    pub results_html: String,
    /// Plain-text phrase of the last rendered result.
    pub results_text: String,
    pub most_recent_html: String,

    // --- Buttons ---
    pub submit_button: Button,
    pub favorite_button: Button,
    pub email_button: Button,

    /// Incremented whenever the page asks to scroll down to the results.
    pub scroll_requests: u32,
    pub notices: Notices,
}

impl Page {
    pub fn new(series_options: Vec<SeriesOption>) -> Self {
        Self {
            search_form_visible: false,
            author_field_visible: false,
            favorite_author_field_visible: false,
            series_field_visible: false,
            favorite_series_field_visible: false,
            author: String::new(),
            favorite_author: String::new(),
            series: String::new(),
            favorite_series: String::new(),
            series_options,
            timeframe: Timeframe::default(),
            status_line: String::new(),
            results_headline_visible: false,
            results_html: String::new(),
            results_text: String::new(),
            most_recent_html: String::new(),
            submit_button: Button::new(SEARCH_LABEL, true),
            favorite_button: Button::new("", false),
            email_button: Button::new(EMAIL_LABEL, false),
            scroll_requests: 0,
            notices: Notices::default(),
        }
    }

    /// The label shown for a series id, falling back to the id itself.
    pub fn series_name(&self, id: &str) -> String {
        self.series_options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Empties every results panel and hides the follow-up actions.
    pub fn clear_results(&mut self) {
        self.status_line.clear();
        self.results_headline_visible = false;
        self.results_html.clear();
        self.results_text.clear();
        self.most_recent_html.clear();
        self.favorite_button.visible = false;
        self.email_button.visible = false;
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
