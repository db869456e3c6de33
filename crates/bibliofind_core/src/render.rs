//! crates/bibliofind_core/src/render.rs
//!
//! Turns search results into the small HTML snippets placed in the results panels.

use askama::Template;
use crate::domain::SearchResult;
use crate::page::PhraseStyle;

pub const NOT_FOUND_TEXT: &str = "No books found in timeframe.";
pub const MOST_RECENT_NOT_FOUND_TEXT: &str = "No books found.";

#[derive(Template)]
#[template(
    source = "{% if let Some(cover) = cover %}<img height='{{ height }}' src='{{ cover }}'> {% endif %}<p>{{ lead }}{% if let Some(trail) = trail %} <br> {{ trail }}{% endif %}</p>",
    ext = "html"
)]
struct ResultSnippet<'a> {
    cover: Option<&'a str>,
    height: u32,
    lead: &'a str,
    trail: Option<&'a str>,
}

/// A rendered result: the markup for the panel and the same phrase as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub html: String,
    pub text: String,
}

/// Renders the timeframe-bounded result.
///
/// A result without a title is the "nothing in this timeframe" signal and always
/// renders the fixed not-found text; absent fields are never interpolated.
pub fn render_result(
    result: &SearchResult,
    style: PhraseStyle,
    cover_height: u32,
) -> Result<RenderedResult, askama::Error> {
    let (lead, trail) = match (&result.title, style) {
        (None, _) => (NOT_FOUND_TEXT.to_string(), None),
        (Some(title), PhraseStyle::Sentence) => (sentence("Results", title, result), None),
        (Some(title), PhraseStyle::TwoLine) => match &result.publication_date {
            Some(date) => (title.clone(), Some(format!("{}.", date))),
            None => (format!("{}.", title), None),
        },
    };
    snippet(result, cover_height, lead, trail)
}

/// Renders the unrestricted "most recent" book shown next to the main result.
pub fn render_most_recent(
    result: &SearchResult,
    cover_height: u32,
) -> Result<RenderedResult, askama::Error> {
    let lead = match &result.title {
        Some(title) => sentence("Most recent", title, result),
        None => MOST_RECENT_NOT_FOUND_TEXT.to_string(),
    };
    snippet(result, cover_height, lead, None)
}

fn sentence(prefix: &str, title: &str, result: &SearchResult) -> String {
    match &result.publication_date {
        Some(date) => format!("{}: {}, publication date: {}.", prefix, title, date),
        None => format!("{}: {}.", prefix, title),
    }
}

fn snippet(
    result: &SearchResult,
    cover_height: u32,
    lead: String,
    trail: Option<String>,
) -> Result<RenderedResult, askama::Error> {
    // Not-found results carry no usable cover.
    let cover = result
        .title
        .as_ref()
        .and(result.cover_image_url.as_deref())
        .filter(|url| !url.is_empty());

    let html = ResultSnippet {
        cover,
        height: cover_height,
        lead: &lead,
        trail: trail.as_deref(),
    }
    .render()?;

    let text = match trail {
        Some(trail) => format!("{} {}", lead, trail),
        None => lead,
    };
    Ok(RenderedResult { html, text })
}
