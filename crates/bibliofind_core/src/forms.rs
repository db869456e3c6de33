//! crates/bibliofind_core/src/forms.rs
//!
//! Small form guards used by the signup, book results and advanced search pages.

use tracing::debug;

use crate::page::{Button, Notices, SEARCH_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,
    #[error("Please select a book to search by!")]
    NoBookSelected,
}

/// The signup form. Submission is blocked until both passwords agree.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub password: String,
    pub password_confirmation: String,
}

impl SignupForm {
    pub fn submit(&self, notices: &mut Notices) -> Result<(), FormError> {
        if self.password != self.password_confirmation {
            notices.push(FormError::PasswordMismatch.to_string());
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// The list of candidate books on the book results page.
#[derive(Debug, Clone)]
pub struct BookPicker {
    pub selected: Option<String>,
    pub submit_button: Button,
}

impl BookPicker {
    pub fn new() -> Self {
        Self {
            selected: None,
            submit_button: Button::new(SEARCH_LABEL, true),
        }
    }

    /// Returns the chosen book and turns the submit button into a spinner
    /// while the next page loads.
    pub fn submit(&mut self, notices: &mut Notices) -> Result<String, FormError> {
        match self.selected.as_deref().map(str::trim) {
            Some(book) if !book.is_empty() => {
                let book = book.to_string();
                debug!(%book, "Searching by book");
                self.submit_button.spin();
                Ok(book)
            }
            _ => {
                notices.push(FormError::NoBookSelected.to_string());
                Err(FormError::NoBookSelected)
            }
        }
    }
}

impl Default for BookPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// The advanced search page shows either the author form or the title form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancedSearchPanels {
    pub author_search_visible: bool,
    pub title_search_visible: bool,
}

impl AdvancedSearchPanels {
    pub fn show_author_search(&mut self) {
        self.author_search_visible = true;
        self.title_search_visible = false;
    }

    pub fn show_title_search(&mut self) {
        self.author_search_visible = false;
        self.title_search_visible = true;
    }
}
