//! crates/bibliofind_core/src/profile.rs
//!
//! The user profile page: update forms, the search history table and
//! emailing that history.

use crate::domain::NotificationRequest;
use crate::notification::NotificationActionHandler;
use crate::page::{Button, Notices};

pub const SHOW_HISTORY_LABEL: &str = "Show Search History";
pub const HIDE_HISTORY_LABEL: &str = "Hide Search History";
pub const HISTORY_EMAIL_TITLE: &str = "Your Search History";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileForm {
    UpdateProfile,
    FavoriteSeries,
    FavoriteAuthors,
}

#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub visible_form: Option<ProfileForm>,
    pub search_history_visible: bool,
    pub history_toggle: Button,
    pub send_history_button: Button,
    /// Rendered search history table, emailed as-is.
    pub search_history_html: String,
    pub loading_overlay_visible: bool,
    pub scroll_requests: u32,
    pub notices: Notices,
}

impl ProfilePage {
    pub fn new(search_history_html: impl Into<String>) -> Self {
        Self {
            visible_form: None,
            search_history_visible: false,
            history_toggle: Button::new(SHOW_HISTORY_LABEL, true),
            send_history_button: Button::new("Send Search History", false),
            search_history_html: search_history_html.into(),
            loading_overlay_visible: false,
            scroll_requests: 0,
            notices: Notices::default(),
        }
    }

    /// Shows one update form, hides the others and scrolls down to it.
    pub fn show_form(&mut self, form: ProfileForm) {
        self.visible_form = Some(form);
        self.scroll_requests += 1;
    }

    pub fn toggle_search_history(&mut self) {
        self.search_history_visible = !self.search_history_visible;
        self.send_history_button.visible = self.search_history_visible;
        let label = if self.search_history_visible {
            HIDE_HISTORY_LABEL
        } else {
            SHOW_HISTORY_LABEL
        };
        self.history_toggle.set_label(label);
    }

    /// A favorite author or series link was followed; cover the page until it loads.
    pub fn follow_favorite_link(&mut self) {
        self.loading_overlay_visible = true;
    }

    pub fn history_email_request(&self) -> NotificationRequest {
        NotificationRequest {
            title: HISTORY_EMAIL_TITLE.to_string(),
            html_body: self.search_history_html.clone(),
        }
    }

    pub async fn email_search_history(&mut self, handler: &NotificationActionHandler) -> String {
        let request = self.history_email_request();
        handler.send_by_email(&request, None, &mut self.notices).await
    }
}
