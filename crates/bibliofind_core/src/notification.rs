//! crates/bibliofind_core/src/notification.rs
//!
//! Sends an HTML snapshot (rendered results, search history) to the user's email.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::NotificationRequest;
use crate::page::{Button, Notices, RETRY_MESSAGE};
use crate::ports::BibliofindApi;

pub struct NotificationActionHandler {
    api: Arc<dyn BibliofindApi>,
}

impl NotificationActionHandler {
    pub fn new(api: Arc<dyn BibliofindApi>) -> Self {
        Self { api }
    }

    /// Posts `request` to the email endpoint and surfaces the server's status
    /// message verbatim. When `button` is given it shows a spinner for the
    /// duration of the request and gets its label back afterwards.
    ///
    /// Returns the message that was surfaced.
    pub async fn send_by_email(
        &self,
        request: &NotificationRequest,
        button: Option<&mut Button>,
        notices: &mut Notices,
    ) -> String {
        let restore = button.map(|button| {
            let label = button.label().unwrap_or_default().to_string();
            button.spin();
            (button, label)
        });

        let message = match self.api.email_results(request).await {
            Ok(response) => {
                info!("Email request for '{}' answered: {}", request.title, response.message);
                response.message
            }
            Err(e) => {
                warn!("Failed to send '{}' by email: {:?}", request.title, e);
                RETRY_MESSAGE.to_string()
            }
        };

        if let Some((button, label)) = restore {
            button.restore(&label);
        }
        notices.push(message.clone());
        message
    }
}
