//! crates/bibliofind_core/src/favorites.rs
//!
//! Marks an author or series as a favorite. Targets without a known id go
//! through an explicit resolution step before the favorite is added.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{ApiResponse, FavoriteKind, FavoriteTarget, Outcome};
use crate::page::{Notices, RETRY_MESSAGE};
use crate::ports::{BibliofindApi, PortResult};

pub const AUTHOR_APOLOGY: &str = "Cannot add this author to favorites at this time. Sorry!";
pub const SERIES_APOLOGY: &str = "Cannot add this series to favorites at this time. Sorry!";

/// The step a favorite request is at, or stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStep {
    Resolving,
    Adding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Resolving,
    Adding,
    Done,
    Failed(FavoriteStep),
}

/// The terminal state of one `add_favorite` call and the message shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteReport {
    pub state: FavoriteState,
    pub message: String,
}

impl FavoriteReport {
    pub fn succeeded(&self) -> bool {
        self.state == FavoriteState::Done
    }
}

pub struct FavoriteActionHandler {
    api: Arc<dyn BibliofindApi>,
}

impl FavoriteActionHandler {
    pub fn new(api: Arc<dyn BibliofindApi>) -> Self {
        Self { api }
    }

    /// Adds `target` to the user's favorites and pushes exactly one
    /// acknowledgement describing the outcome onto `notices`.
    pub async fn add_favorite(
        &self,
        target: &FavoriteTarget,
        notices: &mut Notices,
    ) -> FavoriteReport {
        let id = match &target.id {
            Some(id) => id.clone(),
            None => {
                debug!(
                    state = ?FavoriteState::Resolving,
                    kind = %target.kind,
                    name = %target.display_name
                );
                match self.resolve(target).await {
                    Ok(id) => id,
                    Err(message) => {
                        let state = FavoriteState::Failed(FavoriteStep::Resolving);
                        return finish(notices, state, message);
                    }
                }
            }
        };

        debug!(state = ?FavoriteState::Adding, kind = %target.kind, %id);
        let response = match target.kind {
            FavoriteKind::Author => self.api.add_favorite_author(&id).await,
            FavoriteKind::Series => self.api.add_favorite_series(&id).await,
        };

        match response {
            Ok(response) if response.is_ok() => {
                info!("Added {} '{}' to favorites", target.kind, target.display_name);
                finish(notices, FavoriteState::Done, response.message)
            }
            Ok(response) => {
                warn!("Server refused favorite {} '{}': {}", target.kind, id, response.message);
                let message = if response.message.is_empty() {
                    RETRY_MESSAGE.to_string()
                } else {
                    response.message
                };
                finish(notices, FavoriteState::Failed(FavoriteStep::Adding), message)
            }
            Err(e) => {
                warn!("Failed to add favorite {} '{}': {:?}", target.kind, id, e);
                finish(
                    notices,
                    FavoriteState::Failed(FavoriteStep::Adding),
                    RETRY_MESSAGE.to_string(),
                )
            }
        }
    }

    /// Looks up the id for a target known only by name. The error is the
    /// message to show the user.
    async fn resolve(&self, target: &FavoriteTarget) -> Result<String, String> {
        let name = target.display_name.as_str();
        let (response, apology): (PortResult<ApiResponse<String>>, &str) = match target.kind {
            FavoriteKind::Author => (self.api.resolve_author_id(name).await, AUTHOR_APOLOGY),
            FavoriteKind::Series => (self.api.resolve_series_id(name).await, SERIES_APOLOGY),
        };

        match response {
            Ok(ApiResponse {
                outcome: Outcome::Ok,
                payload: Some(id),
                ..
            }) if !id.is_empty() => Ok(id),
            Ok(response) => {
                warn!("Could not resolve {} '{}': {}", target.kind, name, response.message);
                // The series lookup reports its own reason; authors get a fixed apology.
                match target.kind {
                    FavoriteKind::Series if !response.message.is_empty() => Err(response.message),
                    _ => Err(apology.to_string()),
                }
            }
            Err(e) => {
                warn!("Failed to resolve {} '{}': {:?}", target.kind, name, e);
                Err(RETRY_MESSAGE.to_string())
            }
        }
    }
}

fn finish(notices: &mut Notices, state: FavoriteState, message: String) -> FavoriteReport {
    notices.push(message.clone());
    FavoriteReport { state, message }
}
