pub mod controller;
pub mod domain;
pub mod favorites;
pub mod forms;
pub mod notification;
pub mod page;
pub mod ports;
pub mod profile;
pub mod render;

#[cfg(test)]
mod testing;

pub use controller::{
    ControllerError, CycleState, FieldChange, PendingSearch, ResultsContext,
    SearchCompletion, SearchInteractionController, SyncEffect,
};
pub use domain::{
    ApiResponse, FavoriteKind, FavoriteTarget, NotificationRequest, Outcome, SearchCriteria,
    SearchEndpoint, SearchMode, SearchQuery, SearchResult, SearchResults, Timeframe,
    ValidationError,
};
pub use favorites::{FavoriteActionHandler, FavoriteReport, FavoriteState, FavoriteStep};
pub use notification::NotificationActionHandler;
pub use page::{Button, ButtonContent, Notices, Page, PageConfig, SeriesOption};
pub use ports::{BibliofindApi, Clock, PortError, PortResult, SystemClock};
