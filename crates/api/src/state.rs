//! Application state

use std::sync::Arc;

use github::IssueCommenter;
use processor::EventHandler;

/// Shared application state
pub struct AppState {
    pub event_handler: EventHandler,
}

impl AppState {
    pub fn new(commenter: Arc<dyn IssueCommenter>) -> Self {
        Self {
            event_handler: EventHandler::new(commenter),
        }
    }
}
