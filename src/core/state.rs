//! # Application State
//!
//! Everything the review screen shows, in one place. No TUI types here;
//! presentation state (focus, scroll offsets, form buffers) lives in `tui`.
//!
//! ```text
//! App
//! ├── is_submitting: bool          // analysis request in flight
//! ├── result: Option<Review>       // latest analysis outcome
//! ├── reviews: Vec<Review>         // list for the active filter
//! ├── reviews_loading: bool        // list request in flight
//! ├── error: Option<String>        // submission error shown to the user
//! ├── filter: SentimentFilter      // active list filter
//! ├── list_limit: u32              // max reviews requested
//! ├── backend: BackendStatus       // result of the health probe
//! ├── status_message: String       // title bar text
//! ├── refresh_seq: u64             // token of the latest list request
//! └── submit_seq: u64              // token of the latest analysis request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{Review, SentimentFilter};
use crate::core::config::{DEFAULT_LIST_LIMIT, ResolvedConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Unknown => "connecting",
            BackendStatus::Online => "online",
            BackendStatus::Offline => "offline",
        }
    }
}

pub struct App {
    pub is_submitting: bool,
    pub result: Option<Review>,
    pub reviews: Vec<Review>,
    pub reviews_loading: bool,
    pub error: Option<String>,
    pub filter: SentimentFilter,
    pub list_limit: u32,
    pub backend: BackendStatus,
    pub status_message: String,
    /// Responses tagged with an older token are stale and dropped.
    pub refresh_seq: u64,
    pub submit_seq: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(SentimentFilter::All, DEFAULT_LIST_LIMIT)
    }
}

impl App {
    pub fn new(filter: SentimentFilter, list_limit: u32) -> Self {
        Self {
            is_submitting: false,
            result: None,
            reviews: Vec::new(),
            reviews_loading: false,
            error: None,
            filter,
            list_limit,
            backend: BackendStatus::Unknown,
            status_message: String::new(),
            refresh_seq: 0,
            submit_seq: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.default_filter, config.list_limit)
    }

    /// True while any request is outstanding (drives animation redraws).
    pub fn is_busy(&self) -> bool {
        self.is_submitting || self.reviews_loading
    }
}
