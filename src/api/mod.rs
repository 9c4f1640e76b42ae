pub mod client;
pub mod service;
pub mod types;

pub use client::{DEFAULT_BASE_URL, ReviewClient};
pub use service::{ApiError, ReviewService};
pub use types::{Review, ReviewRecord, Sentiment, SentimentFilter, UNKNOWN_PRODUCT};
