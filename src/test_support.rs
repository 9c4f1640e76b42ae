//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, Review, ReviewRecord, ReviewService, Sentiment};

/// A wire record with only the required fields set.
pub fn record(id: i64, text: &str, sentiment: Sentiment) -> ReviewRecord {
    ReviewRecord {
        id: Some(id),
        product_name: None,
        review_text: text.to_string(),
        sentiment,
        sentiment_score: 0.9,
        created_at: None,
        key_points: None,
    }
}

/// A normalized review named "Unknown Product".
pub fn review(id: i64, text: &str, sentiment: Sentiment) -> Review {
    Review::from_record(record(id, text, sentiment), None)
}

/// Flattens a ratatui buffer into one string for `contains` assertions.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

/// In-memory `ReviewService` with canned responses that records list calls.
pub struct FakeService {
    reviews: Vec<Review>,
    failure: Option<ApiError>,
    list_calls: Mutex<Vec<(u32, Option<Sentiment>)>>,
    analyze_calls: Mutex<Vec<(String, String)>>,
}

impl FakeService {
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            failure: None,
            list_calls: Mutex::new(Vec::new()),
            analyze_calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: ApiError) -> Self {
        Self {
            reviews: Vec::new(),
            failure: Some(error),
            list_calls: Mutex::new(Vec::new()),
            analyze_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn list_calls(&self) -> Vec<(u32, Option<Sentiment>)> {
        self.list_calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// `(product_name, review_text)` for every analyze request received.
    pub fn analyze_calls(&self) -> Vec<(String, String)> {
        self.analyze_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReviewService for FakeService {
    async fn analyze_review(
        &self,
        product_name: &str,
        review_text: &str,
    ) -> Result<Review, ApiError> {
        if let Ok(mut calls) = self.analyze_calls.lock() {
            calls.push((product_name.to_string(), review_text.to_string()));
        }
        self.check()?;
        let mut rec = record(100, review_text, Sentiment::Positive);
        rec.key_points = Some("Positive overall".to_string());
        Ok(Review::from_record(rec, Some(product_name)))
    }

    async fn list_reviews(
        &self,
        limit: u32,
        sentiment: Option<Sentiment>,
    ) -> Result<Vec<Review>, ApiError> {
        if let Ok(mut calls) = self.list_calls.lock() {
            calls.push((limit, sentiment));
        }
        self.check()?;
        Ok(self
            .reviews
            .iter()
            .filter(|r| sentiment.is_none_or(|s| r.sentiment == s))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        self.check()
    }
}
