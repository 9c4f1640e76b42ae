//! HTTP client for the review sentiment service.
//!
//! Each call is a single request with no retries or caching. Non-success
//! statuses become [`ApiError::Request`] carrying the body text the service
//! sent back.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::service::{ApiError, ReviewService};
use super::types::{AnalyzeRequest, Review, ReviewRecord, Sentiment};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

pub struct ReviewClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReviewClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turns a response into `T`, or into an `ApiError` on non-success status.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    debug!("Review service response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Review service error: {} - {}", status.as_u16(), body);
        return Err(ApiError::request(status.as_u16(), body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl ReviewService for ReviewClient {
    async fn analyze_review(
        &self,
        product_name: &str,
        review_text: &str,
    ) -> Result<Review, ApiError> {
        info!(
            "Submitting review for analysis: product={:?}, text_len={}",
            product_name,
            review_text.len()
        );

        let response = self
            .client
            .post(self.endpoint("analyze-review"))
            .json(&AnalyzeRequest { review_text })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let record: ReviewRecord = read_json(response).await?;
        let review = Review::from_record(record, Some(product_name));
        info!(
            "Analysis complete: sentiment={}, score={:.3}",
            review.sentiment.as_str(),
            review.sentiment_score
        );
        Ok(review)
    }

    async fn list_reviews(
        &self,
        limit: u32,
        sentiment: Option<Sentiment>,
    ) -> Result<Vec<Review>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if limit > 0 {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sentiment) = sentiment {
            params.push(("sentiment", sentiment.as_str().to_string()));
        }

        info!("Fetching reviews: limit={}, sentiment={:?}", limit, sentiment);

        let response = self
            .client
            .get(self.endpoint("reviews"))
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let records: Vec<ReviewRecord> = read_json(response).await?;
        debug!("Received {} reviews", records.len());

        Ok(records
            .into_iter()
            .map(|record| Review::from_record(record, None))
            .collect())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let _: serde_json::Value = read_json(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ReviewClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.endpoint("reviews"),
            "http://localhost:5000/api/reviews"
        );
    }
}
