use std::fmt;

use async_trait::async_trait;

use super::types::{Review, Sentiment};

/// Errors from talking to the review service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The service answered with a non-success status. `message` is the
    /// response body, or a generic status line when the body was empty.
    Request { status: u16, message: String },
    /// Connection refused, DNS failure, dropped connection.
    Network(String),
    /// A success response whose body did not decode.
    Decode(String),
}

impl ApiError {
    /// Builds a `Request` error from a status code and the raw response body.
    pub fn request(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("Request failed with status {status}")
        } else {
            body
        };
        ApiError::Request { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { message, .. } => f.write_str(message),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two review operations the app needs, plus a liveness probe.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Submits review text for analysis. The product name stays local and is
    /// merged into the returned review.
    async fn analyze_review(
        &self,
        product_name: &str,
        review_text: &str,
    ) -> Result<Review, ApiError>;

    /// Lists up to `limit` reviews (0 = service default), optionally filtered.
    async fn list_reviews(
        &self,
        limit: u32,
        sentiment: Option<Sentiment>,
    ) -> Result<Vec<Review>, ApiError>;

    async fn health_check(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_uses_body() {
        let err = ApiError::request(400, "review_text is required".to_string());
        assert_eq!(err.to_string(), "review_text is required");
    }

    #[test]
    fn test_request_error_generic_when_body_empty() {
        let err = ApiError::request(502, "  \n".to_string());
        assert_eq!(err.to_string(), "Request failed with status 502");
        assert!(matches!(err, ApiError::Request { status: 502, .. }));
    }

    #[test]
    fn test_network_error_display() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
