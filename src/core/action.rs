//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User picks a filter? That's `Action::SetFilter(filter)`.
//! The service answers? That's `Action::ReviewsLoaded { seq, result }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the caller should start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every request carries a sequence token. A response whose token is not the
//! latest issued for its kind is stale and is dropped, so a slow response to
//! an old filter can never overwrite the list for the current one.

use log::{debug, info, warn};

use crate::api::{ApiError, Review, SentimentFilter};
use crate::core::state::{App, BackendStatus};

/// Shown when a failed submission carries no message of its own.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone)]
pub enum Action {
    /// The screen was mounted; load the list for the active filter.
    Init,
    SetFilter(SentimentFilter),
    Refresh,
    Submit {
        product_name: String,
        review_text: String,
    },
    AnalysisFinished {
        seq: u64,
        result: Result<Review, ApiError>,
    },
    ReviewsLoaded {
        seq: u64,
        result: Result<Vec<Review>, ApiError>,
    },
    HealthChecked(bool),
    Quit,
}

/// I/O requested by `update`. Executed by the adapter, never by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchReviews {
        seq: u64,
        filter: SentimentFilter,
        limit: u32,
    },
    Analyze {
        seq: u64,
        product_name: String,
        review_text: String,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init | Action::Refresh => start_refresh(app),
        Action::SetFilter(filter) => {
            if filter == app.filter {
                return Effect::None;
            }
            info!("Filter changed: {:?} -> {:?}", app.filter, filter);
            app.filter = filter;
            start_refresh(app)
        }
        Action::Submit {
            product_name,
            review_text,
        } => {
            if app.is_submitting {
                debug!("Submit ignored: analysis already in flight");
                return Effect::None;
            }
            app.error = None;
            app.result = None;
            app.is_submitting = true;
            app.submit_seq += 1;
            app.status_message = "Analyzing...".to_string();
            Effect::Analyze {
                seq: app.submit_seq,
                product_name,
                review_text,
            }
        }
        Action::AnalysisFinished { seq, result } => {
            if seq != app.submit_seq {
                info!("Dropping stale analysis response (seq={seq}, latest={})", app.submit_seq);
                return Effect::None;
            }
            app.is_submitting = false;
            match result {
                Ok(review) => {
                    app.status_message = format!(
                        "Analyzed: {} ({})",
                        review.sentiment.as_str(),
                        review.score_percent()
                    );
                    app.result = Some(review);
                    start_refresh(app)
                }
                Err(err) => {
                    warn!("Analysis failed: {err}");
                    let message = err.to_string();
                    app.error = Some(if message.trim().is_empty() {
                        GENERIC_SUBMIT_ERROR.to_string()
                    } else {
                        message
                    });
                    app.status_message = "Analysis failed".to_string();
                    Effect::None
                }
            }
        }
        Action::ReviewsLoaded { seq, result } => {
            if seq != app.refresh_seq {
                info!("Dropping stale review list (seq={seq}, latest={})", app.refresh_seq);
                return Effect::None;
            }
            app.reviews_loading = false;
            match result {
                Ok(reviews) => {
                    debug!("Review list updated: {} items", reviews.len());
                    app.reviews = reviews;
                }
                // List failures stay out of the UI; the previous list remains.
                Err(err) => warn!("Error fetching reviews: {err}"),
            }
            Effect::None
        }
        Action::HealthChecked(healthy) => {
            app.backend = if healthy {
                BackendStatus::Online
            } else {
                BackendStatus::Offline
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_refresh(app: &mut App) -> Effect {
    app.refresh_seq += 1;
    app.reviews_loading = true;
    Effect::FetchReviews {
        seq: app.refresh_seq,
        filter: app.filter,
        limit: app.list_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Sentiment;
    use crate::test_support::review;

    fn submit(app: &mut App, name: &str, text: &str) -> Effect {
        update(
            app,
            Action::Submit {
                product_name: name.to_string(),
                review_text: text.to_string(),
            },
        )
    }

    #[test]
    fn test_init_requests_active_filter() {
        let mut app = App::new(SentimentFilter::Negative, 25);
        let effect = update(&mut app, Action::Init);
        assert_eq!(
            effect,
            Effect::FetchReviews {
                seq: 1,
                filter: SentimentFilter::Negative,
                limit: 25,
            }
        );
        assert!(app.reviews_loading);
    }

    #[test]
    fn test_set_filter_triggers_refresh() {
        let mut app = App::default();
        let effect = update(&mut app, Action::SetFilter(SentimentFilter::Positive));
        assert!(matches!(
            effect,
            Effect::FetchReviews {
                filter: SentimentFilter::Positive,
                ..
            }
        ));
        assert_eq!(app.filter, SentimentFilter::Positive);
        assert!(app.reviews_loading);
    }

    #[test]
    fn test_set_same_filter_is_noop() {
        let mut app = App::default();
        let effect = update(&mut app, Action::SetFilter(SentimentFilter::All));
        assert_eq!(effect, Effect::None);
        assert!(!app.reviews_loading);
        assert_eq!(app.refresh_seq, 0);
    }

    #[test]
    fn test_reviews_loaded_replaces_list() {
        let mut app = App::default();
        update(&mut app, Action::Init);
        let reviews = vec![review(1, "Lovely kettle", Sentiment::Positive)];
        update(
            &mut app,
            Action::ReviewsLoaded {
                seq: 1,
                result: Ok(reviews.clone()),
            },
        );
        assert_eq!(app.reviews, reviews);
        assert!(!app.reviews_loading);
    }

    #[test]
    fn test_list_failure_is_not_surfaced() {
        let mut app = App::default();
        app.reviews = vec![review(1, "Old entry here", Sentiment::Neutral)];
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::ReviewsLoaded {
                seq: 1,
                result: Err(ApiError::request(500, "boom".to_string())),
            },
        );
        assert!(app.error.is_none());
        assert!(!app.reviews_loading);
        assert_eq!(app.reviews.len(), 1);
    }

    #[test]
    fn test_stale_list_response_is_dropped() {
        let mut app = App::default();
        update(&mut app, Action::SetFilter(SentimentFilter::Positive)); // seq 1
        update(&mut app, Action::SetFilter(SentimentFilter::Negative)); // seq 2

        // The negative list arrives first, then the slower positive one.
        let negative = vec![review(2, "Broke in a day", Sentiment::Negative)];
        update(
            &mut app,
            Action::ReviewsLoaded {
                seq: 2,
                result: Ok(negative.clone()),
            },
        );
        let effect = update(
            &mut app,
            Action::ReviewsLoaded {
                seq: 1,
                result: Ok(vec![review(1, "Great value", Sentiment::Positive)]),
            },
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.reviews, negative);
        assert_eq!(app.filter, SentimentFilter::Negative);
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut app = App::default();
        update(&mut app, Action::Refresh); // seq 1
        update(&mut app, Action::Refresh); // seq 2
        update(
            &mut app,
            Action::ReviewsLoaded {
                seq: 1,
                result: Ok(vec![]),
            },
        );
        assert!(app.reviews_loading);
    }

    #[test]
    fn test_submit_clears_previous_state() {
        let mut app = App::default();
        app.error = Some("old error".to_string());
        app.result = Some(review(1, "Earlier review", Sentiment::Positive));

        let effect = submit(&mut app, "Widget", "This works great for me");

        assert!(app.error.is_none());
        assert!(app.result.is_none());
        assert!(app.is_submitting);
        assert_eq!(
            effect,
            Effect::Analyze {
                seq: 1,
                product_name: "Widget".to_string(),
                review_text: "This works great for me".to_string(),
            }
        );
    }

    #[test]
    fn test_submit_while_submitting_is_ignored() {
        let mut app = App::default();
        submit(&mut app, "", "first review text");
        let effect = submit(&mut app, "", "second review text");
        assert_eq!(effect, Effect::None);
        assert_eq!(app.submit_seq, 1);
    }

    #[test]
    fn test_analysis_success_stores_result_and_refreshes() {
        let mut app = App::default();
        submit(&mut app, "Widget", "This works great for me");

        let mut analyzed = review(7, "This works great for me", Sentiment::Positive);
        analyzed.product_name = "Widget".to_string();
        let effect = update(
            &mut app,
            Action::AnalysisFinished {
                seq: 1,
                result: Ok(analyzed.clone()),
            },
        );

        assert!(!app.is_submitting);
        assert_eq!(app.result, Some(analyzed));
        assert!(matches!(effect, Effect::FetchReviews { seq: 1, .. }));
        assert!(app.reviews_loading);
    }

    #[test]
    fn test_analysis_failure_surfaces_message() {
        let mut app = App::default();
        submit(&mut app, "", "This works great for me");
        let effect = update(
            &mut app,
            Action::AnalysisFinished {
                seq: 1,
                result: Err(ApiError::request(
                    400,
                    r#"{"error": "review_text is required"}"#.to_string(),
                )),
            },
        );

        assert_eq!(effect, Effect::None);
        assert!(!app.is_submitting);
        assert!(app.result.is_none());
        assert_eq!(
            app.error.as_deref(),
            Some(r#"{"error": "review_text is required"}"#)
        );
    }

    #[test]
    fn test_analysis_failure_without_message_uses_generic() {
        let mut app = App::default();
        submit(&mut app, "", "This works great for me");
        update(
            &mut app,
            Action::AnalysisFinished {
                seq: 1,
                result: Err(ApiError::Request {
                    status: 500,
                    message: String::new(),
                }),
            },
        );
        assert_eq!(app.error.as_deref(), Some(GENERIC_SUBMIT_ERROR));
    }

    #[test]
    fn test_stale_analysis_is_dropped() {
        let mut app = App::default();
        submit(&mut app, "", "This works great for me");
        let effect = update(
            &mut app,
            Action::AnalysisFinished {
                seq: 0,
                result: Ok(review(1, "Some other one", Sentiment::Negative)),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.is_submitting);
        assert!(app.result.is_none());
    }

    #[test]
    fn test_health_checked() {
        let mut app = App::default();
        update(&mut app, Action::HealthChecked(true));
        assert_eq!(app.backend, BackendStatus::Online);
        update(&mut app, Action::HealthChecked(false));
        assert_eq!(app.backend, BackendStatus::Offline);
    }

    #[test]
    fn test_quit() {
        let mut app = App::default();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
