//! Background work for the event loop.
//!
//! Effects returned by `update()` are executed here on tokio tasks. Results
//! come back to the loop as `Action`s over a std channel; tasks never touch
//! `App` directly. Nothing is cancelled: a response that arrives after a
//! newer request was issued is dropped by the reducer's sequence check.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{info, warn};

use crate::api::ReviewService;
use crate::core::action::{Action, Effect};

/// Runs one effect to completion and returns the action reporting its result.
/// `Effect::None` and `Effect::Quit` have no I/O and yield `None`.
pub async fn perform(service: &dyn ReviewService, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchReviews { seq, filter, limit } => {
            let result = service.list_reviews(limit, filter.sentiment()).await;
            Some(Action::ReviewsLoaded { seq, result })
        }
        Effect::Analyze {
            seq,
            product_name,
            review_text,
        } => {
            let result = service.analyze_review(&product_name, &review_text).await;
            Some(Action::AnalysisFinished { seq, result })
        }
        Effect::None | Effect::Quit => None,
    }
}

pub fn spawn_effect(service: Arc<dyn ReviewService>, effect: Effect, tx: Sender<Action>) {
    info!("Spawning request: {:?}", effect);
    tokio::spawn(async move {
        if let Some(action) = perform(service.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}

pub fn spawn_health_check(service: Arc<dyn ReviewService>, tx: Sender<Action>) {
    tokio::spawn(async move {
        let healthy = match service.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Health check failed: {e}");
                false
            }
        };
        if tx.send(Action::HealthChecked(healthy)).is_err() {
            warn!("Failed to deliver health check: receiver dropped");
        }
    });
}
