//! Submission counters and the /health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::routes::ApiState;

/// Process-wide submission counters. Handlers bump, /health reads.
#[derive(Debug, Default)]
pub struct SubmissionStats {
    submissions: AtomicU64,
    predictions: AtomicU64,
    constraint_violations: AtomicU64,
    rejected_inputs: AtomicU64,
    prediction_failures: AtomicU64,
}

/// How a single submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Predicted,
    ConstraintViolation,
    RejectedInput,
    PredictionFailure,
}

impl SubmissionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: Outcome) {
        self.submissions.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Predicted => &self.predictions,
            Outcome::ConstraintViolation => &self.constraint_violations,
            Outcome::RejectedInput => &self.rejected_inputs,
            Outcome::PredictionFailure => &self.prediction_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SubmissionCounts {
        SubmissionCounts {
            submissions: self.submissions.load(Ordering::Relaxed),
            predictions: self.predictions.load(Ordering::Relaxed),
            constraint_violations: self.constraint_violations.load(Ordering::Relaxed),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
            prediction_failures: self.prediction_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionCounts {
    pub submissions: u64,
    pub predictions: u64,
    pub constraint_violations: u64,
    pub rejected_inputs: u64,
    pub prediction_failures: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub classes: Vec<String>,
    pub concert_types: usize,
    pub classifier_trees: usize,
    pub regressor_trees: usize,
    pub counts: SubmissionCounts,
    pub prediction_p50_us: Option<u64>,
    pub prediction_p95_us: Option<u64>,
    pub prediction_p99_us: Option<u64>,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let (p50, p95, p99) = state.latency.percentiles();
    let models = &state.models;
    Json(HealthResponse {
        status: "ok",
        classes: models.classifier.classes().to_vec(),
        concert_types: models.classifier.valid_concert_types().len(),
        classifier_trees: models.classifier.tree_count(),
        regressor_trees: models.regressor.tree_count(),
        counts: state.stats.snapshot(),
        prediction_p50_us: p50,
        prediction_p95_us: p95,
        prediction_p99_us: p99,
    })
}
