//! Session-level fold of per-item validation results.

use crate::model::ValidationResult;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Summary of every item validated in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AggregatedResult {
    /// Sum of item scores.
    total_score: f64,
    /// Items marked correct.
    total_correct: usize,
    /// Items marked incorrect.
    total_incorrect: usize,
    /// Sum of per-item errors.
    total_errors: u32,
    /// Unweighted mean of per-item percentages, rounded to two decimals.
    percentage: f64,
    /// Per-item results in validation order.
    items: Vec<ValidationResult>,
}

impl AggregatedResult {
    /// Number of items folded in.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Append-only list of item results for the running session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultAggregator {
    results: Vec<ValidationResult>,
}

impl ResultAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the result of a finalized item.
    pub fn append(&mut self, result: ValidationResult) {
        self.results.push(result);
    }

    /// Results appended so far.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Drops every result; only a retry does this.
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Folds the appended results into a summary.
    ///
    /// The percentage is the plain mean of each item's own percentage, so a
    /// short item weighs as much as a long one.
    #[instrument(skip(self), fields(items = self.results.len()))]
    pub fn summarize(&self) -> AggregatedResult {
        let total_score = self.results.iter().map(|r| *r.score()).sum();
        let total_correct = self.results.iter().filter(|r| *r.is_correct()).count();
        let total_errors = self.results.iter().map(ValidationResult::effective_errors).sum();

        let percentage = if self.results.is_empty() {
            0.0
        } else {
            let sum: f64 = self
                .results
                .iter()
                .map(ValidationResult::effective_percentage)
                .sum();
            round2(sum / self.results.len() as f64)
        };

        let summary = AggregatedResult {
            total_score,
            total_correct,
            total_incorrect: self.results.len() - total_correct,
            total_errors,
            percentage,
            items: self.results.clone(),
        };
        info!(
            total_score = summary.total_score,
            total_correct = summary.total_correct,
            percentage = summary.percentage,
            "Session aggregated"
        );
        summary
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
