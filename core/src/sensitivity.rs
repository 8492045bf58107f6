//! Weight-sensitivity analysis over the MCDA scoring.
//!
//! One criterion's weight is swept across a window around its base
//! value while every other weight is rescaled proportionally so each
//! tested vector sums to exactly 1.0. Only the `top_n` best-ranked
//! markets are recorded per test point: the sweep shows rank churn
//! near the top of the table, not full-table volatility.

use crate::criterion::Criterion;
use crate::error::{ModelError, ModelResult};
use crate::market::Market;
use crate::scoring::MarketScorer;
use crate::types::CountryCode;
use crate::weights::WeightVector;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Step size between tested weight values.
    pub step: f64,
    /// Number of evenly spaced test values per criterion.
    pub n_points: usize,
    /// How many top-ranked markets to record at each test value.
    pub top_n: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { step: 0.05, n_points: 200, top_n: 3 }
    }
}

/// One sampled point of a sweep: where a top-ranked market sat when
/// `criterion` was tested at `weight_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub criterion: Criterion,
    pub weight_value: f64,
    pub country_code: CountryCode,
    pub rank: u32,
    pub total_score: f64,
}

pub struct SensitivityAnalyzer {
    base_weights: WeightVector,
    config: SweepConfig,
}

impl SensitivityAnalyzer {
    pub fn new(base_weights: WeightVector, config: SweepConfig) -> Self {
        Self { base_weights, config }
    }

    /// Sweep a single criterion's weight and record the top-ranked
    /// markets at each test value.
    ///
    /// Fails if `criterion` is absent from the base weight vector —
    /// that is a caller error, not a recoverable condition.
    pub fn sweep(
        &self,
        markets: &[Market],
        criterion: Criterion,
    ) -> ModelResult<Vec<SensitivityPoint>> {
        let original = self
            .base_weights
            .get(criterion)
            .ok_or(ModelError::CriterionNotInWeights(criterion))?;

        if self.config.n_points == 0 {
            return Err(ModelError::InvalidSweep {
                reason: "n_points must be at least 1".to_string(),
            });
        }

        let other_sum: f64 = self
            .base_weights
            .iter()
            .filter(|(c, _)| *c != criterion)
            .map(|(_, w)| w)
            .sum();

        let half_span = self.config.step * self.config.n_points as f64 / 2.0;
        let min_weight = (original - half_span).max(0.0);
        let max_weight = (original + half_span).min(1.0);

        let mut points = Vec::with_capacity(self.config.n_points * self.config.top_n);

        for test_weight in linspace(min_weight, max_weight, self.config.n_points) {
            let test_vector = self.rebalanced(criterion, test_weight, other_sum);
            let outcome = MarketScorer::new(test_vector).score(markets);

            for scored in outcome.markets.iter().take(self.config.top_n) {
                points.push(SensitivityPoint {
                    criterion,
                    weight_value: test_weight,
                    country_code: scored.country_code.clone(),
                    rank: scored.rank,
                    total_score: scored.total_score,
                });
            }
        }

        log::debug!(
            "sensitivity: {criterion} swept over [{min_weight:.3}, {max_weight:.3}] \
             at {} points",
            self.config.n_points
        );

        Ok(points)
    }

    /// Run `sweep` independently for every criterion in the base
    /// weight vector.
    pub fn sweep_all(
        &self,
        markets: &[Market],
    ) -> ModelResult<BTreeMap<Criterion, Vec<SensitivityPoint>>> {
        let mut results = BTreeMap::new();
        for criterion in self.base_weights.criteria() {
            results.insert(criterion, self.sweep(markets, criterion)?);
        }
        Ok(results)
    }

    /// Build a test vector with `criterion` pinned at `test_weight` and
    /// the remaining weights scaled so they sum to `1 - test_weight`,
    /// preserving their relative ratios. If the other weights summed to
    /// zero they stay zero.
    fn rebalanced(&self, criterion: Criterion, test_weight: f64, other_sum: f64) -> WeightVector {
        let remaining = 1.0 - test_weight;
        let scale = if other_sum > 0.0 { remaining / other_sum } else { 0.0 };

        WeightVector::from_pairs(self.base_weights.iter().map(|(c, w)| {
            if c == criterion {
                (c, test_weight)
            } else {
                (c, w * scale)
            }
        }))
    }
}

/// `n` evenly spaced values over `[start, stop]`. Both endpoints are
/// emitted exactly, not reconstructed from the step.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
        .collect()
}
