//! Criterion weight vectors.

use crate::criterion::Criterion;
use crate::diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How far the weight sum may drift from 1.0 before the vector is
/// renormalized and a diagnostic is recorded.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// A mapping from criterion to a non-negative weight.
///
/// Presence matters: a criterion absent from the vector is not the
/// same as a criterion with weight 0.0 — sensitivity sweeps reject
/// absent criteria. Backed by a BTreeMap so iteration order is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector {
    weights: BTreeMap<Criterion, f64>,
}

impl WeightVector {
    pub fn new() -> Self {
        Self { weights: BTreeMap::new() }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Criterion, f64)>) -> Self {
        Self { weights: pairs.into_iter().collect() }
    }

    pub fn set(&mut self, criterion: Criterion, weight: f64) {
        self.weights.insert(criterion, weight);
    }

    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        self.weights.get(&criterion).copied()
    }

    pub fn contains(&self, criterion: Criterion) -> bool {
        self.weights.contains_key(&criterion)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, *w))
    }

    pub fn criteria(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.weights.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Returns a vector whose weights sum to 1.0 within tolerance.
    ///
    /// If the sum already lies within `WEIGHT_SUM_TOLERANCE` of 1.0 the
    /// vector is returned unchanged. Otherwise every weight is scaled
    /// proportionally and a `WeightSumDeviation` diagnostic is pushed.
    /// A zero-sum vector cannot be rescaled and is returned as-is
    /// (every market then scores 0.0, which is still well-defined).
    pub fn normalized(&self, diagnostics: &mut Vec<Diagnostic>) -> WeightVector {
        let total = self.sum();
        if (total - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return self.clone();
        }

        log::warn!("weights sum to {total:.3}, not 1.0; renormalizing");
        diagnostics.push(Diagnostic::WeightSumDeviation { sum: total });

        if total <= 0.0 {
            return self.clone();
        }

        let scaled = self
            .weights
            .iter()
            .map(|(c, w)| (*c, w / total))
            .collect();
        WeightVector { weights: scaled }
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::new()
    }
}
