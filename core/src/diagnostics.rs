//! Structured diagnostics returned alongside primary results.
//!
//! RULE: The library never writes warnings to a console stream.
//! Non-fatal conditions (weight-sum drift, missing features) become
//! `Diagnostic` records the caller can inspect, log, or ignore. A
//! `log::warn!` sibling is emitted for operators tailing a run, but
//! the record is the source of truth.

use crate::criterion::Criterion;
use crate::types::CountryCode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The supplied weight vector summed to `sum` instead of 1.0
    /// (beyond the 0.01 tolerance) and was renormalized proportionally.
    WeightSumDeviation { sum: f64 },

    /// A criterion carried a weight but the market record has no
    /// standardized value for it; its contribution was taken as zero.
    MissingFeature {
        country_code: CountryCode,
        criterion: Criterion,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeightSumDeviation { sum } => {
                write!(f, "weights sum to {sum:.3}, not 1.0; renormalized")
            }
            Self::MissingFeature { country_code, criterion } => {
                write!(f, "{country_code}: no standardized value for '{criterion}'")
            }
        }
    }
}
