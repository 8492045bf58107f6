//! MCDA scoring — weighted-sum ranking of candidate markets.
//!
//! The scorer is a pure function of its inputs. It never touches the
//! filesystem or any shared state; all non-fatal conditions surface
//! as `Diagnostic` records on the returned outcome.

use crate::criterion::Criterion;
use crate::diagnostics::Diagnostic;
use crate::market::Market;
use crate::types::CountryCode;
use crate::weights::WeightVector;
use serde::Serialize;
use std::collections::BTreeMap;

/// One market with its weighted score, dense rank, and per-criterion
/// contribution breakdown for downstream attribution charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMarket {
    pub country_code: CountryCode,
    pub total_score: f64,
    /// Dense ("min") rank on descending total_score. 1 = best; tied
    /// markets share a rank and the next distinct score resumes at
    /// (count strictly above) + 1.
    pub rank: u32,
    /// `weight * standardized_value` per criterion present in both the
    /// weight vector and the market record.
    pub contributions: BTreeMap<Criterion, f64>,
}

/// The ranked table plus every diagnostic raised while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    /// Ordered by ascending rank, ties broken by country code.
    pub markets: Vec<ScoredMarket>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct MarketScorer {
    weights: WeightVector,
}

impl MarketScorer {
    pub fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Score and rank the given markets under this scorer's weights.
    pub fn score(&self, markets: &[Market]) -> ScoreOutcome {
        let mut diagnostics = Vec::new();
        let weights = self.weights.normalized(&mut diagnostics);

        let mut scored: Vec<ScoredMarket> = markets
            .iter()
            .map(|market| {
                let mut total_score = 0.0;
                let mut contributions = BTreeMap::new();

                for (criterion, weight) in weights.iter() {
                    match market.feature(criterion) {
                        Some(value) => {
                            let contribution = weight * value;
                            total_score += contribution;
                            contributions.insert(criterion, contribution);
                        }
                        None => {
                            log::warn!(
                                "{}: no standardized value for '{criterion}'; contribution is 0",
                                market.country_code
                            );
                            diagnostics.push(Diagnostic::MissingFeature {
                                country_code: market.country_code.clone(),
                                criterion,
                            });
                        }
                    }
                }

                ScoredMarket {
                    country_code: market.country_code.clone(),
                    total_score,
                    rank: 0, // assigned below
                    contributions,
                }
            })
            .collect();

        assign_dense_ranks(&mut scored);
        scored.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| a.country_code.cmp(&b.country_code))
        });

        ScoreOutcome { markets: scored, diagnostics }
    }
}

/// rank = 1 + (number of markets with strictly greater total_score).
/// Tied scores therefore share a rank ("min" semantics).
fn assign_dense_ranks(scored: &mut [ScoredMarket]) {
    let totals: Vec<f64> = scored.iter().map(|m| m.total_score).collect();
    for market in scored.iter_mut() {
        let strictly_above = totals.iter().filter(|t| **t > market.total_score).count();
        market.rank = strictly_above as u32 + 1;
    }
}
