//! Candidate market records and the feature-table loader.
//!
//! Markets are produced by the upstream feature pipeline and are
//! read-only here. Each holds at most one standardized (z-score)
//! value per criterion; a missing value is a missing feature, which
//! the scorer treats as a zero contribution plus a diagnostic.

use crate::criterion::Criterion;
use crate::types::CountryCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    pub country_code: CountryCode,
    features: BTreeMap<Criterion, f64>,
}

impl Market {
    pub fn new(country_code: impl Into<CountryCode>) -> Self {
        Self {
            country_code: country_code.into(),
            features: BTreeMap::new(),
        }
    }

    /// Builder-style feature attachment, used heavily in tests.
    pub fn with_feature(mut self, criterion: Criterion, standardized: f64) -> Self {
        self.features.insert(criterion, standardized);
        self
    }

    pub fn feature(&self, criterion: Criterion) -> Option<f64> {
        self.features.get(&criterion).copied()
    }

    pub fn features(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.features.iter().map(|(c, v)| (*c, *v))
    }
}

// ── Feature table file ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct FeatureRow {
    country_code: String,
    /// Remaining columns, keyed by standardized field name. Columns the
    /// criterion table does not know about are ignored — the upstream
    /// pipeline carries raw indicator columns we have no use for.
    #[serde(flatten)]
    columns: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct FeatureTableFile {
    markets: Vec<FeatureRow>,
}

/// Load a standardized feature table from a JSON file.
pub fn load_feature_table(path: &str) -> anyhow::Result<Vec<Market>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let file: FeatureTableFile = serde_json::from_str(&content)?;

    let markets = file
        .markets
        .into_iter()
        .map(|row| {
            let mut market = Market::new(row.country_code);
            for criterion in Criterion::ALL {
                if let Some(value) = row.columns.get(criterion.feature_field()) {
                    market.features.insert(criterion, *value);
                }
            }
            market
        })
        .collect();

    Ok(markets)
}
