//! The closed set of ranking criteria.
//!
//! RULE: Criteria are a fixed enumeration, not free-form strings.
//! Every criterion maps to exactly one standardized feature field in
//! the input table, and parsing rejects unknown names outright — a
//! typo in a weights file is a load error, never a silent zero weight.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    MarketSize,
    PurchasingPower,
    DigitalReadiness,
    GovernanceRisk,
    CorruptionRisk,
}

impl Criterion {
    /// Every criterion, in a stable order. Never reorder — downstream
    /// tables iterate this to get deterministic column order.
    pub const ALL: [Criterion; 5] = [
        Criterion::MarketSize,
        Criterion::PurchasingPower,
        Criterion::DigitalReadiness,
        Criterion::GovernanceRisk,
        Criterion::CorruptionRisk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketSize => "market_size",
            Self::PurchasingPower => "purchasing_power",
            Self::DigitalReadiness => "digital_readiness",
            Self::GovernanceRisk => "governance_risk",
            Self::CorruptionRisk => "corruption_risk",
        }
    }

    /// The standardized (z-score) column this criterion reads from the
    /// feature table built by the upstream feature pipeline.
    pub fn feature_field(&self) -> &'static str {
        match self {
            Self::MarketSize => "market_size_score_standardized",
            Self::PurchasingPower => "purchasing_power_score_standardized",
            Self::DigitalReadiness => "digital_readiness_score_standardized",
            Self::GovernanceRisk => "governance_risk_score_standardized",
            Self::CorruptionRisk => "corruption_risk_score_standardized",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Criterion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| ModelError::UnknownCriterion { name: s.to_string() })
    }
}
