//! Business-assumptions configuration.
//!
//! Loaded from a JSON file whose field names are the domain contract
//! shared with the upstream planning spreadsheets. Every field has a
//! default, so a partial file loads; `default_test()` gives tests a
//! known configuration without touching the filesystem.

use crate::types::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Assumptions {
    #[serde(default)]
    pub funnel: FunnelAssumptions,
    #[serde(default)]
    pub retention: RetentionAssumptions,
    #[serde(default, rename = "commercial_assumptions")]
    pub commercial: CommercialAssumptions,
    #[serde(default)]
    pub costs: CostAssumptions,
    #[serde(default)]
    pub simulation: SimulationAssumptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelAssumptions {
    pub leads_per_month_initial: f64,
    pub lead_to_opportunity: f64,
    pub opportunity_to_win: f64,
    pub sales_cycle_months: Month,
}

impl Default for FunnelAssumptions {
    fn default() -> Self {
        Self {
            leads_per_month_initial: 120.0,
            lead_to_opportunity: 0.18,
            opportunity_to_win: 0.22,
            sales_cycle_months: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionAssumptions {
    pub monthly_churn: f64,
}

impl Default for RetentionAssumptions {
    fn default() -> Self {
        Self { monthly_churn: 0.018 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommercialAssumptions {
    pub acv_usd: f64,
    pub gross_margin: f64,
}

impl Default for CommercialAssumptions {
    fn default() -> Self {
        Self { acv_usd: 18_000.0, gross_margin: 0.82 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    pub cac_usd_per_customer: f64,
    pub market_entry_cost_usd: f64,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            cac_usd_per_customer: 14_000.0,
            market_entry_cost_usd: 120_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationAssumptions {
    pub months: Month,
    pub n_sims: usize,
    #[serde(default)]
    pub uncertainty: UncertaintyAssumptions,
}

impl Default for SimulationAssumptions {
    fn default() -> Self {
        Self {
            months: 24,
            n_sims: 3000,
            uncertainty: UncertaintyAssumptions::default(),
        }
    }
}

/// Per-parameter standard deviations for Monte Carlo sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UncertaintyAssumptions {
    pub lead_to_opportunity_sd: f64,
    pub opportunity_to_win_sd: f64,
    pub churn_sd: f64,
    pub cac_sd: f64,
}

impl Default for UncertaintyAssumptions {
    fn default() -> Self {
        Self {
            lead_to_opportunity_sd: 0.04,
            opportunity_to_win_sd: 0.05,
            churn_sd: 0.006,
            cac_sd: 2_500.0,
        }
    }
}

impl Assumptions {
    /// Load from a JSON file.
    /// In tests, use Assumptions::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let assumptions: Assumptions = serde_json::from_str(&content)?;
        Ok(assumptions)
    }

    /// A small, fast configuration with round numbers for tests.
    pub fn default_test() -> Self {
        Self {
            funnel: FunnelAssumptions {
                leads_per_month_initial: 100.0,
                lead_to_opportunity: 0.20,
                opportunity_to_win: 0.25,
                sales_cycle_months: 2,
            },
            retention: RetentionAssumptions { monthly_churn: 0.02 },
            commercial: CommercialAssumptions {
                acv_usd: 20_000.0,
                gross_margin: 0.80,
            },
            costs: CostAssumptions {
                cac_usd_per_customer: 15_000.0,
                market_entry_cost_usd: 120_000.0,
            },
            simulation: SimulationAssumptions {
                months: 12,
                n_sims: 200,
                uncertainty: UncertaintyAssumptions::default(),
            },
        }
    }
}
