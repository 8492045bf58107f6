//! Deterministic monthly revenue forecaster.
//!
//! A small state machine over months 1..=horizon. State is the active
//! customer count plus two running totals (cumulative acquisition
//! cost, cumulative net revenue). Scenario multipliers are applied
//! once, before the monthly loop.
//!
//! The sales-cycle lag is a threshold gate on the current month's
//! leads, not a per-cohort delay: once month >= sales_cycle_months,
//! conversions from that month's leads are recognized the same month.
//! Downstream consumers depend on this numeric output, so the gate is
//! kept as-is rather than replaced with true cohort lagging.

use crate::assumptions::Assumptions;
use crate::types::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Base,
    Optimistic,
    Pessimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Base, Scenario::Optimistic, Scenario::Pessimistic];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Optimistic => "optimistic",
            Self::Pessimistic => "pessimistic",
        }
    }

    /// Fixed multipliers on (lead->opp, opp->win, churn, market_adjustment).
    fn multipliers(&self) -> (f64, f64, f64, f64) {
        match self {
            Self::Base => (1.0, 1.0, 1.0, 1.0),
            Self::Optimistic => (1.20, 1.20, 0.80, 1.15),
            Self::Pessimistic => (0.80, 0.80, 1.20, 0.85),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One forecast month. Counts are integers; money is f64 USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRecord {
    pub month: Month,
    pub new_leads: u32,
    pub new_opportunities: u32,
    pub new_wins: u32,
    pub churned: u32,
    pub active_customers: u32,
    pub monthly_revenue: f64,
    pub gross_revenue: f64,
    pub acquisition_cost: f64,
    pub cumulative_acquisition_cost: f64,
    pub net_revenue: f64,
    /// Running total of net_revenue. Not monotonic: a month whose
    /// acquisition cost exceeds its gross revenue pulls it down.
    pub cumulative_net_revenue: f64,
}

pub struct RevenueForecaster {
    assumptions: Assumptions,
}

impl RevenueForecaster {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Forecast `months` of the funnel under one scenario.
    ///
    /// `market_adjustment` scales the initial lead volume; it is
    /// typically derived from the market's MCDA score.
    pub fn forecast(
        &self,
        months: Month,
        market_adjustment: f64,
        scenario: Scenario,
    ) -> Vec<MonthRecord> {
        let funnel = &self.assumptions.funnel;
        let (lto_mult, otw_mult, churn_mult, adj_mult) = scenario.multipliers();

        let lead_to_opp = funnel.lead_to_opportunity * lto_mult;
        let opp_to_win = funnel.opportunity_to_win * otw_mult;
        let monthly_churn = self.assumptions.retention.monthly_churn * churn_mult;
        let adjustment = market_adjustment * adj_mult;
        let sales_cycle = funnel.sales_cycle_months;

        let acv = self.assumptions.commercial.acv_usd;
        let gross_margin = self.assumptions.commercial.gross_margin;
        let cac = self.assumptions.costs.cac_usd_per_customer;

        // Truncated once up front and held constant across months.
        let new_leads = (funnel.leads_per_month_initial * adjustment) as u32;

        let mut records = Vec::with_capacity(months as usize);
        let mut active_customers: u32 = 0;
        let mut cumulative_acquisition_cost = 0.0;
        let mut cumulative_net_revenue = 0.0;

        for month in 1..=months {
            let (new_opportunities, new_wins) = if month >= sales_cycle {
                let opportunities = new_leads as f64 * lead_to_opp;
                let wins = (opportunities * opp_to_win) as u32;
                (opportunities as u32, wins)
            } else {
                (0, 0)
            };

            let churned = (active_customers as f64 * monthly_churn) as u32;
            active_customers = (active_customers as i64 - churned as i64 + new_wins as i64)
                .max(0) as u32;

            let monthly_revenue = active_customers as f64 * (acv / 12.0);
            let gross_revenue = monthly_revenue * gross_margin;

            let acquisition_cost = new_wins as f64 * cac;
            cumulative_acquisition_cost += acquisition_cost;

            let net_revenue = gross_revenue - acquisition_cost;
            cumulative_net_revenue += net_revenue;

            records.push(MonthRecord {
                month,
                new_leads,
                new_opportunities,
                new_wins,
                churned,
                active_customers,
                monthly_revenue,
                gross_revenue,
                acquisition_cost,
                cumulative_acquisition_cost,
                net_revenue,
                cumulative_net_revenue,
            });
        }

        records
    }
}

/// Run the forecast under every scenario tag.
pub fn generate_scenarios(
    assumptions: &Assumptions,
    market_adjustment: f64,
    months: Month,
) -> BTreeMap<Scenario, Vec<MonthRecord>> {
    let forecaster = RevenueForecaster::new(assumptions.clone());
    Scenario::ALL
        .iter()
        .map(|scenario| {
            (
                *scenario,
                forecaster.forecast(months, market_adjustment, *scenario),
            )
        })
        .collect()
}

/// First month whose cumulative net revenue meets or exceeds
/// `entry_cost`, as a float month index; -1.0 if the horizon never
/// pays back.
pub fn payback_period(records: &[MonthRecord], entry_cost: f64) -> f64 {
    records
        .iter()
        .find(|r| r.cumulative_net_revenue >= entry_cost)
        .map(|r| r.month as f64)
        .unwrap_or(-1.0)
}
