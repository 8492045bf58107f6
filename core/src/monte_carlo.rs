//! Stochastic funnel simulation and payback-time distributions.
//!
//! Two layers of randomness, both reproduced exactly run to run:
//!   - Parameter uncertainty: one clipped-normal draw per parameter
//!     per simulation, held fixed across its months.
//!   - Process noise: Poisson leads and Binomial wins/churn resampled
//!     every month.
//!
//! The batch is embarrassingly parallel. Each simulation draws only
//! from its own RNG stream (derived from master_seed and the
//! simulation index), reads only the shared immutable assumptions,
//! and writes only its own trajectory, so rayon may schedule the
//! batch however it likes without changing a single bit of output.
//! Aggregation happens strictly after the whole batch completes.

use crate::assumptions::Assumptions;
use crate::rng::SimStreamRng;
use crate::stats;
use crate::types::{Month, SimIndex};
use rayon::prelude::*;
use serde::Serialize;

// Sampled parameters are always clipped into these bounds, so no
// draw can ever produce an out-of-domain value (e.g. a negative
// probability).
pub const LEAD_TO_OPP_BOUNDS: (f64, f64) = (0.05, 0.50);
pub const OPP_TO_WIN_BOUNDS: (f64, f64) = (0.05, 0.50);
pub const CHURN_BOUNDS: (f64, f64) = (0.005, 0.05);
pub const CAC_BOUNDS: (f64, f64) = (8_000.0, 25_000.0);

/// Seed used by the runner when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// One month of one simulated trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimMonth {
    pub month: Month,
    pub active_customers: u32,
    pub monthly_revenue: f64,
    /// Running pre-margin revenue total times gross margin.
    pub cumulative_revenue: f64,
    pub cumulative_cost: f64,
    pub net_revenue: f64,
}

/// One full trajectory of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub simulation: SimIndex,
    pub months: Vec<SimMonth>,
}

/// mean / std / median / P10 / P90 for one column of the panel,
/// rounded to publication precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
}

impl ColumnStats {
    fn from_values(values: &[f64]) -> Self {
        Self {
            mean: stats::round2(stats::mean(values)),
            std: stats::round2(stats::std_sample(values)),
            median: stats::round2(stats::median(values)),
            p10: stats::round2(stats::percentile(values, 10.0)),
            p90: stats::round2(stats::percentile(values, 90.0)),
        }
    }
}

/// Cross-simulation summary for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummaryRow {
    pub month: Month,
    pub monthly_revenue: ColumnStats,
    pub cumulative_revenue: ColumnStats,
    pub cumulative_cost: ColumnStats,
    pub net_revenue: ColumnStats,
    pub active_customers: ColumnStats,
}

/// Payback month per simulation; -1 when the horizon never pays back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaybackRecord {
    pub simulation: SimIndex,
    pub payback_month: i32,
}

/// Summary statistics over the simulations that did pay back, plus
/// the share that never did. When nothing pays back the stats carry
/// the -1/0 sentinels and `never_pays_back_pct` is 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaybackSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p10: f64,
    pub p90: f64,
    pub never_pays_back_pct: f64,
}

pub struct MonteCarloEngine {
    assumptions: Assumptions,
    master_seed: u64,
}

impl MonteCarloEngine {
    pub fn new(assumptions: Assumptions, master_seed: u64) -> Self {
        Self { assumptions, master_seed }
    }

    /// Run the full batch and aggregate it into a monthly summary.
    ///
    /// Returns the panel (one trajectory per simulation, ordered by
    /// simulation index) and the per-month summary table.
    pub fn simulate(
        &self,
        months: Month,
        n_sims: usize,
        market_adjustment: f64,
    ) -> (Vec<SimulationRun>, Vec<MonthlySummaryRow>) {
        let base_leads = self.assumptions.funnel.leads_per_month_initial * market_adjustment;

        let panel: Vec<SimulationRun> = (0..n_sims)
            .into_par_iter()
            .map(|sim| self.run_single(sim, months, base_leads))
            .collect();

        let summary = monthly_summary(&panel, months);

        log::info!(
            "monte carlo: {n_sims} simulations x {months} months complete (seed={})",
            self.master_seed
        );

        (panel, summary)
    }

    fn run_single(&self, sim: SimIndex, months: Month, base_leads: f64) -> SimulationRun {
        let mut rng = SimStreamRng::new(self.master_seed, sim as u64);

        let funnel = &self.assumptions.funnel;
        let uncertainty = &self.assumptions.simulation.uncertainty;

        // Parameter uncertainty — sampled once, held for every month.
        let lead_to_opp = rng.normal_clipped(
            funnel.lead_to_opportunity,
            uncertainty.lead_to_opportunity_sd,
            LEAD_TO_OPP_BOUNDS.0,
            LEAD_TO_OPP_BOUNDS.1,
        );
        let opp_to_win = rng.normal_clipped(
            funnel.opportunity_to_win,
            uncertainty.opportunity_to_win_sd,
            OPP_TO_WIN_BOUNDS.0,
            OPP_TO_WIN_BOUNDS.1,
        );
        let churn_rate = rng.normal_clipped(
            self.assumptions.retention.monthly_churn,
            uncertainty.churn_sd,
            CHURN_BOUNDS.0,
            CHURN_BOUNDS.1,
        );
        let cac = rng.normal_clipped(
            self.assumptions.costs.cac_usd_per_customer,
            uncertainty.cac_sd,
            CAC_BOUNDS.0,
            CAC_BOUNDS.1,
        );

        let acv = self.assumptions.commercial.acv_usd;
        let gross_margin = self.assumptions.commercial.gross_margin;
        let sales_cycle = funnel.sales_cycle_months;

        let mut active_customers: u64 = 0;
        let mut total_revenue = 0.0;
        let mut total_cost = 0.0;
        let mut records = Vec::with_capacity(months as usize);

        for month in 1..=months {
            // Process noise — resampled every month.
            let leads = rng.poisson(base_leads);

            let wins = if month >= sales_cycle {
                let opportunities = (leads as f64 * lead_to_opp) as u64;
                rng.binomial(opportunities, opp_to_win)
            } else {
                0
            };

            let churned = rng.binomial(active_customers, churn_rate);
            active_customers = active_customers.saturating_sub(churned) + wins;

            let monthly_revenue = active_customers as f64 * (acv / 12.0);
            total_revenue += monthly_revenue;

            total_cost += wins as f64 * cac;

            let cumulative_revenue = total_revenue * gross_margin;
            records.push(SimMonth {
                month,
                active_customers: active_customers as u32,
                monthly_revenue,
                cumulative_revenue,
                cumulative_cost: total_cost,
                net_revenue: cumulative_revenue - total_cost,
            });
        }

        SimulationRun { simulation: sim, months: records }
    }
}

/// Group the panel by month and summarize every numeric column.
/// A synchronization barrier: callers run this only after the whole
/// batch has completed.
///
/// The summary covers at most the shortest trajectory in the panel,
/// so a horizon longer than the panel truncates instead of failing.
pub fn monthly_summary(panel: &[SimulationRun], months: Month) -> Vec<MonthlySummaryRow> {
    let horizon = panel
        .iter()
        .map(|run| run.months.len() as Month)
        .min()
        .unwrap_or(0)
        .min(months);
    (1..=horizon)
        .map(|month| {
            let idx = (month - 1) as usize;
            let column = |f: fn(&SimMonth) -> f64| -> Vec<f64> {
                panel.iter().map(|run| f(&run.months[idx])).collect()
            };

            MonthlySummaryRow {
                month,
                monthly_revenue: ColumnStats::from_values(&column(|m| m.monthly_revenue)),
                cumulative_revenue: ColumnStats::from_values(&column(|m| m.cumulative_revenue)),
                cumulative_cost: ColumnStats::from_values(&column(|m| m.cumulative_cost)),
                net_revenue: ColumnStats::from_values(&column(|m| m.net_revenue)),
                active_customers: ColumnStats::from_values(
                    &column(|m| m.active_customers as f64),
                ),
            }
        })
        .collect()
}

/// Per-simulation payback months and their distribution summary.
pub fn payback_distribution(
    panel: &[SimulationRun],
    entry_cost: f64,
) -> (Vec<PaybackRecord>, PaybackSummary) {
    let records: Vec<PaybackRecord> = panel
        .iter()
        .map(|run| {
            let payback_month = run
                .months
                .iter()
                .find(|m| m.net_revenue >= entry_cost)
                .map(|m| m.month as i32)
                .unwrap_or(-1);
            PaybackRecord { simulation: run.simulation, payback_month }
        })
        .collect();

    let paid_back: Vec<f64> = records
        .iter()
        .filter(|r| r.payback_month > 0)
        .map(|r| r.payback_month as f64)
        .collect();

    let never = records.len() - paid_back.len();
    let never_pays_back_pct = if records.is_empty() {
        0.0
    } else {
        never as f64 / records.len() as f64 * 100.0
    };

    let summary = if paid_back.is_empty() {
        PaybackSummary {
            mean: -1.0,
            median: -1.0,
            std: 0.0,
            p10: -1.0,
            p90: -1.0,
            never_pays_back_pct,
        }
    } else {
        PaybackSummary {
            mean: stats::mean(&paid_back),
            median: stats::median(&paid_back),
            std: stats::std_population(&paid_back),
            p10: stats::percentile(&paid_back, 10.0),
            p90: stats::percentile(&paid_back, 90.0),
            never_pays_back_pct,
        }
    };

    (records, summary)
}
