use expansion_core::{
    assumptions::Assumptions,
    monte_carlo::{monthly_summary, payback_distribution, MonteCarloEngine},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn engine(seed: u64) -> MonteCarloEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    MonteCarloEngine::new(Assumptions::default_test(), seed)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The panel has one trajectory per simulation, indexed 0..n_sims,
/// each exactly `months` long.
#[test]
fn panel_shape_matches_the_request() {
    let (panel, summary) = engine(7).simulate(12, 50, 1.0);

    assert_eq!(panel.len(), 50);
    assert_eq!(summary.len(), 12);

    for (i, run) in panel.iter().enumerate() {
        assert_eq!(run.simulation, i, "panel must be ordered by simulation index");
        assert_eq!(run.months.len(), 12);
        for (m, month) in run.months.iter().enumerate() {
            assert_eq!(month.month, m as u32 + 1);
        }
    }
}

/// No wins can occur before the sales-cycle gate, so no acquisition
/// cost accrues in month 1; cumulative cost never decreases after.
#[test]
fn costs_are_gated_and_monotonic() {
    let (panel, _) = engine(11).simulate(12, 100, 1.0);

    for run in &panel {
        assert_eq!(
            run.months[0].cumulative_cost, 0.0,
            "sim {}: cost before the sales-cycle gate",
            run.simulation
        );
        let mut prev = 0.0;
        for month in &run.months {
            assert!(
                month.cumulative_cost >= prev,
                "sim {} month {}: cumulative cost decreased",
                run.simulation, month.month
            );
            prev = month.cumulative_cost;

            assert!(
                (month.net_revenue - (month.cumulative_revenue - month.cumulative_cost)).abs()
                    < 1e-9,
                "net revenue must equal cumulative revenue minus cost"
            );
        }
    }
}

/// Monthly summary percentiles are ordered: P10 <= median <= P90 for
/// every column of every month.
#[test]
fn summary_percentiles_are_ordered() {
    let (_, summary) = engine(3).simulate(12, 200, 1.0);

    for row in &summary {
        for stats in [
            &row.monthly_revenue,
            &row.cumulative_revenue,
            &row.cumulative_cost,
            &row.net_revenue,
            &row.active_customers,
        ] {
            assert!(
                stats.p10 <= stats.median && stats.median <= stats.p90,
                "month {}: percentiles out of order ({} / {} / {})",
                row.month, stats.p10, stats.median, stats.p90
            );
        }
    }
}

/// A summary horizon longer than the panel truncates to the months the
/// panel actually holds; an empty panel summarizes to nothing.
#[test]
fn summary_horizon_is_bounded_by_the_panel() {
    let (panel, _) = engine(5).simulate(6, 20, 1.0);

    let oversized = monthly_summary(&panel, 24);
    assert_eq!(oversized.len(), 6, "summary must stop at the panel's horizon");
    assert_eq!(oversized.last().map(|row| row.month), Some(6));

    assert!(monthly_summary(&[], 12).is_empty());
}

/// An unreachable entry cost never pays back: every record carries the
/// -1 sentinel, the summary degrades to the sentinels, and the
/// never-pays-back share is exactly 100.
#[test]
fn unreachable_entry_cost_never_pays_back() {
    let (panel, _) = engine(5).simulate(12, 40, 1.0);

    let (records, summary) = payback_distribution(&panel, 1.0e15);

    assert_eq!(records.len(), 40);
    assert!(records.iter().all(|r| r.payback_month == -1));
    assert_eq!(summary.never_pays_back_pct, 100.0);
    assert_eq!(summary.mean, -1.0);
    assert_eq!(summary.median, -1.0);
    assert_eq!(summary.std, 0.0);
    assert_eq!(summary.p10, -1.0);
    assert_eq!(summary.p90, -1.0);
}

/// A zero entry cost pays back immediately: month 1 closes with zero
/// net revenue, which already meets the threshold.
#[test]
fn zero_entry_cost_pays_back_in_month_one() {
    let (panel, _) = engine(5).simulate(12, 40, 1.0);

    let (records, summary) = payback_distribution(&panel, 0.0);

    assert!(records.iter().all(|r| r.payback_month == 1));
    assert_eq!(summary.never_pays_back_pct, 0.0);
    assert_eq!(summary.mean, 1.0);
    assert_eq!(summary.median, 1.0);
}

/// never_pays_back_pct is exactly 100 * (count of -1) / n_sims,
/// whatever the mix of outcomes.
#[test]
fn never_pays_back_share_matches_the_records() {
    let (panel, _) = engine(17).simulate(24, 150, 1.0);

    // Pick a threshold somewhere inside the spread of final net
    // revenue so both outcomes occur (or the formula still holds if
    // one side is empty).
    let finals: Vec<f64> = panel.iter().map(|r| r.months.last().unwrap().net_revenue).collect();
    let mid = finals.iter().sum::<f64>() / finals.len() as f64;

    let (records, summary) = payback_distribution(&panel, mid);

    let never = records.iter().filter(|r| r.payback_month == -1).count();
    let expected = never as f64 / records.len() as f64 * 100.0;
    assert_eq!(summary.never_pays_back_pct, expected);
}

/// Sampled parameters are clipped by construction, so even a config
/// with absurd uncertainty cannot push the funnel out of domain.
#[test]
fn extreme_uncertainty_stays_in_domain() {
    let mut assumptions = Assumptions::default_test();
    assumptions.simulation.uncertainty.lead_to_opportunity_sd = 10.0;
    assumptions.simulation.uncertainty.opportunity_to_win_sd = 10.0;
    assumptions.simulation.uncertainty.churn_sd = 10.0;
    assumptions.simulation.uncertainty.cac_sd = 1.0e6;

    let engine = MonteCarloEngine::new(assumptions, 23);
    let (panel, _) = engine.simulate(12, 50, 1.0);

    for run in &panel {
        for month in &run.months {
            assert!(month.monthly_revenue >= 0.0);
            assert!(month.cumulative_cost >= 0.0);
        }
    }
}
