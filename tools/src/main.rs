//! decision-runner: headless market-entry analysis runner.
//!
//! Usage:
//!   decision-runner --seed 42 --months 24 --sims 3000 --data-dir ./data --out ./output
//!
//! Loads the weights / feature-table / assumptions configuration,
//! runs all four engine components end to end, prints a run summary,
//! and writes each result table as JSON for the reporting stack.

use anyhow::Result;
use expansion_core::{
    assumptions::Assumptions,
    forecast::{self, RevenueForecaster, Scenario},
    market,
    monte_carlo::{self, MonteCarloEngine},
    scoring::MarketScorer,
    sensitivity::{SensitivityAnalyzer, SweepConfig},
    weights::WeightVector,
};
use std::env;
use std::fs;

#[derive(serde::Deserialize)]
struct WeightsFile {
    weights: WeightVector,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", monte_carlo::DEFAULT_SEED);
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data")
        .to_string();
    let out_dir = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].as_str())
        .unwrap_or("./output")
        .to_string();

    let weights_path = format!("{data_dir}/weights.json");
    let weights_content = fs::read_to_string(&weights_path)
        .map_err(|e| anyhow::anyhow!("Cannot read {weights_path}: {e}"))?;
    let weights_file: WeightsFile = serde_json::from_str(&weights_content)?;
    let weights = weights_file.weights;

    let markets = market::load_feature_table(&format!("{data_dir}/features.json"))?;
    let assumptions = Assumptions::load(&format!("{data_dir}/assumptions.json"))?;

    let months = parse_arg(&args, "--months", assumptions.simulation.months);
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    let n_sims = parse_arg(&args, "--sims", assumptions.simulation.n_sims);
    let adjustment = parse_arg(&args, "--adjust", 1.0f64);

    println!("Market-Entry Decision Engine — decision-runner");
    println!("  seed:     {seed}");
    println!("  months:   {months}");
    println!("  sims:     {n_sims}");
    println!("  adjust:   {adjustment}");
    println!("  data_dir: {data_dir}");
    println!("  markets:  {}", markets.len());
    println!();

    fs::create_dir_all(&out_dir)
        .map_err(|e| anyhow::anyhow!("Cannot create {out_dir}: {e}"))?;

    // ── Scoring ──────────────────────────────────────────────────────

    let scorer = MarketScorer::new(weights.clone());
    let outcome = scorer.score(&markets);

    println!("=== MARKET RANKING ===");
    for scored in &outcome.markets {
        println!(
            "  #{:<2} {}  total_score={:+.4}",
            scored.rank, scored.country_code, scored.total_score
        );
    }
    for diagnostic in &outcome.diagnostics {
        println!("  ! {diagnostic}");
    }
    write_json(&out_dir, "market_scores.json", &outcome)?;

    // ── Sensitivity ──────────────────────────────────────────────────

    let analyzer = SensitivityAnalyzer::new(weights, SweepConfig::default());
    let sweeps = analyzer.sweep_all(&markets)?;
    for (criterion, points) in &sweeps {
        write_json(&out_dir, &format!("sensitivity_{criterion}.json"), points)?;
    }

    // ── Deterministic scenarios ──────────────────────────────────────

    let scenarios = forecast::generate_scenarios(&assumptions, adjustment, months);
    let entry_cost = assumptions.costs.market_entry_cost_usd;

    println!();
    println!("=== SCENARIO FORECASTS ===");
    for scenario in Scenario::ALL {
        let records = &scenarios[&scenario];
        let payback = forecast::payback_period(records, entry_cost);
        let last = records.last().expect("forecast horizon is at least 1 month");
        println!(
            "  {:<12} m{}: active={:<4} cum_net=${:>12.0}  payback={}",
            scenario.name(),
            last.month,
            last.active_customers,
            last.cumulative_net_revenue,
            if payback < 0.0 { "never".to_string() } else { format!("{payback:.0}mo") },
        );
        write_json(&out_dir, &format!("forecast_{scenario}.json"), records)?;
    }

    // ── Monte Carlo ──────────────────────────────────────────────────

    let engine = MonteCarloEngine::new(assumptions.clone(), seed);
    let (panel, summary) = engine.simulate(months, n_sims, adjustment);
    let (paybacks, payback_summary) = monte_carlo::payback_distribution(&panel, entry_cost);

    println!();
    println!("=== MONTE CARLO ({n_sims} sims) ===");
    if let Some(last) = summary.last() {
        println!(
            "  month {}: net_revenue mean=${:.0} P10=${:.0} P90=${:.0}",
            last.month, last.net_revenue.mean, last.net_revenue.p10, last.net_revenue.p90
        );
    }
    println!(
        "  payback: mean={:.1}mo median={:.1}mo P10={:.1} P90={:.1} never={:.1}%",
        payback_summary.mean,
        payback_summary.median,
        payback_summary.p10,
        payback_summary.p90,
        payback_summary.never_pays_back_pct
    );

    write_json(&out_dir, "monte_carlo_summary.json", &summary)?;
    write_json(&out_dir, "payback_distribution.json", &paybacks)?;
    write_json(&out_dir, "payback_summary.json", &payback_summary)?;

    // Ranked forecast for the winner, headline output for the deck.
    if let Some(best) = outcome.markets.first() {
        let forecaster = RevenueForecaster::new(assumptions);
        let best_forecast = forecaster.forecast(months, adjustment, Scenario::Base);
        println!();
        println!(
            "  recommended market: {} (rank 1, payback {} under base scenario)",
            best.country_code,
            match forecast::payback_period(&best_forecast, entry_cost) {
                p if p < 0.0 => "not reached".to_string(),
                p => format!("in month {p:.0}"),
            }
        );
    }

    println!();
    println!("Result tables written to {out_dir}/");
    Ok(())
}

fn write_json<T: serde::Serialize>(out_dir: &str, name: &str, value: &T) -> Result<()> {
    let path = format!("{out_dir}/{name}");
    fs::write(&path, serde_json::to_string_pretty(value)?)
        .map_err(|e| anyhow::anyhow!("Cannot write {path}: {e}"))?;
    log::debug!("wrote {path}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], key: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == key)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
