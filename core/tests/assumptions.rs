//! Config deserialization tests.
//!
//! A config file only needs to spell out the values it overrides; every
//! omitted section and every omitted field inside a section falls back to
//! the built-in defaults.

use expansion_core::assumptions::Assumptions;

/// A section that names only one field still deserializes, with the rest
/// of that section (and every other section) taking default values.
#[test]
fn partial_section_falls_back_to_defaults() {
    let raw = r#"{ "funnel": { "leads_per_month_initial": 100.0 } }"#;
    let parsed: Assumptions =
        serde_json::from_str(raw).expect("partial funnel section must deserialize");
    let defaults = Assumptions::default();

    assert_eq!(parsed.funnel.leads_per_month_initial, 100.0);
    assert_eq!(
        parsed.funnel.lead_to_opportunity,
        defaults.funnel.lead_to_opportunity,
        "omitted funnel fields take defaults"
    );
    assert_eq!(
        parsed.funnel.sales_cycle_months,
        defaults.funnel.sales_cycle_months
    );
    assert_eq!(
        parsed.retention.monthly_churn,
        defaults.retention.monthly_churn,
        "omitted sections take defaults"
    );
    assert_eq!(
        parsed.costs.market_entry_cost_usd,
        defaults.costs.market_entry_cost_usd
    );
}

/// An empty object deserializes to the full default set.
#[test]
fn empty_config_is_the_default_config() {
    let parsed: Assumptions = serde_json::from_str("{}").expect("empty config must deserialize");
    let defaults = Assumptions::default();
    assert_eq!(parsed.commercial.acv_usd, defaults.commercial.acv_usd);
    assert_eq!(parsed.simulation.n_sims, defaults.simulation.n_sims);
    assert_eq!(
        parsed.simulation.uncertainty.cac_sd,
        defaults.simulation.uncertainty.cac_sd
    );
}

/// Overrides in one section never bleed into another.
#[test]
fn overrides_are_scoped_to_their_section() {
    let raw = r#"{
        "retention": { "monthly_churn": 0.03 },
        "costs": { "cac_usd_per_customer": 9000.0 }
    }"#;
    let parsed: Assumptions = serde_json::from_str(raw).expect("config must deserialize");
    let defaults = Assumptions::default();

    assert_eq!(parsed.retention.monthly_churn, 0.03);
    assert_eq!(parsed.costs.cac_usd_per_customer, 9000.0);
    assert_eq!(
        parsed.costs.market_entry_cost_usd,
        defaults.costs.market_entry_cost_usd
    );
    assert_eq!(
        parsed.funnel.leads_per_month_initial,
        defaults.funnel.leads_per_month_initial
    );
}
