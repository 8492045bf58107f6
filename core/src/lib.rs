//! expansion-core — the quantitative engine behind a market-entry
//! decision.
//!
//! Four independent components over two shared inputs (a standardized
//! feature table, a business-assumptions configuration):
//!   - `scoring`: weighted MCDA ranking of candidate markets
//!   - `sensitivity`: rank stability under perturbed weight vectors
//!   - `forecast`: deterministic monthly funnel forecast per scenario
//!   - `monte_carlo`: stochastic funnel simulation and payback
//!     distributions
//!
//! RULES:
//!   - The library performs no network or database I/O; the only
//!     filesystem access is the explicit JSON config/feature loaders.
//!   - All randomness flows through `rng::SimStreamRng` streams
//!     derived from a caller-supplied master seed. Same inputs, same
//!     seed, same output — bit for bit, threaded or not.
//!   - Non-fatal conditions are returned as `diagnostics::Diagnostic`
//!     records, never printed.

pub mod assumptions;
pub mod criterion;
pub mod diagnostics;
pub mod error;
pub mod forecast;
pub mod market;
pub mod monte_carlo;
pub mod rng;
pub mod scoring;
pub mod sensitivity;
pub mod stats;
pub mod types;
pub mod weights;
