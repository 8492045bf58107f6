//! Shared primitive types used across the entire decision engine.

/// A forecast month. Month 1 is the first month after market entry.
pub type Month = u32;

/// ISO-3166 alpha-3 country code identifying a candidate market.
pub type CountryCode = String;

/// Index of one Monte Carlo trajectory within a batch.
pub type SimIndex = usize;
