//! Crate-level behaviour tests.
//!
//! - `scenarios.rs`: worked push scenarios for both resolvers
//! - `properties.rs`: invariants checked over generated grids
//! - `determinism.rs`: seeded grids, repeated resolves and bank stepping
//! - `helpers.rs`: grid builders and strategies shared by the above

mod determinism;
mod helpers;
mod scenarios;
