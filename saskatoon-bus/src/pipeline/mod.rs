//! The canonicalization pass.
//!
//! Runs in two phases over one feed snapshot:
//!
//! 1. **Collect**: classify routes, parse stops, and walk every trip. Trips
//!    on templated routes get their direction and label from the template;
//!    all others drop their cleaned headsign into a (route, direction)
//!    bucket.
//! 2. **Resolve**: each bucket is resolved once against the route's merge
//!    table, then trips are emitted with their final labels.

mod context;
mod run;

#[cfg(test)]
mod pipeline_tests;

pub use context::RunContext;
pub use run::{Pipeline, RunSummary};
