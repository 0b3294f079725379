//! Agency rule tables: route colors, direction templates, headsign merges
//! and overrides.
//!
//! Rules are plain JSON so they can be edited without a rebuild. The
//! Saskatoon table is embedded and used unless another file is given.

mod error;
mod file;
mod rules;

pub use error::ConfigError;
pub use rules::{AgencyRules, HeadsignOverride, RouteRule};
