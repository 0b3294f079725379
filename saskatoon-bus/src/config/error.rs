//! Rule file error types.

use std::path::PathBuf;

use crate::domain::{InvalidColor, RouteId};
use crate::merge::MergeRuleError;
use crate::template::TemplateError;

/// Errors loading or validating an agency rule file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rule file could not be read
    #[error("failed to read rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not valid JSON for the expected shape
    #[error("rules JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("agency color: {0}")]
    AgencyColor(#[source] InvalidColor),

    #[error("route {route} color: {source}")]
    RouteColor {
        route: RouteId,
        #[source]
        source: InvalidColor,
    },

    #[error("route {route} template: {source}")]
    Template {
        route: RouteId,
        #[source]
        source: TemplateError,
    },

    #[error("route {route} merge rules: {source}")]
    Merge {
        route: RouteId,
        #[source]
        source: MergeRuleError,
    },

    /// A merge variant that cleaning would rewrite can never be observed.
    #[error("route {route}: merge variant {variant:?} is not a cleaned headsign")]
    NonCanonicalVariant { route: RouteId, variant: String },

    /// Templated routes take their labels from the template.
    #[error("route {route} has both a direction template and headsign rules")]
    TemplateWithHeadsignRules { route: RouteId },
}
