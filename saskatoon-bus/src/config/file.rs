//! On-disk shape of the agency rule file.
//!
//! These types mirror the JSON one-to-one; [`super::AgencyRules`] validates
//! them into the lookup tables the pipeline uses.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::Direction;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RulesFile {
    pub agency_color: String,

    /// Raw headsigns marking trips to drop (compared case-insensitively)
    #[serde(default)]
    pub excluded_headsigns: Vec<String>,

    /// Keyed by numeric route short name
    pub routes: BTreeMap<u32, RouteFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RouteFile {
    /// `null` or missing means the agency color
    #[serde(default)]
    pub color: Option<String>,

    /// Replaces the feed's long name when set
    #[serde(default)]
    pub long_name: Option<String>,

    #[serde(default)]
    pub template: Option<TemplateFile>,

    #[serde(default)]
    pub merges: Vec<MergeFile>,

    #[serde(default)]
    pub overrides: Vec<OverrideFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct TemplateFile {
    #[serde(rename = "0")]
    pub zero: DirectionFile,

    #[serde(rename = "1")]
    pub one: DirectionFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct DirectionFile {
    pub label: String,
    pub stops: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct MergeFile {
    /// Missing means either direction
    #[serde(default)]
    pub direction: Option<Direction>,
    pub variants: Vec<String>,
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct OverrideFile {
    pub headsign: String,

    #[serde(default)]
    pub direction: Option<Direction>,

    pub label: String,
}
