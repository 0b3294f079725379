//! Validated agency rules: the lookup tables the pipeline reads.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::domain::{Direction, HexColor, RouteId};
use crate::merge::{MergeRule, MergeTable};
use crate::template::{DirectionStops, DirectionTemplate, TemplateError};
use crate::text::canonicalize_headsign;

use super::error::ConfigError;
use super::file::{DirectionFile, MergeFile, RouteFile, RulesFile, TemplateFile};

/// Saskatoon Transit's rule table, shipped with the crate.
const SASKATOON_RULES: &str = include_str!("../../data/saskatoon.json");

/// Replaces one raw headsign before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadsignOverride {
    headsign: String,
    /// `None` applies to either direction.
    direction: Option<Direction>,
    label: String,
}

impl HeadsignOverride {
    pub fn new(
        headsign: impl Into<String>,
        direction: Option<Direction>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            headsign: headsign.into().trim().to_string(),
            direction,
            label: label.into(),
        }
    }

    /// Raw headsigns compare case-insensitively, ignoring outer whitespace.
    pub fn matches(&self, raw_headsign: &str, direction: Direction) -> bool {
        self.direction.is_none_or(|d| d == direction)
            && self.headsign.eq_ignore_ascii_case(raw_headsign.trim())
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Everything configured for one route.
#[derive(Debug, Clone, Default)]
pub struct RouteRule {
    color: Option<HexColor>,
    long_name: Option<String>,
    template: Option<DirectionTemplate>,
    merges: MergeTable,
    overrides: Vec<HeadsignOverride>,
}

impl RouteRule {
    /// `None` means the route inherits the agency color.
    pub fn color(&self) -> Option<HexColor> {
        self.color
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn template(&self) -> Option<&DirectionTemplate> {
        self.template.as_ref()
    }

    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// The override label for a raw headsign, if any.
    ///
    /// Overrides scoped to `direction` win over unscoped ones.
    pub fn override_for(&self, raw_headsign: &str, direction: Direction) -> Option<&str> {
        let scoped = self
            .overrides
            .iter()
            .filter(|o| o.direction.is_some())
            .find(|o| o.matches(raw_headsign, direction));
        scoped
            .or_else(|| {
                self.overrides
                    .iter()
                    .filter(|o| o.direction.is_none())
                    .find(|o| o.matches(raw_headsign, direction))
            })
            .map(HeadsignOverride::label)
    }
}

/// The complete rule set for one agency.
///
/// Routes absent from `routes` have no known color, so the pipeline rejects
/// them.
#[derive(Debug, Clone)]
pub struct AgencyRules {
    agency_color: HexColor,
    excluded_headsigns: Vec<String>,
    routes: BTreeMap<RouteId, RouteRule>,
}

impl AgencyRules {
    /// The embedded Saskatoon Transit table.
    pub fn saskatoon() -> Result<Self, ConfigError> {
        Self::from_json(SASKATOON_RULES)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: RulesFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    fn from_file(file: RulesFile) -> Result<Self, ConfigError> {
        let agency_color = HexColor::parse(&file.agency_color)
            .map_err(ConfigError::AgencyColor)?;

        let excluded_headsigns = file
            .excluded_headsigns
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        let routes = file
            .routes
            .into_iter()
            .map(|(id, route)| {
                let id = RouteId::new(id);
                route_rule(id, route).map(|rule| (id, rule))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        debug!(routes = routes.len(), %agency_color, "loaded agency rules");

        Ok(Self {
            agency_color,
            excluded_headsigns,
            routes,
        })
    }

    pub fn agency_color(&self) -> HexColor {
        self.agency_color
    }

    pub fn route(&self, id: RouteId) -> Option<&RouteRule> {
        self.routes.get(&id)
    }

    /// Whether trips with this raw headsign are dropped.
    pub fn is_excluded(&self, raw_headsign: &str) -> bool {
        let raw = raw_headsign.trim();
        self.excluded_headsigns
            .iter()
            .any(|h| h.eq_ignore_ascii_case(raw))
    }
}

fn route_rule(route: RouteId, file: RouteFile) -> Result<RouteRule, ConfigError> {
    let color = file
        .color
        .as_deref()
        .map(HexColor::parse)
        .transpose()
        .map_err(|source| ConfigError::RouteColor { route, source })?;

    let template = file
        .template
        .map(direction_template)
        .transpose()
        .map_err(|source| ConfigError::Template { route, source })?;

    if template.is_some() && !(file.merges.is_empty() && file.overrides.is_empty()) {
        return Err(ConfigError::TemplateWithHeadsignRules { route });
    }

    let merges = merge_table(route, file.merges)?;
    let overrides = file
        .overrides
        .into_iter()
        .map(|o| HeadsignOverride::new(o.headsign, o.direction, o.label))
        .collect();

    Ok(RouteRule {
        color,
        long_name: file.long_name,
        template,
        merges,
        overrides,
    })
}

fn direction_template(file: TemplateFile) -> Result<DirectionTemplate, TemplateError> {
    Ok(DirectionTemplate::new(
        direction_stops(Direction::Zero, file.zero)?,
        direction_stops(Direction::One, file.one)?,
    ))
}

fn direction_stops(
    direction: Direction,
    file: DirectionFile,
) -> Result<DirectionStops, TemplateError> {
    DirectionStops::parse(direction, file.label, &file.stops)
}

fn merge_table(route: RouteId, merges: Vec<MergeFile>) -> Result<MergeTable, ConfigError> {
    let mut rules = Vec::with_capacity(merges.len());
    for merge in merges {
        for variant in &merge.variants {
            if variant.is_empty() {
                debug!(%route, label = %merge.label, "empty headsign dropped from merge rule");
            } else if canonicalize_headsign(variant) != *variant {
                return Err(ConfigError::NonCanonicalVariant {
                    route,
                    variant: variant.clone(),
                });
            }
        }
        let rule = MergeRule::new(merge.direction, merge.variants, merge.label)
            .map_err(|source| ConfigError::Merge { route, source })?;
        rules.push(rule);
    }
    MergeTable::new(rules).map_err(|source| ConfigError::Merge { route, source })
}
