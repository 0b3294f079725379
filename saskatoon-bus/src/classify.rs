//! Route classification: a feed route record becomes a numeric route with a
//! display name and a color from the agency table.

use crate::config::{AgencyRules, RouteRule};
use crate::domain::{HexColor, RouteId};
use crate::error::PipelineError;
use crate::feed::FeedRoute;
use crate::sink::RouteMetadata;
use crate::text::clean_route_long_name;

/// A route ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRoute {
    pub id: RouteId,
    pub short_name: String,
    pub long_name: String,
    /// `None` inherits the agency color.
    pub color: Option<HexColor>,
}

impl ClassifiedRoute {
    pub fn to_metadata(&self) -> RouteMetadata {
        RouteMetadata {
            id: self.id.get(),
            short_name: self.short_name.clone(),
            long_name: self.long_name.clone(),
            color: self.color,
        }
    }
}

/// A classified route together with the rules that apply to its trips.
#[derive(Debug, Clone)]
pub struct Classification<'r> {
    pub route: ClassifiedRoute,
    pub rule: &'r RouteRule,
}

/// Classify one feed route.
///
/// The short name must parse as a number and that number must be in the
/// agency's color table. There is no fallback color: a new route in the feed
/// has to be added to the table before the feed can be processed.
pub fn classify_route<'r>(
    record: &FeedRoute,
    rules: &'r AgencyRules,
) -> Result<Classification<'r>, PipelineError> {
    let id = RouteId::parse(&record.short_name).map_err(|source| {
        PipelineError::UnparsableRouteCode {
            route_id: record.route_id.clone(),
            source,
        }
    })?;

    let rule = rules
        .route(id)
        .ok_or_else(|| PipelineError::UnknownRouteColor {
            route: id,
            route_id: record.route_id.clone(),
        })?;

    let long_name = match rule.long_name() {
        Some(name) => name.to_string(),
        None => clean_route_long_name(&record.long_name),
    };

    Ok(Classification {
        route: ClassifiedRoute {
            id,
            short_name: id.short_name(),
            long_name,
            color: rule.color(),
        },
        rule,
    })
}
