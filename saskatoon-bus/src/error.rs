//! Errors that abort a canonicalization run.
//!
//! Every variant names the route, trip or stop that caused it, so the rule
//! table or feed can be fixed by hand.

use crate::domain::{Direction, InvalidDirection, InvalidRouteCode, InvalidStopCode, RouteId};
use crate::merge::UnmappedHeadsignMergeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// A route short name is not a number.
    #[error("route {route_id:?}: {source}")]
    UnparsableRouteCode {
        route_id: String,
        #[source]
        source: InvalidRouteCode,
    },

    /// The route number has no entry in the color table.
    #[error("route {route} (feed route {route_id:?}) has no color table entry")]
    UnknownRouteColor { route: RouteId, route_id: String },

    /// A stop's public code is not a number.
    #[error("stop {stop_id:?}: {source}")]
    UnparsableStopId {
        stop_id: String,
        #[source]
        source: InvalidStopCode,
    },

    /// A trip on a templated route fit zero or both direction templates.
    #[error(
        "trip {trip_id:?} on route {route}: stop sequence matches {} direction templates",
        .matched.len()
    )]
    AmbiguousDirectionTemplate {
        route: RouteId,
        trip_id: String,
        matched: Vec<Direction>,
    },

    #[error(transparent)]
    UnmappedHeadsignMergeSet(#[from] UnmappedHeadsignMergeSet),

    #[error("trip {trip_id:?} references unknown route {route_id:?}")]
    UnknownRoute { trip_id: String, route_id: String },

    #[error("trip {trip_id:?} references unknown stop {stop_id:?}")]
    UnknownStop { trip_id: String, stop_id: String },

    /// Two feed routes parse to the same route number.
    #[error("feed routes {first:?} and {second:?} are both route {route}")]
    DuplicateRoute {
        route: RouteId,
        first: String,
        second: String,
    },

    #[error("trip {trip_id:?}: {source}")]
    InvalidDirection {
        trip_id: String,
        #[source]
        source: InvalidDirection,
    },
}
