//! Output side: where finalized route, stop and trip metadata goes.

use serde::Serialize;

use crate::domain::HexColor;

/// A finalized route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMetadata {
    /// Numeric route ID
    pub id: u32,

    /// Short name without leading zeros
    pub short_name: String,

    pub long_name: String,

    /// `None` means the app uses the agency color
    pub color: Option<HexColor>,
}

/// A finalized stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopMetadata {
    /// Numeric ID from the public stop code
    pub id: u32,

    pub name: String,
}

/// A finalized trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripMetadata {
    /// Feed trip ID, for traceability back to the source data
    pub trip_id: String,

    pub route_id: u32,

    /// Direction bucket, 0 or 1
    pub direction: u8,

    /// Canonical headsign
    pub headsign: String,

    /// Stop IDs in display order
    pub stops: Vec<u32>,
}

/// Receives metadata as the pipeline finalizes it.
pub trait MetadataSink {
    fn agency(&mut self, color: HexColor);
    fn route(&mut self, route: RouteMetadata);
    fn stop(&mut self, stop: StopMetadata);
    fn trip(&mut self, trip: TripMetadata);
}

/// A sink that keeps everything in memory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedMetadata {
    pub agency_color: Option<HexColor>,
    pub routes: Vec<RouteMetadata>,
    pub stops: Vec<StopMetadata>,
    pub trips: Vec<TripMetadata>,
}

impl CollectedMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_route(&self, id: u32) -> Option<&RouteMetadata> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn find_trip(&self, trip_id: &str) -> Option<&TripMetadata> {
        self.trips.iter().find(|t| t.trip_id == trip_id)
    }
}

impl MetadataSink for CollectedMetadata {
    fn agency(&mut self, color: HexColor) {
        self.agency_color = Some(color);
    }

    fn route(&mut self, route: RouteMetadata) {
        self.routes.push(route);
    }

    fn stop(&mut self, stop: StopMetadata) {
        self.stops.push(stop);
    }

    fn trip(&mut self, trip: TripMetadata) {
        self.trips.push(trip);
    }
}
