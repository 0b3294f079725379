//! Feed records, as handed over by the host framework's GTFS reader.
//!
//! These are plain transfer types with no validation; the pipeline checks
//! codes and flags as it reads them.

use serde::Deserialize;

/// A pre-parsed feed snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    pub routes: Vec<FeedRoute>,
    pub stops: Vec<FeedStop>,
    pub trips: Vec<FeedTrip>,
}

/// A `routes.txt` record.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRoute {
    /// Feed-internal `route_id`
    pub route_id: String,

    /// `route_short_name`, zero-padded digits (e.g. "060")
    pub short_name: String,

    /// `route_long_name`
    #[serde(default)]
    pub long_name: String,
}

/// A `stops.txt` record.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedStop {
    /// Feed-internal `stop_id`, referenced by stop times
    pub stop_id: String,

    /// Public `stop_code` shown on the stop sign
    pub code: String,

    #[serde(default)]
    pub name: String,
}

/// A `trips.txt` record with its stop times attached.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedTrip {
    pub trip_id: String,

    /// Feed-internal `route_id`
    pub route_id: String,

    #[serde(default)]
    pub headsign: Option<String>,

    /// Raw `direction_id`; missing means 0
    #[serde(default)]
    pub direction_id: Option<u8>,

    #[serde(default)]
    pub stop_times: Vec<StopVisit>,
}

impl FeedTrip {
    /// The raw headsign, or "" when the feed left it blank.
    pub fn raw_headsign(&self) -> &str {
        self.headsign.as_deref().unwrap_or("")
    }
}

/// One stop of a trip: which stop, and where it falls in the trip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopVisit {
    pub stop_id: String,

    /// `stop_sequence`; increasing along the trip, not necessarily contiguous
    pub sequence: u32,
}

impl StopVisit {
    pub fn new(stop_id: impl Into<String>, sequence: u32) -> Self {
        Self {
            stop_id: stop_id.into(),
            sequence,
        }
    }
}
