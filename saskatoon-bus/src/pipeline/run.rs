//! One canonicalization run over a feed snapshot.

use tracing::{debug, info, trace};

use crate::classify::classify_route;
use crate::config::{AgencyRules, RouteRule};
use crate::domain::{Direction, RouteId, StopId};
use crate::error::PipelineError;
use crate::feed::{Feed, FeedTrip, StopVisit};
use crate::merge::{BucketKey, HeadsignBuckets};
use crate::sink::{MetadataSink, StopMetadata, TripMetadata};
use crate::text::{canonicalize_headsign, clean_stop_name};

use super::context::RunContext;

/// Counts from a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub routes: usize,
    pub stops: usize,
    /// Trips emitted to the sink
    pub trips: usize,
    pub excluded_trips: usize,
    /// Trips whose direction came from a stop template
    pub templated_trips: usize,
    /// (route, direction) buckets resolved
    pub buckets: usize,
}

/// Where a trip's final headsign comes from.
#[derive(Debug, Clone, Copy)]
enum TripLabel<'r> {
    /// Fixed by the route's direction template
    Template(&'r str),
    /// Whatever the trip's bucket resolves to
    Bucket,
}

/// A trip waiting for its bucket to resolve.
#[derive(Debug)]
struct PendingTrip<'f, 'r> {
    trip_id: &'f str,
    route: RouteId,
    direction: Direction,
    label: TripLabel<'r>,
    stops: Vec<u32>,
}

/// Turns feed snapshots into canonical route, stop and trip metadata.
///
/// Holds only the agency rules; all per-run state lives in a fresh
/// [`RunContext`], so one pipeline can process any number of feeds.
#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: AgencyRules,
}

impl Pipeline {
    pub fn new(rules: AgencyRules) -> Self {
        Self { rules }
    }

    /// Process a feed, sending finalized metadata to `sink`.
    ///
    /// Routes and stops are emitted as they are read. Trips are emitted only
    /// after every trip has been seen and every headsign bucket resolved, so
    /// on error no trip reaches the sink.
    pub fn run<S: MetadataSink>(
        &self,
        feed: &Feed,
        sink: &mut S,
    ) -> Result<RunSummary, PipelineError> {
        let mut ctx = RunContext::new();

        sink.agency(self.rules.agency_color());

        for record in &feed.routes {
            let classification = classify_route(record, &self.rules)?;
            let metadata = classification.route.to_metadata();
            debug!(
                route_id = %record.route_id,
                route = %classification.route.id,
                color = ?classification.route.color,
                "classified route"
            );
            ctx.register_route(&record.route_id, classification)?;
            sink.route(metadata);
        }

        for record in &feed.stops {
            let number = StopId::parse(&record.code).map_err(|source| {
                PipelineError::UnparsableStopId {
                    stop_id: record.stop_id.clone(),
                    source,
                }
            })?;
            ctx.register_stop(&record.stop_id, number);
            sink.stop(StopMetadata {
                id: number.get(),
                name: clean_stop_name(&record.name),
            });
        }

        // Collect: nothing is resolved until every trip has been bucketed.
        let mut buckets = HeadsignBuckets::new();
        let mut pending = Vec::with_capacity(feed.trips.len());
        let mut templated_trips = 0;
        for trip in &feed.trips {
            if self.rules.is_excluded(trip.raw_headsign()) {
                trace!(trip_id = %trip.trip_id, headsign = trip.raw_headsign(), "excluded trip");
                ctx.exclude_trip(&trip.trip_id);
                continue;
            }

            let pending_trip = self.collect_trip(&ctx, trip, &mut buckets)?;
            if matches!(pending_trip.label, TripLabel::Template(_)) {
                templated_trips += 1;
            }
            pending.push(pending_trip);
        }

        // Resolve: each bucket exactly once.
        let bucket_count = buckets.len();
        let labels = buckets.resolve_all(|route| self.rules.route(route).map(RouteRule::merges))?;

        let emitted = pending.len();
        for trip in pending {
            let headsign = match trip.label {
                TripLabel::Template(label) => label.to_string(),
                // Every bucketed trip observed its own key.
                TripLabel::Bucket => labels
                    .get(&BucketKey::new(trip.route, trip.direction))
                    .cloned()
                    .unwrap_or_default(),
            };
            trace!(
                trip_id = trip.trip_id,
                route = ctx.short_name(trip.route).unwrap_or_default(),
                direction = %trip.direction,
                %headsign,
                "finalized trip"
            );
            sink.trip(TripMetadata {
                trip_id: trip.trip_id.to_string(),
                route_id: trip.route.get(),
                direction: trip.direction.as_u8(),
                headsign,
                stops: trip.stops,
            });
        }

        let summary = RunSummary {
            routes: ctx.route_count(),
            stops: ctx.stop_count(),
            trips: emitted,
            excluded_trips: ctx.excluded_count(),
            templated_trips,
            buckets: bucket_count,
        };
        info!(
            routes = summary.routes,
            stops = summary.stops,
            trips = summary.trips,
            excluded = summary.excluded_trips,
            templated = summary.templated_trips,
            buckets = summary.buckets,
            "canonicalized feed"
        );
        Ok(summary)
    }

    /// Assign one trip its direction, label source and ordered stops.
    fn collect_trip<'f, 'r>(
        &self,
        ctx: &RunContext<'r>,
        trip: &'f FeedTrip,
        buckets: &mut HeadsignBuckets,
    ) -> Result<PendingTrip<'f, 'r>, PipelineError> {
        let classification = ctx
            .route(&trip.route_id)
            .ok_or_else(|| PipelineError::UnknownRoute {
                trip_id: trip.trip_id.clone(),
                route_id: trip.route_id.clone(),
            })?;
        let route = classification.route.id;
        let rule = classification.rule;

        let feed_direction = match trip.direction_id {
            None => Direction::default(),
            Some(flag) => {
                Direction::from_u8(flag).map_err(|source| PipelineError::InvalidDirection {
                    trip_id: trip.trip_id.clone(),
                    source,
                })?
            }
        };

        let (direction, label, visits) = match rule.template() {
            Some(template) => {
                let found = template.resolve(&trip.stop_times).map_err(|e| {
                    PipelineError::AmbiguousDirectionTemplate {
                        route,
                        trip_id: trip.trip_id.clone(),
                        matched: e.matched,
                    }
                })?;
                if found.direction != feed_direction {
                    debug!(
                        trip_id = %trip.trip_id,
                        %route,
                        feed = %feed_direction,
                        template = %found.direction,
                        "template overrides feed direction"
                    );
                }
                let ordered = template
                    .direction(found.direction)
                    .order_stops(&trip.stop_times);
                (found.direction, TripLabel::Template(found.label), ordered)
            }
            None => {
                let raw = trip.raw_headsign();
                let headsign = match rule.override_for(raw, feed_direction) {
                    Some(label) => label.to_string(),
                    None => canonicalize_headsign(raw),
                };
                buckets.observe(BucketKey::new(route, feed_direction), &headsign);

                let mut ordered: Vec<StopVisit> = trip.stop_times.clone();
                ordered.sort_by_key(|v| v.sequence);
                (feed_direction, TripLabel::Bucket, ordered)
            }
        };

        let stops = visits
            .iter()
            .map(|visit| {
                ctx.stop(&visit.stop_id)
                    .map(|s| s.get())
                    .ok_or_else(|| PipelineError::UnknownStop {
                        trip_id: trip.trip_id.clone(),
                        stop_id: visit.stop_id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PendingTrip {
            trip_id: &trip.trip_id,
            route,
            direction,
            label,
            stops,
        })
    }
}
