//! End-to-end tests for a full canonicalization run.

use super::*;
use crate::config::AgencyRules;
use crate::domain::{Direction, HexColor, RouteId};
use crate::error::PipelineError;
use crate::feed::{Feed, FeedRoute, FeedStop, FeedTrip, StopVisit};
use crate::merge::BucketKey;
use crate::sink::CollectedMetadata;

fn route(route_id: &str, short_name: &str) -> FeedRoute {
    FeedRoute {
        route_id: route_id.to_string(),
        short_name: short_name.to_string(),
        long_name: String::new(),
    }
}

/// Stop whose feed id and public code are the same number.
fn stop(code: &str) -> FeedStop {
    FeedStop {
        stop_id: code.to_string(),
        code: code.to_string(),
        name: format!("Stop {code}"),
    }
}

fn trip(
    trip_id: &str,
    route_id: &str,
    headsign: Option<&str>,
    direction_id: Option<u8>,
    stops: &[&str],
) -> FeedTrip {
    FeedTrip {
        trip_id: trip_id.to_string(),
        route_id: route_id.to_string(),
        headsign: headsign.map(str::to_string),
        direction_id,
        stop_times: stops
            .iter()
            .enumerate()
            .map(|(i, s)| StopVisit::new(*s, (i as u32 + 1) * 10))
            .collect(),
    }
}

fn stops(codes: &[&str]) -> Vec<FeedStop> {
    codes.iter().map(|c| stop(c)).collect()
}

fn run(feed: &Feed) -> Result<(RunSummary, CollectedMetadata), PipelineError> {
    let pipeline = Pipeline::new(AgencyRules::saskatoon().unwrap());
    let mut sink = CollectedMetadata::new();
    let summary = pipeline.run(feed, &mut sink)?;
    Ok((summary, sink))
}

fn headsign<'a>(sink: &'a CollectedMetadata, trip_id: &str) -> &'a str {
    &sink.find_trip(trip_id).unwrap().headsign
}

#[test]
fn forestgrove_direct_via_is_cleaned() {
    let feed = Feed {
        routes: vec![route("r28", "028")],
        stops: stops(&["1", "2"]),
        trips: vec![trip(
            "t1",
            "r28",
            Some("Forestgrove Direct via 8th St"),
            Some(0),
            &["1", "2"],
        )],
    };
    let (_, sink) = run(&feed).unwrap();
    assert_eq!(headsign(&sink, "t1"), "Forest Grv");
}

#[test]
fn zero_padded_route_classified() {
    let feed = Feed {
        routes: vec![route("13954", "060")],
        ..Feed::default()
    };
    let (summary, sink) = run(&feed).unwrap();
    let meta = sink.find_route(60).unwrap();
    assert_eq!(meta.short_name, "60");
    assert_eq!(meta.color, Some(HexColor::parse("8CC63F").unwrap()));
    assert_eq!(sink.agency_color, Some(HexColor::parse("027AA7").unwrap()));
    assert_eq!(summary.routes, 1);
}

#[test]
fn route_4_buckets_merge_by_exact_set() {
    let feed = Feed {
        routes: vec![route("r4", "004")],
        stops: stops(&["1", "2"]),
        trips: vec![
            trip("a1", "r4", Some("University"), Some(0), &["1", "2"]),
            trip("a2", "r4", Some("City Centre"), Some(0), &["1", "2"]),
            trip("b1", "r4", Some("University"), Some(1), &["2", "1"]),
            trip("b2", "r4", Some("City Ctr"), Some(1), &["2", "1"]),
            trip("b3", "r4", Some("Mayfair via 33rd St"), Some(1), &["2", "1"]),
        ],
    };
    let (summary, sink) = run(&feed).unwrap();

    assert_eq!(headsign(&sink, "a1"), "City Ctr");
    assert_eq!(headsign(&sink, "a2"), "City Ctr");
    // The direction 1 bucket resolves on its full set, not the first two.
    for id in ["b1", "b2", "b3"] {
        assert_eq!(headsign(&sink, id), "Mayfair");
    }
    assert_eq!(summary.buckets, 2);
    assert_eq!(summary.trips, 5);
}

#[test]
fn templated_route_uses_template_label() {
    let feed = Feed {
        routes: vec![route("r6", "006")],
        stops: stops(&["3459", "3346", "4012", "5588", "5590", "3347", "3460"]),
        trips: vec![
            // Feed says direction 1 and has a junk headsign; the template
            // decides both.
            trip(
                "t1",
                "r6",
                Some("Garbage Headsign via Nowhere"),
                Some(1),
                &["3459", "3346", "5588"],
            ),
            trip("t2", "r6", None, Some(0), &["5590", "3347", "3460"]),
        ],
    };
    let (summary, sink) = run(&feed).unwrap();

    let t1 = sink.find_trip("t1").unwrap();
    assert_eq!(t1.direction, 0);
    assert_eq!(t1.headsign, "Broadway");
    assert_eq!(t1.stops, vec![3459, 3346, 5588]);

    let t2 = sink.find_trip("t2").unwrap();
    assert_eq!(t2.direction, 1);
    assert_eq!(t2.headsign, "Mkt Mall");

    assert_eq!(summary.templated_trips, 2);
    assert_eq!(summary.buckets, 0);
}

#[test]
fn templated_route_orders_stops_by_template() {
    let feed = Feed {
        routes: vec![route("r6", "6")],
        stops: stops(&["3459", "3346", "4012", "5588"]),
        trips: vec![FeedTrip {
            trip_id: "t1".into(),
            route_id: "r6".into(),
            headsign: None,
            direction_id: None,
            stop_times: vec![
                StopVisit::new("3459", 1),
                StopVisit::new("4012", 2),
                StopVisit::new("3346", 3),
                StopVisit::new("5588", 4),
            ],
        }],
    };
    let (_, sink) = run(&feed).unwrap();
    assert_eq!(sink.find_trip("t1").unwrap().stops, vec![3459, 3346, 4012, 5588]);
}

#[test]
fn untemplated_stops_follow_sequence() {
    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1", "2", "3"]),
        trips: vec![FeedTrip {
            trip_id: "t1".into(),
            route_id: "r8".into(),
            headsign: Some("Downtown".into()),
            direction_id: Some(0),
            stop_times: vec![
                StopVisit::new("3", 30),
                StopVisit::new("1", 10),
                StopVisit::new("2", 20),
            ],
        }],
    };
    let (_, sink) = run(&feed).unwrap();
    assert_eq!(sink.find_trip("t1").unwrap().stops, vec![1, 2, 3]);
}

#[test]
fn empty_headsign_loses_to_named_variant() {
    let feed = Feed {
        routes: vec![route("r15", "15")],
        stops: stops(&["1"]),
        trips: vec![
            trip("t1", "r15", None, Some(1), &["1"]),
            trip("t2", "r15", Some("City Centre"), Some(1), &["1"]),
            trip("t3", "r15", Some(""), Some(1), &["1"]),
        ],
    };
    let (_, sink) = run(&feed).unwrap();
    for id in ["t1", "t2", "t3"] {
        assert_eq!(headsign(&sink, id), "City Ctr");
    }
}

#[test]
fn excluded_trips_are_skipped() {
    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1"]),
        trips: vec![
            trip("t1", "r8", Some("Downtown"), Some(0), &["1"]),
            trip("t2", "r8", Some("NOT IN SERVICE"), Some(0), &["1"]),
            // Excluded trips are dropped before their route is looked up.
            trip("t3", "nope", Some("Out Of Service"), Some(0), &["1"]),
        ],
    };
    let (summary, sink) = run(&feed).unwrap();
    assert_eq!(sink.trips.len(), 1);
    assert!(sink.find_trip("t2").is_none());
    assert_eq!(summary.excluded_trips, 2);
    assert_eq!(summary.trips, 1);
}

#[test]
fn overrides_apply_before_bucketing() {
    let feed = Feed {
        routes: vec![route("r311", "311"), route("r61", "061")],
        stops: stops(&["1"]),
        trips: vec![
            trip("am", "r311", Some("Special"), Some(0), &["1"]),
            trip("pm", "r311", Some("Special"), Some(1), &["1"]),
            trip("blank", "r61", None, Some(1), &["1"]),
        ],
    };
    let (_, sink) = run(&feed).unwrap();
    assert_eq!(headsign(&sink, "am"), "AM");
    assert_eq!(headsign(&sink, "pm"), "PM");
    assert_eq!(headsign(&sink, "blank"), "Blairmore");
}

#[test]
fn missing_direction_defaults_to_zero() {
    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1"]),
        trips: vec![trip("t1", "r8", Some("Downtown"), None, &["1"])],
    };
    let (_, sink) = run(&feed).unwrap();
    assert_eq!(sink.find_trip("t1").unwrap().direction, 0);
}

#[test]
fn stop_codes_and_names_emitted() {
    let feed = Feed {
        stops: vec![FeedStop {
            stop_id: "internal-7".into(),
            code: "0042".into(),
            name: "Eighth Street / Circle Drive Westbound".into(),
        }],
        ..Feed::default()
    };
    let (summary, sink) = run(&feed).unwrap();
    assert_eq!(sink.stops[0].id, 42);
    assert_eq!(sink.stops[0].name, "8th St / Cir Dr");
    assert_eq!(summary.stops, 1);
}

#[test]
fn unknown_route_color_is_fatal() {
    let feed = Feed {
        routes: vec![route("r999", "999")],
        ..Feed::default()
    };
    let err = run(&feed).unwrap_err();
    assert_eq!(
        err,
        PipelineError::UnknownRouteColor {
            route: RouteId::new(999),
            route_id: "r999".into(),
        }
    );
}

#[test]
fn unparsable_route_code_is_fatal() {
    let feed = Feed {
        routes: vec![route("rx", "X1")],
        ..Feed::default()
    };
    assert!(matches!(
        run(&feed).unwrap_err(),
        PipelineError::UnparsableRouteCode { .. }
    ));
}

#[test]
fn unparsable_stop_code_is_fatal() {
    let feed = Feed {
        stops: vec![FeedStop {
            stop_id: "s1".into(),
            code: "N/A".into(),
            name: String::new(),
        }],
        ..Feed::default()
    };
    let err = run(&feed).unwrap_err();
    assert!(
        matches!(err, PipelineError::UnparsableStopId { ref stop_id, .. } if stop_id == "s1")
    );
}

#[test]
fn ambiguous_template_is_fatal() {
    let feed = Feed {
        routes: vec![route("r6", "6")],
        stops: stops(&["1", "2"]),
        trips: vec![trip("t1", "r6", None, Some(0), &["1", "2"])],
    };
    let err = run(&feed).unwrap_err();
    assert_eq!(
        err,
        PipelineError::AmbiguousDirectionTemplate {
            route: RouteId::new(6),
            trip_id: "t1".into(),
            matched: vec![],
        }
    );
}

#[test]
fn unmapped_merge_set_is_fatal_and_emits_no_trips() {
    let rules = AgencyRules::saskatoon().unwrap();
    let feed = Feed {
        routes: vec![route("r4", "4")],
        stops: stops(&["1"]),
        trips: vec![
            trip("t1", "r4", Some("Mayfair"), Some(1), &["1"]),
            trip("t2", "r4", Some("Airport"), Some(1), &["1"]),
        ],
    };
    let mut sink = CollectedMetadata::new();
    let err = Pipeline::new(rules).run(&feed, &mut sink).unwrap_err();

    match err {
        PipelineError::UnmappedHeadsignMergeSet(unmapped) => {
            assert_eq!(unmapped.key, BucketKey::new(RouteId::new(4), Direction::One));
            assert_eq!(
                unmapped.variants,
                vec!["Airport".to_string(), "Mayfair".to_string()]
            );
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(sink.routes.len(), 1);
    assert!(sink.trips.is_empty());
}

#[test]
fn unknown_references_are_fatal() {
    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1"]),
        trips: vec![trip("t1", "r9", Some("Downtown"), Some(0), &["1"])],
    };
    assert!(matches!(
        run(&feed).unwrap_err(),
        PipelineError::UnknownRoute { .. }
    ));

    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1"]),
        trips: vec![trip("t1", "r8", Some("Downtown"), Some(0), &["1", "2"])],
    };
    assert_eq!(
        run(&feed).unwrap_err(),
        PipelineError::UnknownStop {
            trip_id: "t1".into(),
            stop_id: "2".into(),
        }
    );
}

#[test]
fn invalid_direction_is_fatal() {
    let feed = Feed {
        routes: vec![route("r8", "8")],
        stops: stops(&["1"]),
        trips: vec![trip("t1", "r8", Some("Downtown"), Some(2), &["1"])],
    };
    assert!(matches!(
        run(&feed).unwrap_err(),
        PipelineError::InvalidDirection { .. }
    ));
}

#[test]
fn duplicate_route_number_is_fatal() {
    let feed = Feed {
        routes: vec![route("a", "060"), route("b", "60")],
        ..Feed::default()
    };
    assert!(matches!(
        run(&feed).unwrap_err(),
        PipelineError::DuplicateRoute { .. }
    ));
}

#[test]
fn pipeline_is_reusable_across_runs() {
    let pipeline = Pipeline::new(AgencyRules::saskatoon().unwrap());
    let feed = Feed {
        routes: vec![route("r4", "4")],
        stops: stops(&["1"]),
        trips: vec![trip("t1", "r4", Some("University"), Some(0), &["1"])],
    };

    let mut first = CollectedMetadata::new();
    pipeline.run(&feed, &mut first).unwrap();
    let mut second = CollectedMetadata::new();
    pipeline.run(&feed, &mut second).unwrap();

    assert_eq!(first.trips, second.trips);
    assert_eq!(headsign(&second, "t1"), "University");
}
