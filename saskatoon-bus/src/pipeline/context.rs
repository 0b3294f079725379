//! Per-run state, threaded explicitly through one pass over a feed.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::classify::Classification;
use crate::domain::{RouteId, StopId};
use crate::error::PipelineError;

/// What one run has learned so far: classified routes, parsed stop codes and
/// excluded trips.
///
/// Created empty for each run and dropped at the end, so nothing leaks from
/// one feed into the next.
#[derive(Debug, Default)]
pub struct RunContext<'r> {
    /// Keyed by feed `route_id`
    routes: HashMap<String, Classification<'r>>,
    /// Route number to feed `route_id`
    numbers: BTreeMap<RouteId, String>,
    /// Feed `stop_id` to public stop number
    stops: HashMap<String, StopId>,
    excluded_trips: HashSet<String>,
}

impl<'r> RunContext<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified route. Each route number may appear once.
    pub fn register_route(
        &mut self,
        route_id: &str,
        classification: Classification<'r>,
    ) -> Result<(), PipelineError> {
        let number = classification.route.id;
        if let Some(first) = self.numbers.get(&number) {
            return Err(PipelineError::DuplicateRoute {
                route: number,
                first: first.clone(),
                second: route_id.to_string(),
            });
        }
        self.numbers.insert(number, route_id.to_string());
        self.routes.insert(route_id.to_string(), classification);
        Ok(())
    }

    pub fn route(&self, route_id: &str) -> Option<&Classification<'r>> {
        self.routes.get(route_id)
    }

    /// Display short name of a registered route number.
    pub fn short_name(&self, route: RouteId) -> Option<&str> {
        let route_id = self.numbers.get(&route)?;
        self.routes
            .get(route_id)
            .map(|c| c.route.short_name.as_str())
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn register_stop(&mut self, stop_id: &str, number: StopId) {
        self.stops.insert(stop_id.to_string(), number);
    }

    pub fn stop(&self, stop_id: &str) -> Option<StopId> {
        self.stops.get(stop_id).copied()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn exclude_trip(&mut self, trip_id: &str) {
        self.excluded_trips.insert(trip_id.to_string());
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded_trips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_route;
    use crate::config::AgencyRules;
    use crate::feed::FeedRoute;

    fn route(route_id: &str, short_name: &str) -> FeedRoute {
        FeedRoute {
            route_id: route_id.into(),
            short_name: short_name.into(),
            long_name: String::new(),
        }
    }

    #[test]
    fn registers_routes_and_short_names() {
        let rules = AgencyRules::saskatoon().unwrap();
        let mut ctx = RunContext::new();
        let c = classify_route(&route("13954", "060"), &rules).unwrap();
        ctx.register_route("13954", c).unwrap();

        assert_eq!(ctx.route("13954").unwrap().route.id, RouteId::new(60));
        assert_eq!(ctx.short_name(RouteId::new(60)), Some("60"));
        assert_eq!(ctx.short_name(RouteId::new(4)), None);
        assert_eq!(ctx.route_count(), 1);
    }

    #[test]
    fn duplicate_route_number_rejected() {
        let rules = AgencyRules::saskatoon().unwrap();
        let mut ctx = RunContext::new();
        ctx.register_route("a", classify_route(&route("a", "060"), &rules).unwrap())
            .unwrap();
        let err = ctx
            .register_route("b", classify_route(&route("b", "60"), &rules).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::DuplicateRoute {
                route: RouteId::new(60),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn stops_and_exclusions() {
        let mut ctx = RunContext::new();
        ctx.register_stop("s1", StopId::parse("3459").unwrap());
        assert_eq!(ctx.stop("s1").map(|s| s.get()), Some(3459));
        assert_eq!(ctx.stop("s2"), None);
        assert_eq!(ctx.stop_count(), 1);

        ctx.exclude_trip("t1");
        ctx.exclude_trip("t1");
        assert_eq!(ctx.excluded_count(), 1);
    }
}
