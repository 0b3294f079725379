//! Headsign buckets: collect every variant first, resolve once.
//!
//! Resolution must wait until all trips of a route have been seen. Resolving
//! as trips arrive would look up partial sets, which never match an
//! exact-set rule.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{Direction, RouteId};

use super::rule::MergeTable;

/// Identifies one bucket: a route and one of its directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub route: RouteId,
    pub direction: Direction,
}

impl BucketKey {
    pub fn new(route: RouteId, direction: Direction) -> Self {
        Self { route, direction }
    }
}

/// The variants seen for a bucket matched no registered rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "route {} direction {}: no merge rule for headsign set {variants:?}",
    .key.route,
    .key.direction
)]
pub struct UnmappedHeadsignMergeSet {
    pub key: BucketKey,
    pub variants: Vec<String>,
}

/// Distinct cleaned headsigns seen for one bucket so far.
#[derive(Debug, Clone, Default)]
pub struct HeadsignBucket {
    variants: BTreeSet<String>,
}

impl HeadsignBucket {
    pub fn observe(&mut self, headsign: &str) {
        if !self.variants.contains(headsign) {
            self.variants.insert(headsign.to_string());
        }
    }

    /// Pick the bucket's label. Consumes the bucket.
    ///
    /// One distinct variant is its own label. The empty string is dropped
    /// whenever something else was seen. Two or more remaining variants need
    /// an exact rule in `table`.
    pub fn resolve(
        self,
        key: BucketKey,
        table: Option<&MergeTable>,
    ) -> Result<String, UnmappedHeadsignMergeSet> {
        let mut variants = self.variants;
        if variants.len() > 1 {
            variants.remove("");
        }

        if variants.len() <= 1 {
            return Ok(variants.into_iter().next().unwrap_or_default());
        }

        match table.and_then(|t| t.lookup(key.direction, &variants)) {
            Some(label) => {
                debug!(
                    route = %key.route,
                    direction = %key.direction,
                    ?variants,
                    label,
                    "merged headsigns"
                );
                Ok(label.to_string())
            }
            None => Err(UnmappedHeadsignMergeSet {
                key,
                variants: variants.into_iter().collect(),
            }),
        }
    }
}

/// All buckets of a run, keyed by (route, direction).
#[derive(Debug, Default)]
pub struct HeadsignBuckets {
    buckets: BTreeMap<BucketKey, HeadsignBucket>,
}

impl HeadsignBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: BucketKey, headsign: &str) {
        trace!(route = %key.route, direction = %key.direction, headsign, "observed headsign");
        self.buckets.entry(key).or_default().observe(headsign);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Resolve every bucket, in key order. Stops at the first unmapped set.
    pub fn resolve_all<'t, F>(
        self,
        tables: F,
    ) -> Result<BTreeMap<BucketKey, String>, UnmappedHeadsignMergeSet>
    where
        F: Fn(RouteId) -> Option<&'t MergeTable>,
    {
        self.buckets
            .into_iter()
            .map(|(key, bucket)| {
                bucket
                    .resolve(key, tables(key.route))
                    .map(|label| (key, label))
            })
            .collect()
    }
}
