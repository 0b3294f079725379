//! Headsign merge resolver.
//!
//! Every (route, direction) bucket must end up with one label. Buckets that
//! saw several headsign variants are collapsed through an exact-set rule
//! table; a set with no rule is an error for a human to fix, never a guess.

mod bucket;
mod rule;

pub use bucket::{BucketKey, HeadsignBucket, HeadsignBuckets, UnmappedHeadsignMergeSet};
pub use rule::{MergeRule, MergeRuleError, MergeTable};
