//! Direction template resolver.
//!
//! Assigns trips of feed-unreliable routes to a direction by matching their
//! stop sequence against one ordered template per direction.

mod entry;
mod matcher;

pub use entry::{EntryKind, InvalidTemplateEntry, TemplateEntry};
pub use matcher::{
    AmbiguousDirection, DirectionStops, DirectionTemplate, TemplateError, TemplateMatch,
};
