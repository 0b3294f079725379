//! Saskatoon Transit bus feed canonicalization.
//!
//! Turns the agency's GTFS route, stop and trip records into clean metadata
//! for the rider app: numeric route IDs with colors, tidy stop names, and one
//! stable headsign per route direction.

pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod merge;
pub mod pipeline;
pub mod sink;
pub mod template;
pub mod text;
