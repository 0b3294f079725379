//! Text canonicalization for headsigns, stop names and route names.

mod clean;
mod headsign;

pub use clean::{
    capitalize_upper_case_words, clean_bounds, clean_label, clean_numbers, clean_street_types,
};
pub use headsign::{canonicalize_headsign, clean_route_long_name, clean_stop_name};
