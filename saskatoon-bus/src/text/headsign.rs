//! Saskatoon Transit text canonicalization.
//!
//! Trip headsigns in the feed are hand-typed and noisy: misspelled place
//! names, "via ..." routing notes, and descriptors like "Direct" that the
//! app doesn't want. [`canonicalize_headsign`] reduces them to the short
//! vocabulary used by the merge table.

use std::sync::LazyLock;

use regex::Regex;

use super::clean::{
    WordRule, capitalize_upper_case_words, clean_bounds, clean_label, clean_numbers,
    clean_street_types,
};

static VIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+via\s").unwrap());

/// Known feed typos and agency-specific abbreviations, applied in order.
static FIXES: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        WordRule::new("confederartion", "Confederation"),
        WordRule::new("forestgrove", "Forest Grv"),
        WordRule::new("ciity", "City"),
        WordRule::new("cenrtre", "Centre"),
        WordRule::new("industrial", "Ind"),
        // Service descriptors, not destinations.
        WordRule::new("direct", ""),
        WordRule::new("(?:north|south|east|west)bound", ""),
    ]
});

/// Drop everything from the first " via " onwards.
fn strip_via(input: &str) -> &str {
    match VIA.find(input) {
        Some(m) => &input[..m.start()],
        None => input,
    }
}

/// Clean a raw trip headsign into its display form.
///
/// Steps run in a fixed order: strip the "via" clause, fix typos, abbreviate
/// street types and numbers, then tidy the label. The result is a fixed
/// point: cleaning it again returns it unchanged.
///
/// # Examples
///
/// ```
/// use saskatoon_bus::text::canonicalize_headsign;
///
/// assert_eq!(canonicalize_headsign("Forestgrove Direct via 8th St"), "Forest Grv");
/// assert_eq!(canonicalize_headsign("City Centre"), "City Ctr");
/// assert_eq!(canonicalize_headsign(""), "");
/// ```
pub fn canonicalize_headsign(raw: &str) -> String {
    let text = strip_via(raw);
    let text = FIXES
        .iter()
        .fold(text.to_string(), |text, rule| rule.apply(&text));
    let text = clean_street_types(&text);
    let text = clean_numbers(&text);
    clean_label(&text)
}

/// Clean a stop name for display.
pub fn clean_stop_name(raw: &str) -> String {
    let text = clean_bounds(raw);
    let text = clean_street_types(&text);
    let text = clean_numbers(&text);
    clean_label(&text)
}

/// Clean a route long name for display. The feed publishes some of these in
/// all capitals.
pub fn clean_route_long_name(raw: &str) -> String {
    let text = capitalize_upper_case_words(raw);
    let text = clean_street_types(&text);
    clean_label(&text)
}
