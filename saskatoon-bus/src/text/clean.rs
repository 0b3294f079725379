//! General-purpose label cleaning rules shared by headsigns, stop names and
//! route names.
//!
//! Every rule is a whole-word, case-insensitive regex substitution, so the
//! text around a match (punctuation, spacing) is left untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A whole-word, case-insensitive substitution.
pub(crate) struct WordRule {
    pattern: Regex,
    replacement: &'static str,
}

impl WordRule {
    /// Build a rule matching `words` (a regex alternation body) as whole words.
    pub(crate) fn new(words: &str, replacement: &'static str) -> Self {
        // Patterns are compile-time literals.
        let pattern = Regex::new(&format!(r"(?i)\b(?:{words})\b")).unwrap();
        Self {
            pattern,
            replacement,
        }
    }

    pub(crate) fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(self.replacement))
            .into_owned()
    }
}

fn apply_all(rules: &[WordRule], input: &str) -> String {
    rules
        .iter()
        .fold(input.to_string(), |text, rule| rule.apply(&text))
}

static STREET_TYPES: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        // Multi-word forms first so "Centre" below doesn't split them.
        WordRule::new(r"shopping\s+cent(?:re|er)", "SC"),
        WordRule::new("street", "St"),
        WordRule::new("avenue", "Ave"),
        WordRule::new("road", "Rd"),
        WordRule::new("drive", "Dr"),
        WordRule::new("boulevard", "Blvd"),
        WordRule::new("crescent", "Cres"),
        WordRule::new("court", "Crt"),
        WordRule::new("place", "Pl"),
        WordRule::new("lane", "Ln"),
        WordRule::new("terrace", "Terr"),
        WordRule::new("parkway", "Pkwy"),
        WordRule::new("highway", "Hwy"),
        WordRule::new("circle", "Cir"),
        WordRule::new("heights", "Hts"),
        WordRule::new("village", "Vlg"),
        WordRule::new("grove", "Grv"),
        WordRule::new("square", "Sq"),
        WordRule::new("market", "Mkt"),
        WordRule::new("cent(?:re|er)", "Ctr"),
        WordRule::new("mount", "Mt"),
        WordRule::new("point", "Pt"),
    ]
});

/// Abbreviate street-type and place-type words ("Street" → "St").
pub fn clean_street_types(input: &str) -> String {
    apply_all(&STREET_TYPES, input)
}

static ORDINAL_WORDS: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        WordRule::new("first", "1st"),
        WordRule::new("second", "2nd"),
        WordRule::new("third", "3rd"),
        WordRule::new("fourth", "4th"),
        WordRule::new("fifth", "5th"),
        WordRule::new("sixth", "6th"),
        WordRule::new("seventh", "7th"),
        WordRule::new("eighth", "8th"),
        WordRule::new("ninth", "9th"),
        WordRule::new("tenth", "10th"),
        WordRule::new("eleventh", "11th"),
        WordRule::new("twelfth", "12th"),
    ]
});

static DIGIT_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)(st|nd|rd|th)\b").unwrap());

/// Normalize ordinals: spelled-out words become digits, and digit suffixes
/// are lower-cased ("8TH" → "8th").
pub fn clean_numbers(input: &str) -> String {
    let text = apply_all(&ORDINAL_WORDS, input);
    DIGIT_ORDINAL
        .replace_all(&text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_ascii_lowercase())
        })
        .into_owned()
}

static BOUNDS: LazyLock<WordRule> =
    LazyLock::new(|| WordRule::new("(?:north|south|east|west)bound", ""));

/// Drop compass-bound words ("Northbound"); the app shows direction itself.
pub fn clean_bounds(input: &str) -> String {
    BOUNDS.apply(input)
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([,.])").unwrap());

fn is_dangling(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | ',' | '/' | '&' | ';' | ':')
}

/// Final label tidy-up: collapse whitespace, pull punctuation onto the
/// preceding word, trim dangling separators at both ends.
pub fn clean_label(input: &str) -> String {
    let text = WHITESPACE.replace_all(input, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    text.trim_matches(is_dangling).to_string()
}

/// Title-case words written entirely in capitals ("LAWSON HEIGHTS" →
/// "Lawson Heights"). Mixed-case and single-letter words are left alone.
pub fn capitalize_upper_case_words(input: &str) -> String {
    static UPPER_WORD: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\b[[:upper:]][[:upper:]]+\b").unwrap());

    UPPER_WORD
        .replace_all(input, |caps: &Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .into_owned()
}
