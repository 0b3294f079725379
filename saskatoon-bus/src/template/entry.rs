//! Template entry syntax.

use std::fmt;

/// Error returned when a template entry string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid template entry {entry:?}: {reason}")]
pub struct InvalidTemplateEntry {
    entry: String,
    reason: &'static str,
}

/// How a template entry constrains a trip's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Bare stop ID: must be visited, in order.
    Required,
    /// `++ID`: may be skipped.
    Optional,
    /// `!=ID`: one of a run of consecutive alternates must be visited.
    Alternate,
    /// `==ID`: must be visited, in order. Marks the terminals of a direction.
    Anchor,
}

/// One entry of a direction template, e.g. `"++3346"`.
#[derive(Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub kind: EntryKind,
    pub stop_id: String,
}

impl TemplateEntry {
    /// Parse the entry syntax: an optional two-character tag, then a stop ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use saskatoon_bus::template::{EntryKind, TemplateEntry};
    ///
    /// let entry = TemplateEntry::parse("++3346").unwrap();
    /// assert_eq!(entry.kind, EntryKind::Optional);
    /// assert_eq!(entry.stop_id, "3346");
    ///
    /// assert_eq!(TemplateEntry::parse("5588").unwrap().kind, EntryKind::Required);
    /// assert!(TemplateEntry::parse("==").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidTemplateEntry> {
        let s = s.trim();
        let (kind, stop_id) = if let Some(rest) = s.strip_prefix("++") {
            (EntryKind::Optional, rest)
        } else if let Some(rest) = s.strip_prefix("!=") {
            (EntryKind::Alternate, rest)
        } else if let Some(rest) = s.strip_prefix("==") {
            (EntryKind::Anchor, rest)
        } else {
            (EntryKind::Required, s)
        };

        if stop_id.is_empty() {
            return Err(InvalidTemplateEntry {
                entry: s.to_string(),
                reason: "missing stop ID",
            });
        }
        if stop_id.chars().any(char::is_whitespace) {
            return Err(InvalidTemplateEntry {
                entry: s.to_string(),
                reason: "stop ID must not contain whitespace",
            });
        }

        Ok(TemplateEntry {
            kind,
            stop_id: stop_id.to_string(),
        })
    }
}

impl fmt::Debug for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateEntry({self})")
    }
}

impl fmt::Display for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            EntryKind::Required => "",
            EntryKind::Optional => "++",
            EntryKind::Alternate => "!=",
            EntryKind::Anchor => "==",
        };
        write!(f, "{tag}{}", self.stop_id)
    }
}
