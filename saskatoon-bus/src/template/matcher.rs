//! Direction templates and stop-sequence matching.
//!
//! Some routes publish a `direction_id` that doesn't track which way the bus
//! physically runs. For those routes each direction gets an ordered template
//! of stop IDs, and a trip is assigned to whichever template its stop
//! sequence fits.

use std::collections::HashMap;

use crate::domain::Direction;
use crate::feed::StopVisit;

use super::entry::{EntryKind, InvalidTemplateEntry, TemplateEntry};

/// Error building a template from its entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Entry(#[from] InvalidTemplateEntry),

    #[error("direction {0} has an empty label")]
    EmptyLabel(Direction),

    /// A template of only optional stops would match every trip.
    #[error("direction {0} has no required stops")]
    NoRequiredStops(Direction),
}

/// A trip fit zero or both direction templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stop sequence matches {} direction templates", .matched.len())]
pub struct AmbiguousDirection {
    /// Directions whose templates matched (empty or both).
    pub matched: Vec<Direction>,
}

/// One slot of a template after alternates are grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    Required(String),
    Optional(String),
    OneOf(Vec<String>),
}

impl Position {
    fn stops(&self) -> &[String] {
        match self {
            Position::Required(stop) | Position::Optional(stop) => std::slice::from_ref(stop),
            Position::OneOf(stops) => stops,
        }
    }
}

/// The ordered stop template for one direction of a route.
#[derive(Debug, Clone)]
pub struct DirectionStops {
    label: String,
    positions: Vec<Position>,
    /// Every template position naming each stop ID, ascending.
    slots: HashMap<String, Vec<usize>>,
}

impl DirectionStops {
    /// Build from parsed entries. Consecutive alternates share one position.
    pub fn new(
        direction: Direction,
        label: impl Into<String>,
        entries: Vec<TemplateEntry>,
    ) -> Result<Self, TemplateError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(TemplateError::EmptyLabel(direction));
        }

        let mut positions: Vec<Position> = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.kind {
                EntryKind::Required | EntryKind::Anchor => {
                    positions.push(Position::Required(entry.stop_id))
                }
                EntryKind::Optional => positions.push(Position::Optional(entry.stop_id)),
                EntryKind::Alternate => match positions.last_mut() {
                    Some(Position::OneOf(group)) => group.push(entry.stop_id),
                    _ => positions.push(Position::OneOf(vec![entry.stop_id])),
                },
            }
        }

        if positions
            .iter()
            .all(|p| matches!(p, Position::Optional(_)))
        {
            return Err(TemplateError::NoRequiredStops(direction));
        }

        let mut slots: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, position) in positions.iter().enumerate() {
            for stop in position.stops() {
                slots.entry(stop.clone()).or_default().push(idx);
            }
        }

        Ok(Self {
            label,
            positions,
            slots,
        })
    }

    /// Parse entry strings (`"==3459"`, `"++3346"`, ...) and build.
    pub fn parse<S: AsRef<str>>(
        direction: Direction,
        label: impl Into<String>,
        entries: &[S],
    ) -> Result<Self, TemplateError> {
        let entries = entries
            .iter()
            .map(|e| TemplateEntry::parse(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(direction, label, entries)
    }

    /// The label every trip in this direction gets.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a stop sequence (in travel order) fits this template.
    ///
    /// Required positions must appear as an ordered subsequence; optional
    /// positions are ignored. An alternate group needs exactly one of its
    /// stops on the trip.
    pub fn matches(&self, stops: &[&str]) -> bool {
        self.walk(stops).is_some()
    }

    /// Match `stops` against the template, recording which template position
    /// each stop consumed. Stops the match skipped get `None`.
    fn walk(&self, stops: &[&str]) -> Option<Vec<Option<usize>>> {
        let mut consumed = vec![None; stops.len()];
        let mut cursor = 0;
        for (idx, position) in self.positions.iter().enumerate() {
            let accepted = match position {
                Position::Optional(_) => continue,
                Position::Required(_) => position.stops(),
                Position::OneOf(group) => {
                    let present = group
                        .iter()
                        .filter(|g| stops.contains(&g.as_str()))
                        .count();
                    if present > 1 {
                        return None;
                    }
                    group.as_slice()
                }
            };

            let offset = stops[cursor..]
                .iter()
                .position(|s| accepted.iter().any(|a| a == s))?;
            consumed[cursor + offset] = Some(idx);
            cursor += offset + 1;
        }
        Some(consumed)
    }

    /// First template position naming `stop_id` at or after `from`, falling
    /// back to its first position.
    fn slot_from(&self, stop_id: &str, from: usize) -> Option<usize> {
        let slots = self.slots.get(stop_id)?;
        slots
            .iter()
            .copied()
            .find(|slot| *slot >= from)
            .or_else(|| slots.first().copied())
    }

    /// Sort stop visits into template order.
    ///
    /// Visits the template match consumed keep the position they matched, so
    /// a loop that returns to its first stop keeps that stop at both ends.
    /// Other templated stops (optional ones) take their next position at or
    /// after the previous visit's. A stop the template doesn't name takes the
    /// position of the visit before it. Ties fall back to the feed's sequence
    /// number.
    pub fn order_stops(&self, visits: &[StopVisit]) -> Vec<StopVisit> {
        let mut in_feed_order: Vec<&StopVisit> = visits.iter().collect();
        in_feed_order.sort_by_key(|v| v.sequence);

        let stops: Vec<&str> = in_feed_order.iter().map(|v| v.stop_id.as_str()).collect();
        let consumed = self
            .walk(&stops)
            .unwrap_or_else(|| vec![None; stops.len()]);

        let mut last_rank = 0;
        let mut keyed: Vec<((usize, u32), &StopVisit)> = in_feed_order
            .into_iter()
            .zip(consumed)
            .map(|(visit, slot)| {
                let rank = slot
                    .or_else(|| self.slot_from(&visit.stop_id, last_rank))
                    .unwrap_or(last_rank);
                last_rank = rank;
                ((rank, visit.sequence), visit)
            })
            .collect();
        keyed.sort_by_key(|(key, _)| *key);

        keyed.into_iter().map(|(_, visit)| visit.clone()).collect()
    }
}

/// Result of matching a trip against a route's templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateMatch<'t> {
    pub direction: Direction,
    pub label: &'t str,
}

/// Both direction templates of a route.
#[derive(Debug, Clone)]
pub struct DirectionTemplate {
    zero: DirectionStops,
    one: DirectionStops,
}

impl DirectionTemplate {
    pub fn new(zero: DirectionStops, one: DirectionStops) -> Self {
        Self { zero, one }
    }

    pub fn direction(&self, direction: Direction) -> &DirectionStops {
        match direction {
            Direction::Zero => &self.zero,
            Direction::One => &self.one,
        }
    }

    /// Decide which direction a trip runs.
    ///
    /// The trip must fit exactly one template; fitting none or both means the
    /// templates need updating.
    pub fn resolve(&self, visits: &[StopVisit]) -> Result<TemplateMatch<'_>, AmbiguousDirection> {
        let mut ordered: Vec<&StopVisit> = visits.iter().collect();
        ordered.sort_by_key(|v| v.sequence);
        let stops: Vec<&str> = ordered.iter().map(|v| v.stop_id.as_str()).collect();

        let matched: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| self.direction(*d).matches(&stops))
            .collect();

        match matched.as_slice() {
            [direction] => Ok(TemplateMatch {
                direction: *direction,
                label: self.direction(*direction).label(),
            }),
            _ => Err(AmbiguousDirection { matched }),
        }
    }
}
