//! Headsign merge rules.

use std::collections::BTreeSet;

use crate::domain::Direction;

/// Error building a route's merge table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeRuleError {
    /// Fewer than two non-empty variants: nothing to merge.
    #[error("merge rule for {label:?} needs at least two non-empty variants")]
    TooFewVariants { label: String },

    #[error("merge rule label must not be empty")]
    EmptyLabel,

    #[error("variant set {variants:?} is registered twice for direction {scope}")]
    Duplicate { variants: Vec<String>, scope: String },
}

/// Maps an exact set of headsign variants to one canonical label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// `None` applies to either direction.
    direction: Option<Direction>,
    variants: BTreeSet<String>,
    label: String,
}

impl MergeRule {
    /// Build a rule.
    ///
    /// The empty string is dropped from `variants`: an empty upstream headsign
    /// never takes part in a merge, so a rule listing it would otherwise never
    /// match.
    pub fn new<I, S>(
        direction: Option<Direction>,
        variants: I,
        label: impl Into<String>,
    ) -> Result<Self, MergeRuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        if label.is_empty() {
            return Err(MergeRuleError::EmptyLabel);
        }

        let variants: BTreeSet<String> = variants
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.is_empty())
            .collect();
        if variants.len() < 2 {
            return Err(MergeRuleError::TooFewVariants { label });
        }

        Ok(Self {
            direction,
            variants,
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// All merge rules for one route.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    rules: Vec<MergeRule>,
}

impl MergeTable {
    pub fn new(rules: Vec<MergeRule>) -> Result<Self, MergeRuleError> {
        for (i, rule) in rules.iter().enumerate() {
            let duplicate = rules[..i]
                .iter()
                .any(|r| r.direction == rule.direction && r.variants == rule.variants);
            if duplicate {
                return Err(MergeRuleError::Duplicate {
                    variants: rule.variants.iter().cloned().collect(),
                    scope: rule
                        .direction
                        .map_or_else(|| "any".to_string(), |d| d.to_string()),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Find the label for an exact variant set.
    ///
    /// Rules scoped to `direction` are tried before rules for either
    /// direction. A rule matches only if its set equals `variants`; subsets
    /// and supersets don't count.
    pub fn lookup(&self, direction: Direction, variants: &BTreeSet<String>) -> Option<&str> {
        let exact = |scope: Option<Direction>| {
            self.rules
                .iter()
                .find(|r| r.direction == scope && &r.variants == variants)
        };
        exact(Some(direction))
            .or_else(|| exact(None))
            .map(MergeRule::label)
    }
}
