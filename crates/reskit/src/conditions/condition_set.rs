use std::fmt;

use resref::{ConditionIndex, ConditionPriority, QualifierMatchScore};

use crate::qualifiers::QualifierRegistry;

use super::condition::{compare, Condition};
use super::key::render_condition_set_key;

/// A content-addressed identifier for a [`ConditionSet`]: the first 8 hex
/// characters of the BLAKE3 digest of its canonical key. Collisions are not
/// handled specially; they are astronomically unlikely at this truncation
/// and the canonical key remains available for exact comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionSetHash([u8; 4]);

impl ConditionSetHash {
    #[must_use]
    pub fn of(key: &str) -> Self {
        let digest = blake3::hash(key.as_bytes());
        let bytes = digest.as_bytes();
        Self([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl fmt::Display for ConditionSetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// An ordered, deduplicated set of conditions that must all match for the
/// set as a whole to match. Member conditions are sorted by
/// [`super::condition::compare`] so that two declarations listing the same
/// conditions in different orders intern to the same set.
#[derive(Debug, Clone)]
pub struct ConditionSet {
    pub conditions: Vec<ConditionIndex>,
    pub key: String,
    pub hash: ConditionSetHash,
}

impl ConditionSet {
    /// Build a condition set from `conditions`, sorting and deduplicating
    /// them against `registry` and `lookup`.
    pub fn new(
        registry: &QualifierRegistry,
        lookup: impl Fn(ConditionIndex) -> Condition,
        mut conditions: Vec<ConditionIndex>,
    ) -> Self {
        conditions.sort_by(|a, b| compare(registry, &lookup(*a), &lookup(*b)));
        conditions.dedup();
        let condition_keys: Vec<String> = conditions.iter().map(|&index| lookup(index).key(registry)).collect();
        let key = render_condition_set_key(&condition_keys);
        let hash = ConditionSetHash::of(&key);
        Self { conditions, key, hash }
    }

    /// This set's specificity: the highest priority among its member
    /// conditions, or [`ConditionPriority::MIN`] if it has none. Used to
    /// order a decision's condition sets so the most specific comes first.
    #[must_use]
    pub fn priority(&self, lookup: impl Fn(ConditionIndex) -> Condition) -> ConditionPriority {
        self.conditions
            .iter()
            .map(|&index| lookup(index).priority())
            .max()
            .unwrap_or(ConditionPriority::MIN)
    }

    /// The aggregate score of this set against a context lookup, or
    /// `None` if any member condition fails to match (score of zero).
    #[must_use]
    pub fn score(
        &self,
        registry: &QualifierRegistry,
        lookup: impl Fn(ConditionIndex) -> Condition,
        context: &dyn super::ContextProvider,
    ) -> Option<QualifierMatchScore> {
        let mut aggregate = QualifierMatchScore::PERFECT_MATCH;
        for &index in &self.conditions {
            let condition = lookup(index);
            let context_value = match &condition {
                Condition::Unconditional { .. } => None,
                Condition::Binary { qualifier_index, .. } => {
                    let name = &registry.qualifier(*qualifier_index).name;
                    context.value_of(name)
                }
            };
            let score = condition.score(registry, context_value);
            if !score.is_match() {
                return None;
            }
            aggregate = aggregate * score;
        }
        Some(aggregate)
    }
}
