use resref::{ConditionIndex, ConditionSetIndex, QualifierMatchScore};

use crate::qualifiers::QualifierRegistry;

use super::condition::Condition;
use super::condition_set::ConditionSet;
use super::key::render_decision_key;
use super::ContextProvider;

/// An ordered list of condition sets: the resolution unit a candidate is
/// declared against. Evaluating a decision against a context scores every
/// member set and reports which (if any) match, in declaration order.
#[derive(Debug, Clone)]
pub struct Decision {
    pub condition_sets: Vec<ConditionSetIndex>,
    pub key: String,
}

impl Decision {
    #[must_use]
    pub fn new(condition_sets: Vec<ConditionSetIndex>, set_hashes: impl Fn(ConditionSetIndex) -> String) -> Self {
        let hashes: Vec<String> = condition_sets.iter().map(|&index| set_hashes(index)).collect();
        let key = render_decision_key(&hashes);
        Self { condition_sets, key }
    }

    /// Evaluate every member condition set against `context`, returning
    /// `(condition_set_index, aggregate_score)` for each set that matched,
    /// in declaration order. The caller selects among matches (the highest
    /// aggregate score, falling back to declaration order) per its own
    /// selection policy.
    pub fn evaluate(
        &self,
        registry: &QualifierRegistry,
        condition_lookup: impl Fn(ConditionIndex) -> Condition,
        set_lookup: impl Fn(ConditionSetIndex) -> ConditionSet,
        context: &dyn ContextProvider,
    ) -> Vec<(ConditionSetIndex, QualifierMatchScore)> {
        self.condition_sets
            .iter()
            .filter_map(|&index| {
                let set = set_lookup(index);
                set.score(registry, &condition_lookup, context)
                    .map(|score| (index, score))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyContext;

    impl ContextProvider for EmptyContext {
        fn value_of(&self, _qualifier_name: &resref::QualifierName) -> Option<&str> {
            None
        }
    }

    #[test]
    fn evaluate_reports_only_matching_sets() {
        let registry = QualifierRegistry::new();
        let conditions = vec![Condition::always(), Condition::never()];
        let sets = vec![
            ConditionSet::new(&registry, |i| conditions[i.get()].clone(), vec![ConditionIndex::new(0)]),
            ConditionSet::new(&registry, |i| conditions[i.get()].clone(), vec![ConditionIndex::new(1)]),
        ];
        let decision = Decision::new(
            vec![ConditionSetIndex::new(0), ConditionSetIndex::new(1)],
            |i| sets[i.get()].hash.to_string(),
        );
        let context = EmptyContext;
        let matches = decision.evaluate(
            &registry,
            |i| conditions[i.get()].clone(),
            |i| sets[i.get()].clone(),
            &context,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, ConditionSetIndex::new(0));
    }
}
