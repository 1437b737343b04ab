use std::cmp::Ordering;

use resref::{ConditionPriority, QualifierIndex, QualifierMatchScore};

use crate::{error::Result, qualifiers::QualifierRegistry};

use super::key::render_condition_key;

/// The operator a condition applies. `Matches` is the default binary
/// operator; `Always`/`Never` are unary "unconditional" operators that
/// carry no qualifier or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    Matches,
    Always,
    Never,
}

impl ConditionOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOperator::Matches => "matches",
            ConditionOperator::Always => "always",
            ConditionOperator::Never => "never",
        }
    }
}

/// A predicate: "this qualifier matches this value, with this priority", or
/// one of the unary unconditional operators `always`/`never`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Unconditional {
        operator: ConditionOperator,
    },
    Binary {
        qualifier_index: QualifierIndex,
        operator: ConditionOperator,
        value: String,
        priority: ConditionPriority,
        score_as_default: Option<QualifierMatchScore>,
    },
}

impl Condition {
    /// Build an `always`-matching condition.
    #[must_use]
    pub fn always() -> Self {
        Condition::Unconditional {
            operator: ConditionOperator::Always,
        }
    }

    /// Build a `never`-matching condition.
    #[must_use]
    pub fn never() -> Self {
        Condition::Unconditional {
            operator: ConditionOperator::Never,
        }
    }

    /// Validate `value` against the qualifier's type and build a `matches`
    /// condition over it.
    pub fn create(
        qualifiers: &QualifierRegistry,
        qualifier_index: QualifierIndex,
        value: impl Into<String>,
        priority: ConditionPriority,
        score_as_default: Option<QualifierMatchScore>,
    ) -> Result<Self> {
        let value = value.into();
        let qualifier = qualifiers.qualifier(qualifier_index);
        let qualifier_type = qualifiers.qualifier_type(qualifier.type_index);
        if !qualifier_type.implementation.is_valid_condition_value(&value) {
            return Err(resref::Error::invalid_scalar(value, "condition value").into());
        }
        Ok(Condition::Binary {
            qualifier_index,
            operator: ConditionOperator::Matches,
            value,
            priority,
            score_as_default,
        })
    }

    /// The priority used for ordering: [`ConditionPriority::MIN`] for
    /// unconditional conditions. An `always`/`never` condition carries no
    /// qualifier-driven specificity, so it sorts as the least specific —
    /// the fallback a decision tries last.
    #[must_use]
    pub fn priority(&self) -> ConditionPriority {
        match self {
            Condition::Unconditional { .. } => ConditionPriority::MIN,
            Condition::Binary { priority, .. } => *priority,
        }
    }

    #[must_use]
    pub fn score_as_default(&self) -> Option<QualifierMatchScore> {
        match self {
            Condition::Unconditional { .. } => None,
            Condition::Binary { score_as_default, .. } => *score_as_default,
        }
    }

    /// Compute the aggregate contribution of this condition against
    /// `context_value` (the context's value for this condition's
    /// qualifier, if any).
    #[must_use]
    pub fn score(&self, qualifiers: &QualifierRegistry, context_value: Option<&str>) -> QualifierMatchScore {
        match self {
            Condition::Unconditional { operator } => match operator {
                ConditionOperator::Always => QualifierMatchScore::PERFECT_MATCH,
                ConditionOperator::Never => QualifierMatchScore::NO_MATCH,
                ConditionOperator::Matches => QualifierMatchScore::NO_MATCH,
            },
            Condition::Binary {
                qualifier_index,
                value,
                score_as_default,
                ..
            } => qualifiers.score(*qualifier_index, value, context_value, *score_as_default),
        }
    }

    /// The canonical string form of this condition, used as its interning
    /// key. Equal keys mean equal conditions.
    #[must_use]
    pub fn key(&self, qualifiers: &QualifierRegistry) -> String {
        render_condition_key(self, qualifiers)
    }

    /// Parse a condition back from its canonical key, the inverse of
    /// [`Self::key`].
    pub fn from_key(key: &str, qualifiers: &QualifierRegistry) -> Result<Self> {
        super::key::parse_condition_key(key, qualifiers)
    }
}

/// Deterministic, total ordering: priority desc, then `scoreAsDefault` desc,
/// then qualifier name asc, then value asc. Unconditional conditions carry
/// [`ConditionPriority::MIN`] and so sort after every binary condition,
/// tried only as a last-resort fallback.
#[must_use]
pub fn compare(qualifiers: &QualifierRegistry, a: &Condition, b: &Condition) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| {
            let score_a = a.score_as_default().map_or(f64::MIN, QualifierMatchScore::get);
            let score_b = b.score_as_default().map_or(f64::MIN, QualifierMatchScore::get);
            score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
        })
        .then_with(|| qualifier_name(qualifiers, a).cmp(&qualifier_name(qualifiers, b)))
        .then_with(|| value_of(a).cmp(value_of(b)))
}

fn qualifier_name(qualifiers: &QualifierRegistry, condition: &Condition) -> String {
    match condition {
        Condition::Unconditional { operator } => operator.as_str().to_string(),
        Condition::Binary { qualifier_index, .. } => {
            qualifiers.qualifier(*qualifier_index).name.to_string()
        }
    }
}

fn value_of(condition: &Condition) -> &str {
    match condition {
        Condition::Unconditional { .. } => "",
        Condition::Binary { value, .. } => value,
    }
}
