//! Built-in qualifier type implementations.
mod language;
mod literal;
mod territory;

use std::fmt::Debug;

use resref::QualifierMatchScore;

pub use language::LanguageQualifierType;
pub use literal::LiteralQualifierType;
pub use territory::TerritoryQualifierType;

/// A `scoreAsDefault`/hierarchy-aware falloff applied per hierarchy step.
/// Exact matches always score [`resref::QualifierMatchScore::PERFECT_MATCH`];
/// each step up an ancestor chain multiplies the score by this factor.
pub const DEPTH_FALLOFF: f64 = 0.9;

/// The score factor applied when a `language` condition is a strict BCP-47
/// subtag prefix of the context value (e.g. condition `en` against context
/// `en-GB`).
pub const SUBTAG_FALLOFF: f64 = 0.8;

/// A typed qualifier behavior: validates values and scores how well a
/// context value matches a condition value.
///
/// `match_value` is total on pairs that individually validated via
/// `is_valid_condition_value`/`is_valid_context_value`; it never fails.
/// Defaulting behavior (what happens when the context lacks the qualifier
/// entirely) is a property of the *condition*, not the type — see
/// `scoreAsDefault` in `crate::conditions`.
pub trait QualifierType: Debug + Send + Sync {
    /// Is `value` an acceptable value to appear in a *condition*?
    fn is_valid_condition_value(&self, value: &str) -> bool;
    /// Is `value` an acceptable value to appear in a runtime *context*?
    fn is_valid_context_value(&self, value: &str) -> bool;
    /// Score how well `context_value` matches `condition_value`.
    fn match_value(&self, condition_value: &str, context_value: &str) -> QualifierMatchScore;
    /// Clone this implementation behind a fresh box, so a builder holding
    /// `Box<dyn QualifierType>` can still be cloned.
    fn clone_boxed(&self) -> Box<dyn QualifierType>;
}

/// Shared hierarchy-match arithmetic used by [`LiteralQualifierType`] and
/// [`TerritoryQualifierType`]: walk the ancestor chain of `context_value`
/// looking for `condition_value`, scoring by depth.
pub(super) fn hierarchy_match(
    parents: &ahash::AHashMap<String, String>,
    condition_value: &str,
    context_value: &str,
) -> QualifierMatchScore {
    if condition_value == context_value {
        return QualifierMatchScore::PERFECT_MATCH;
    }
    let mut current = context_value;
    let mut distance = 0u32;
    while let Some(parent) = parents.get(current) {
        distance += 1;
        if parent == condition_value {
            return QualifierMatchScore::new(DEPTH_FALLOFF.powi(distance as i32));
        }
        current = parent;
    }
    QualifierMatchScore::NO_MATCH
}
