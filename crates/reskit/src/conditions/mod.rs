//! Conditions, condition sets, and decisions: the predicate layer a
//! resource's candidates are matched against.
pub mod condition;
pub mod condition_set;
pub mod decision;
pub mod key;

pub use condition::{compare, Condition, ConditionOperator};
pub use condition_set::{ConditionSet, ConditionSetHash};
pub use decision::Decision;

/// Supplies context values for qualifiers by name during resolution.
/// Implemented by [`crate::context::MapContext`] and any host-provided
/// context source.
pub trait ContextProvider: Send + Sync {
    fn value_of(&self, qualifier_name: &resref::QualifierName) -> Option<&str>;
}
