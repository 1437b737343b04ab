//! # resref
//!
//! Validated scalar identifiers and the resource tree underlying a
//! context-sensitive resource resolution engine: opaque, grammar-checked
//! names and ids, and the branch/leaf hierarchy they address.
pub mod error;
pub mod indices;
pub mod names;
pub mod resource_id;
pub mod score;
pub mod tree;

pub use error::{Error, MessageAggregator, Result};
pub use indices::{
    CandidateIndex, CandidateValueIndex, ConditionIndex, ConditionSetIndex, DecisionIndex,
    QualifierIndex, QualifierTypeIndex, ResourceIndex, ResourceTypeIndex,
};
pub use names::{QualifierName, QualifierTypeName, ResourceName, ResourceTypeName};
pub use resource_id::{join_segments, ResourceId};
pub use score::{ConditionPriority, QualifierMatchScore};
pub use tree::{Children, Node, Tree, ValidatingTree};
