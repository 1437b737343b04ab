//! Resource declarations, candidates, merge methods, and resource types.
pub mod candidate;
pub mod merge;
pub mod resource;
pub mod resource_type;

pub use candidate::{Candidate, CandidateCompleteness};
pub use merge::{merge, ResourceValueMergeMethod};
pub use resource::Resource;
pub use resource_type::{JsonResourceType, ResourceType};
