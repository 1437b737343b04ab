use resref::ConditionSetIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::merge::ResourceValueMergeMethod;

/// Is a candidate's instance value complete on its own, or does it need to
/// be merged over a less-specific candidate to produce a usable value?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateCompleteness {
    Full,
    Partial,
}

impl Default for CandidateCompleteness {
    fn default() -> Self {
        CandidateCompleteness::Full
    }
}

/// One declared instance value for a resource, conditioned on a
/// [`super::super::conditions::ConditionSet`].
#[derive(Debug, Clone)]
pub struct Candidate {
    pub condition_set_index: ConditionSetIndex,
    pub instance_value: Value,
    pub merge_method: ResourceValueMergeMethod,
    pub completeness: CandidateCompleteness,
}

impl Candidate {
    #[must_use]
    pub fn new(
        condition_set_index: ConditionSetIndex,
        instance_value: Value,
        merge_method: ResourceValueMergeMethod,
        completeness: CandidateCompleteness,
    ) -> Self {
        Self {
            condition_set_index,
            instance_value,
            merge_method,
            completeness,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.completeness == CandidateCompleteness::Full
    }
}
