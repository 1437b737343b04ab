use resref::{DecisionIndex, ResourceId, ResourceTypeIndex};

use crate::error::{Error, Result};

use super::Candidate;

/// A declared resource: a position in the tree, bound to a type and a
/// decision, with one candidate per condition set in that decision.
///
/// `instance_values[i]` is the candidate used when the decision's
/// condition set `i` wins resolution; its length must equal the number of
/// condition sets in `decision_index`'s decision, and `instance_values[i]`'s
/// `condition_set_index` must equal the decision's `i`-th condition set.
#[derive(Debug, Clone)]
pub struct Resource {
    pub path: Option<ResourceId>,
    pub name: resref::ResourceName,
    pub type_index: ResourceTypeIndex,
    pub decision_index: DecisionIndex,
    pub instance_values: Vec<Candidate>,
}

impl Resource {
    pub fn new(
        path: Option<ResourceId>,
        name: resref::ResourceName,
        type_index: ResourceTypeIndex,
        decision_index: DecisionIndex,
        instance_values: Vec<Candidate>,
        decision_condition_set_count: usize,
    ) -> Result<Self> {
        if instance_values.len() != decision_condition_set_count {
            return Err(Error::conflict(format!(
                "{name}: instance value count {} does not match decision's {} condition sets",
                instance_values.len(),
                decision_condition_set_count
            )));
        }
        Ok(Self {
            path,
            name,
            type_index,
            decision_index,
            instance_values,
        })
    }
}
