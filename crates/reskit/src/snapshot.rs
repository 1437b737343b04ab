use ahash::AHashMap;
use resref::{ConditionIndex, ConditionSetIndex, DecisionIndex, ResourceIndex, ResourceTypeIndex, ResourceTypeName, ValidatingTree};

use crate::conditions::{Condition, ConditionSet, Decision};
use crate::qualifiers::QualifierRegistry;
use crate::resources::{Resource, ResourceType};

/// An immutable, frozen builder: A–F are fixed, safely shared by read-only
/// reference across threads. Produced by [`crate::builder::Builder::seal`].
pub struct Snapshot {
    qualifiers: QualifierRegistry,
    resource_types: Vec<(ResourceTypeName, Box<dyn ResourceType>)>,
    resource_types_by_name: AHashMap<ResourceTypeName, ResourceTypeIndex>,
    conditions: Vec<Condition>,
    condition_sets: Vec<ConditionSet>,
    decisions: Vec<Decision>,
    resources: Vec<Resource>,
    tree: ValidatingTree<ResourceIndex>,
}

impl Snapshot {
    #[must_use]
    pub(crate) fn new(
        qualifiers: QualifierRegistry,
        resource_types: Vec<(ResourceTypeName, Box<dyn ResourceType>)>,
        resource_types_by_name: AHashMap<ResourceTypeName, ResourceTypeIndex>,
        conditions: Vec<Condition>,
        condition_sets: Vec<ConditionSet>,
        decisions: Vec<Decision>,
        resources: Vec<Resource>,
        tree: ValidatingTree<ResourceIndex>,
    ) -> Self {
        Self {
            qualifiers,
            resource_types,
            resource_types_by_name,
            conditions,
            condition_sets,
            decisions,
            resources,
            tree,
        }
    }

    #[must_use]
    pub fn qualifiers(&self) -> &QualifierRegistry {
        &self.qualifiers
    }

    #[must_use]
    pub fn condition(&self, index: ConditionIndex) -> Condition {
        self.conditions[index.get()].clone()
    }

    #[must_use]
    pub fn condition_set(&self, index: ConditionSetIndex) -> &ConditionSet {
        &self.condition_sets[index.get()]
    }

    #[must_use]
    pub fn decision(&self, index: DecisionIndex) -> &Decision {
        &self.decisions[index.get()]
    }

    #[must_use]
    pub fn resource(&self, index: ResourceIndex) -> &Resource {
        &self.resources[index.get()]
    }

    #[must_use]
    pub fn resource_type(&self, index: ResourceTypeIndex) -> &dyn ResourceType {
        self.resource_types[index.get()].1.as_ref()
    }

    pub fn resource_type_by_name(&self, name: &ResourceTypeName) -> crate::error::Result<ResourceTypeIndex> {
        self.resource_types_by_name
            .get(name)
            .copied()
            .ok_or_else(|| crate::error::Error::not_found(format!("{name}: no such resource type")))
    }

    #[must_use]
    pub fn tree(&self) -> &ValidatingTree<ResourceIndex> {
        &self.tree
    }
}
