use ahash::AHashMap;
use resref::{
    ConditionIndex, ConditionPriority, ConditionSetIndex, DecisionIndex, QualifierIndex, QualifierMatchScore,
    QualifierTypeIndex, ResourceId, ResourceIndex, ResourceTypeIndex, ResourceTypeName, ValidatingTree,
};
use serde_json::Value;

use crate::conditions::{Condition, ConditionSet, Decision};
use crate::error::{Error, ErrorAggregator, Result};
use crate::options::ManagerOptions;
use crate::qualifiers::types::{LanguageQualifierType, LiteralQualifierType, TerritoryQualifierType};
use crate::qualifiers::QualifierRegistry;
use crate::resources::{Candidate, CandidateCompleteness, JsonResourceType, Resource, ResourceType, ResourceValueMergeMethod};
use crate::snapshot::Snapshot;

struct RegisteredResourceType {
    name: ResourceTypeName,
    implementation: Box<dyn ResourceType>,
}

/// A pending, not-yet-finalized resource: the accumulation of loose
/// candidates declared against a resource id before its decision is known.
#[derive(Default)]
struct PendingResource {
    type_index: Option<ResourceTypeIndex>,
    candidates: Vec<Candidate>,
}

/// The interner and streaming-declaration accumulator for B/C/D/F. Mutable
/// and monotonically growing; [`Builder::seal`] freezes it into an
/// immutable [`Snapshot`].
pub struct Builder {
    options: ManagerOptions,
    qualifiers: QualifierRegistry,
    resource_types: Vec<RegisteredResourceType>,
    resource_types_by_name: AHashMap<ResourceTypeName, ResourceTypeIndex>,
    conditions: Vec<Condition>,
    conditions_by_key: AHashMap<String, ConditionIndex>,
    condition_sets: Vec<ConditionSet>,
    condition_sets_by_key: AHashMap<String, ConditionSetIndex>,
    decisions: Vec<Decision>,
    decisions_by_key: AHashMap<String, DecisionIndex>,
    resources: Vec<Resource>,
    tree: ValidatingTree<ResourceIndex>,
    pending: AHashMap<ResourceId, PendingResource>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Additional candidates seeded into a builder produced by
/// [`Builder::clone_with`], interpreted exactly as
/// [`Builder::add_loose_candidate`] would.
#[derive(Default)]
pub struct CloneOptions {
    pub additional_candidates: Vec<LooseCandidate>,
}

/// A loose candidate declaration: a resource id, the conditions that gate
/// it (already built), a merge method, completeness, and its instance
/// value. This is the typed counterpart of the import pipeline's JSON
/// `json` loose-candidate shape.
pub struct LooseCandidate {
    pub resource_id: ResourceId,
    pub resource_type_name: Option<ResourceTypeName>,
    pub condition_indices: Vec<ConditionIndex>,
    pub merge_method: ResourceValueMergeMethod,
    pub completeness: CandidateCompleteness,
    pub instance_value: Value,
}

impl Builder {
    /// A builder pre-seeded with the built-in qualifier types (`literal`,
    /// `language`, `territory`) and the built-in `json` resource type, per
    /// [`ManagerOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ManagerOptions::default())
    }

    /// A builder configured per `options`: whether it starts with the
    /// built-in qualifier/resource types, and whether resource-type
    /// re-registration is strict.
    #[must_use]
    pub fn with_options(options: ManagerOptions) -> Self {
        let mut builder = Self {
            options,
            qualifiers: QualifierRegistry::new(),
            resource_types: Vec::new(),
            resource_types_by_name: AHashMap::new(),
            conditions: Vec::new(),
            conditions_by_key: AHashMap::new(),
            condition_sets: Vec::new(),
            condition_sets_by_key: AHashMap::new(),
            decisions: Vec::new(),
            decisions_by_key: AHashMap::new(),
            resources: Vec::new(),
            tree: ValidatingTree::new(),
            pending: AHashMap::new(),
        };
        builder.register_builtins();
        builder
    }

    fn register_builtins(&mut self) {
        if self.options.registers_builtin_qualifier_types() {
            self.qualifiers
                .add_qualifier_type(
                    resref::QualifierTypeName::new("literal").expect("valid literal name"),
                    None,
                    Box::new(LiteralQualifierType::new(None).expect("empty config is valid")),
                )
                .expect("fresh registry never conflicts");
            self.qualifiers
                .add_qualifier_type(
                    resref::QualifierTypeName::new("language").expect("valid literal name"),
                    None,
                    Box::new(LanguageQualifierType::new()),
                )
                .expect("fresh registry never conflicts");
            self.qualifiers
                .add_qualifier_type(
                    resref::QualifierTypeName::new("territory").expect("valid literal name"),
                    None,
                    Box::new(TerritoryQualifierType::new(None).expect("empty config is valid")),
                )
                .expect("fresh registry never conflicts");
        }
        if self.options.registers_builtin_resource_types() {
            self.add_resource_type(
                ResourceTypeName::new("json").expect("valid literal name"),
                Box::new(JsonResourceType::new()),
            )
            .expect("fresh registry never conflicts");
        }
    }

    #[must_use]
    pub fn qualifiers(&self) -> &QualifierRegistry {
        &self.qualifiers
    }

    pub fn add_qualifier_type(
        &mut self,
        name: resref::QualifierTypeName,
        config: Option<Value>,
        implementation: Box<dyn crate::qualifiers::QualifierType>,
    ) -> Result<QualifierTypeIndex> {
        self.qualifiers.add_qualifier_type(name, config, implementation)
    }

    pub fn add_qualifier(
        &mut self,
        name: resref::QualifierName,
        type_index: QualifierTypeIndex,
        default_priority: ConditionPriority,
    ) -> Result<QualifierIndex> {
        self.qualifiers.add_qualifier(name, type_index, default_priority)
    }

    /// Idempotent by name, unless [`ManagerOptions::strict_resource_type_registration`]
    /// is set, in which case re-registering an already-registered name is a
    /// [`Error::Conflict`] (resource types are not compared structurally, so
    /// strict mode cannot tell whether the second registration actually
    /// differs — it simply refuses the re-registration outright).
    pub fn add_resource_type(
        &mut self,
        name: ResourceTypeName,
        implementation: Box<dyn ResourceType>,
    ) -> Result<ResourceTypeIndex> {
        if let Some(&index) = self.resource_types_by_name.get(&name) {
            if self.options.is_strict_resource_type_registration() {
                return Err(Error::conflict(format!("{name}: resource type already registered")));
            }
            return Ok(index);
        }
        let index = ResourceTypeIndex::new(self.resource_types.len());
        self.resource_types.push(RegisteredResourceType {
            name: name.clone(),
            implementation,
        });
        self.resource_types_by_name.insert(name, index);
        Ok(index)
    }

    pub fn resource_type_by_name(&self, name: &ResourceTypeName) -> Result<ResourceTypeIndex> {
        self.resource_types_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(format!("{name}: no such resource type")))
    }

    fn resource_type(&self, index: ResourceTypeIndex) -> &dyn ResourceType {
        self.resource_types[index.get()].implementation.as_ref()
    }

    /// Validate `value` against the qualifier's type and intern the
    /// resulting condition, returning its existing index if an equal
    /// condition (by key) was already interned.
    pub fn add_condition(
        &mut self,
        qualifier_index: QualifierIndex,
        value: impl Into<String>,
        priority: ConditionPriority,
        score_as_default: Option<QualifierMatchScore>,
    ) -> Result<ConditionIndex> {
        let condition = Condition::create(&self.qualifiers, qualifier_index, value, priority, score_as_default)?;
        self.intern_condition(condition)
    }

    pub fn add_unconditional(&mut self, condition: Condition) -> Result<ConditionIndex> {
        self.intern_condition(condition)
    }

    fn intern_condition(&mut self, condition: Condition) -> Result<ConditionIndex> {
        let key = condition.key(&self.qualifiers);
        if let Some(&index) = self.conditions_by_key.get(&key) {
            return Ok(index);
        }
        let index = ConditionIndex::new(self.conditions.len());
        self.conditions.push(condition);
        self.conditions_by_key.insert(key, index);
        Ok(index)
    }

    #[must_use]
    pub fn condition(&self, index: ConditionIndex) -> Condition {
        self.conditions[index.get()].clone()
    }

    /// Canonicalize (sort, dedup) `indices` and intern the resulting set,
    /// returning its existing index if an equal set (by key) was already
    /// interned.
    pub fn add_condition_set(&mut self, indices: Vec<ConditionIndex>) -> Result<ConditionSetIndex> {
        let conditions = self.conditions.clone();
        let set = ConditionSet::new(&self.qualifiers, |i| conditions[i.get()].clone(), indices);
        if let Some(&index) = self.condition_sets_by_key.get(&set.key) {
            return Ok(index);
        }
        let index = ConditionSetIndex::new(self.condition_sets.len());
        self.condition_sets_by_key.insert(set.key.clone(), index);
        self.condition_sets.push(set);
        Ok(index)
    }

    #[must_use]
    pub fn condition_set(&self, index: ConditionSetIndex) -> &ConditionSet {
        &self.condition_sets[index.get()]
    }

    pub fn add_decision(&mut self, condition_set_indices: Vec<ConditionSetIndex>) -> Result<DecisionIndex> {
        let hashes = self.condition_sets.clone();
        let decision = Decision::new(condition_set_indices, |i| hashes[i.get()].hash.to_string());
        if let Some(&index) = self.decisions_by_key.get(&decision.key) {
            return Ok(index);
        }
        let index = DecisionIndex::new(self.decisions.len());
        self.decisions_by_key.insert(decision.key.clone(), index);
        self.decisions.push(decision);
        Ok(index)
    }

    #[must_use]
    pub fn decision(&self, index: DecisionIndex) -> &Decision {
        &self.decisions[index.get()]
    }

    /// Register a candidate against `resource_id`, creating the resource's
    /// pending shell on first reference.
    pub fn add_loose_candidate(&mut self, declaration: LooseCandidate) -> Result<()> {
        let condition_set_index = self.add_condition_set(declaration.condition_indices)?;
        let resource_type_index = match declaration.resource_type_name {
            Some(name) => self.resource_type_by_name(&name)?,
            None => self.resource_type_by_name(&ResourceTypeName::new("json").expect("valid literal name"))?,
        };
        let candidate = Candidate::new(
            condition_set_index,
            declaration.instance_value,
            declaration.merge_method,
            declaration.completeness,
        );
        let pending = self.pending.entry(declaration.resource_id.clone()).or_default();
        if pending.type_index.is_none() {
            pending.type_index = Some(resource_type_index);
        }
        if let Some(existing) = pending
            .candidates
            .iter()
            .find(|c| c.condition_set_index == condition_set_index)
        {
            let unchanged = existing.merge_method == candidate.merge_method
                && existing.completeness == candidate.completeness
                && existing.instance_value == candidate.instance_value;
            if unchanged {
                return Ok(());
            }
            return Err(Error::conflict(format!(
                "{}: duplicate candidate for the same condition set with differing content",
                declaration.resource_id
            )));
        }
        pending.candidates.push(candidate);
        Ok(())
    }

    /// Finalize a pending resource: order its candidates by condition-set
    /// specificity (most specific first, per § decision ordering), compute
    /// the resulting decision, and register the resource in the tree.
    pub fn finalize_resource(&mut self, resource_id: &ResourceId) -> Result<()> {
        let Some(mut pending) = self.pending.remove(resource_id) else {
            return Ok(());
        };
        let conditions = self.conditions.clone();
        let condition_sets = self.condition_sets.clone();
        pending.candidates.sort_by(|a, b| {
            let set_a = &condition_sets[a.condition_set_index.get()];
            let set_b = &condition_sets[b.condition_set_index.get()];
            set_b
                .priority(|i| conditions[i.get()].clone())
                .cmp(&set_a.priority(|i| conditions[i.get()].clone()))
                .then_with(|| set_a.key.cmp(&set_b.key))
        });
        let condition_set_indices: Vec<ConditionSetIndex> =
            pending.candidates.iter().map(|c| c.condition_set_index).collect();
        let decision_index = self.add_decision(condition_set_indices)?;
        let instance_values: Vec<Candidate> = pending.candidates.clone();
        let type_index = pending
            .type_index
            .ok_or_else(|| Error::conflict(format!("{resource_id}: no resource type")))?;
        let condition_set_count = self.decision(decision_index).condition_sets.len();
        let resource = Resource::new(
            Some(resource_id.clone()),
            resource_id.basename(),
            type_index,
            decision_index,
            instance_values,
            condition_set_count,
        )?;
        self.insert_resource(resource_id, resource)
    }

    fn insert_resource(&mut self, resource_id: &ResourceId, resource: Resource) -> Result<()> {
        let index = ResourceIndex::new(self.resources.len());
        self.resources.push(resource);
        self.tree.insert(resource_id.as_str(), index)?;
        Ok(())
    }

    /// Register a fully-specified resource (its decision already computed)
    /// directly, bypassing the pending-candidate accumulation.
    pub fn add_resource(
        &mut self,
        resource_id: ResourceId,
        type_index: ResourceTypeIndex,
        decision_index: DecisionIndex,
        instance_values: Vec<Candidate>,
    ) -> Result<()> {
        let condition_set_count = self.decision(decision_index).condition_sets.len();
        let resource = Resource::new(
            Some(resource_id.clone()),
            resource_id.basename(),
            type_index,
            decision_index,
            instance_values,
            condition_set_count,
        )?;
        self.insert_resource(&resource_id, resource)
    }

    #[must_use]
    pub fn resource(&self, index: ResourceIndex) -> &Resource {
        &self.resources[index.get()]
    }

    #[must_use]
    pub fn resource_type_at(&self, index: ResourceTypeIndex) -> &dyn ResourceType {
        self.resource_type(index)
    }

    /// Produce an independent builder sharing this one's interned tables
    /// (qualifiers, conditions, condition sets, decisions, resources),
    /// optionally seeded with additional candidates.
    pub fn clone_with(&self, options: CloneOptions) -> Result<Builder> {
        let mut clone = self.shallow_clone();
        for candidate in options.additional_candidates {
            clone.add_loose_candidate(candidate)?;
        }
        Ok(clone)
    }

    fn shallow_clone(&self) -> Builder {
        Builder {
            options: self.options.clone(),
            qualifiers: self.qualifiers.clone_registry(),
            resource_types: self
                .resource_types
                .iter()
                .map(|rt| RegisteredResourceType {
                    name: rt.name.clone(),
                    implementation: rt.implementation.clone_boxed(),
                })
                .collect(),
            resource_types_by_name: self.resource_types_by_name.clone(),
            conditions: self.conditions.clone(),
            conditions_by_key: self.conditions_by_key.clone(),
            condition_sets: self.condition_sets.clone(),
            condition_sets_by_key: self.condition_sets_by_key.clone(),
            decisions: self.decisions.clone(),
            decisions_by_key: self.decisions_by_key.clone(),
            resources: self.resources.clone(),
            tree: self.tree.clone(),
            pending: self.pending.clone(),
        }
    }

    /// Finalize every pending resource and freeze the builder into an
    /// immutable [`Snapshot`]. Aggregates finalization failures rather
    /// than stopping at the first one.
    pub fn seal(mut self) -> Result<Snapshot> {
        let mut errors = ErrorAggregator::new();
        let pending_ids: Vec<ResourceId> = self.pending.keys().cloned().collect();
        for resource_id in pending_ids {
            if let Err(error) = self.finalize_resource(&resource_id) {
                errors.push(error);
            }
        }
        errors.finish(Snapshot::new(
            self.qualifiers,
            self.resource_types
                .into_iter()
                .map(|rt| (rt.name, rt.implementation))
                .collect(),
            self.resource_types_by_name,
            self.conditions,
            self.condition_sets,
            self.decisions,
            self.resources,
            self.tree,
        ))
    }
}

impl Clone for PendingResource {
    fn clone(&self) -> Self {
        Self {
            type_index: self.type_index,
            candidates: self.candidates.clone(),
        }
    }
}
