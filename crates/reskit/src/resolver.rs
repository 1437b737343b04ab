use std::sync::Arc;

use resref::{QualifierName, ResourceId};
use serde_json::Value;

use crate::conditions::ContextProvider;
use crate::context::MapContext;
use crate::error::{Error, Result};
use crate::options::ResolverOptions;
use crate::snapshot::Snapshot;

/// Context-driven selection and composition of candidate values over a
/// sealed [`Snapshot`]. Resolution never mutates the snapshot; only the
/// resolver's own context binding changes between calls.
#[derive(Clone)]
pub struct Resolver {
    snapshot: Arc<Snapshot>,
    context: Arc<dyn ContextProvider>,
    options: ResolverOptions,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl Resolver {
    #[must_use]
    pub fn new(snapshot: Arc<Snapshot>, context: impl ContextProvider + 'static) -> Self {
        Self {
            snapshot,
            context: Arc::new(context),
            options: ResolverOptions::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Derive a new resolver sharing this one's snapshot, bound to a fresh
    /// context built from `pairs`. Unknown qualifier names or values
    /// rejected by their qualifier type both fail.
    pub fn with_context(&self, pairs: impl IntoIterator<Item = (QualifierName, String)>) -> Result<Resolver> {
        let context = MapContext::validated(self.snapshot.qualifiers(), pairs)?;
        Ok(Self {
            snapshot: Arc::clone(&self.snapshot),
            context: Arc::new(context),
            options: self.options.clone(),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Resolve the resource at `resource_id` against this resolver's
    /// context. A pure function of (snapshot, context) once both are fixed.
    pub fn resolve(&self, resource_id: &ResourceId) -> Result<Value> {
        let index = *self.snapshot.tree().get_resource_by_id(resource_id.as_str())?;
        self.resolve_index(index)
    }

    fn resolve_index(&self, index: resref::ResourceIndex) -> Result<Value> {
        let resource = self.snapshot.resource(index);
        let decision = self.snapshot.decision(resource.decision_index);
        let qualifiers = self.snapshot.qualifiers();

        // `decision.condition_sets` is already ordered most-specific-first
        // (Builder::finalize_resource sorts it that way), and `evaluate`
        // preserves that declaration order, so position in its output
        // doubles as the priority rank.
        let mut matches = decision.evaluate(
            qualifiers,
            |i| self.snapshot.condition(i),
            |i| self.snapshot.condition_set(i).clone(),
            self.context.as_ref(),
        );
        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let position_of = |condition_set_index: resref::ConditionSetIndex| {
            decision.condition_sets.iter().position(|&c| c == condition_set_index).expect("matched set is a decision member")
        };

        let full_rank = matches
            .iter()
            .position(|&(condition_set_index, _)| resource.instance_values[position_of(condition_set_index)].is_full())
            .ok_or_else(|| Error::resolution(format!("{}: no full candidate matched the context", resource.name)))?;

        let resource_type = self.snapshot.resource_type(resource.type_index);
        let mut accumulator = resource.instance_values[position_of(matches[full_rank].0)].instance_value.clone();

        for &(condition_set_index, _) in matches[..full_rank].iter().rev() {
            let candidate = &resource.instance_values[position_of(condition_set_index)];
            accumulator = resource_type.merge_values(&accumulator, &candidate.instance_value, candidate.merge_method);
        }

        Ok(accumulator)
    }

    /// Resolve every leaf under the subtree rooted at `node`, composing
    /// branches into nested JSON objects keyed by child name.
    pub fn resolve_tree(&self, node: &resref::Node<resref::ResourceIndex>) -> Result<Value> {
        match node {
            resref::Node::Leaf { resource, id, .. } => match self.resolve_index(*resource) {
                Ok(value) => Ok(value),
                Err(error) if self.options.tolerates_leaf_failures() => {
                    self.options.notify_leaf_failure(id, &error);
                    Ok(Value::Null)
                }
                Err(error) => Err(error),
            },
            resref::Node::Branch { children, .. } | resref::Node::Root { children } => {
                let mut composed = serde_json::Map::new();
                for (name, child) in children.iter() {
                    let value = self.resolve_tree(child)?;
                    let tolerated_leaf_failure =
                        self.options.tolerates_leaf_failures() && value.is_null() && matches!(child, resref::Node::Leaf { .. });
                    if !tolerated_leaf_failure {
                        composed.insert(name.as_str().to_string(), value);
                    }
                }
                Ok(Value::Object(composed))
            }
        }
    }
}
