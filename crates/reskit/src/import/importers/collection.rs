use resref::{ConditionPriority, QualifierMatchScore, ResourceId, ResourceName, ResourceTypeName};
use serde_json::Value;

use crate::builder::{Builder, LooseCandidate};
use crate::error::{Error, ErrorAggregator, Result};
use crate::import::condition_token;
use crate::import::importable::{ImportContext, Importable};
use crate::import::scheduler::{ImportOutcome, Importer};
use crate::resources::{CandidateCompleteness, ResourceValueMergeMethod};

/// Terminal stage: registers the loose candidates named by a `resourceCollection`
/// or `resourceTree` against `builder`.
///
/// A `resourceCollection` is `{"resources": [{"id", "type"?, "candidates": [...]}]}`,
/// each candidate naming its own `conditions`/`mergeMethod`/`completeness`/`value`.
///
/// A `resourceTree` has no explicit shape of its own: nested JSON objects
/// are walked as resource name segments until a value is reached that is
/// not itself an object, which becomes the candidate value for the resource
/// named by the path walked so far. If the current [`ImportContext`] already
/// names a *committed* target resource (e.g. from a file whose name
/// identified it), that walk never starts: the whole value, object or not,
/// becomes that resource's candidate outright. See [`ImportContext`]'s own
/// docs for what committed means and why both rules are needed — a bare
/// JSON object reached through an uncommitted walk is still ambiguous
/// between "more name segments" and "this resource's value is an object",
/// and committing is the only way to resolve that in the file's favor.
pub struct CollectionImporter;

impl CollectionImporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CollectionImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for CollectionImporter {
    fn handles(&self, item: &Importable) -> bool {
        matches!(item, Importable::ResourceCollection { .. } | Importable::ResourceTree { .. })
    }

    fn import(&self, item: &Importable, builder: &mut Builder) -> Result<ImportOutcome> {
        match item {
            Importable::ResourceCollection { collection, context } => {
                import_collection(builder, collection, context)?;
                Ok(ImportOutcome::consumed(vec![]))
            }
            Importable::ResourceTree { tree, context } => {
                import_tree(builder, tree, context)?;
                Ok(ImportOutcome::consumed(vec![]))
            }
            _ => Ok(ImportOutcome::skipped()),
        }
    }
}

fn import_tree(builder: &mut Builder, value: &Value, context: &ImportContext) -> Result<()> {
    if context.base_id_committed || !value.is_object() {
        let resource_id = context
            .base_id
            .clone()
            .ok_or_else(|| Error::importer("a resource tree leaf has no resource name to register against"))?;
        return builder.add_loose_candidate(LooseCandidate {
            resource_id,
            resource_type_name: None,
            condition_indices: context.conditions.clone(),
            merge_method: ResourceValueMergeMethod::default(),
            completeness: CandidateCompleteness::default(),
            instance_value: value.clone(),
        });
    }
    let object = value.as_object().expect("checked above");
    let mut errors = ErrorAggregator::new();
    for (key, child) in object {
        let outcome = ResourceName::new(key.clone())
            .map_err(Error::from)
            .and_then(|name| import_tree(builder, child, &context.with_child_segment(context.child_id(&name))));
        if let Err(error) = outcome {
            errors.push(error);
        }
    }
    errors.into_result()
}

fn import_collection(builder: &mut Builder, value: &Value, context: &ImportContext) -> Result<()> {
    let resources = value
        .get("resources")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::importer("resource collection is missing its \"resources\" array"))?;
    let mut errors = ErrorAggregator::new();
    for entry in resources {
        if let Err(error) = import_collection_entry(builder, entry, context) {
            errors.push(error);
        }
    }
    errors.into_result()
}

fn import_collection_entry(builder: &mut Builder, entry: &Value, context: &ImportContext) -> Result<()> {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::importer("resource collection entry is missing its \"id\""))?;
    let own_id = ResourceId::new(id)?;
    let resource_id = match &context.base_id {
        Some(base) => ResourceId::new(format!("{base}.{own_id}"))?,
        None => own_id,
    };
    let resource_type_name = entry
        .get("type")
        .and_then(Value::as_str)
        .map(ResourceTypeName::new)
        .transpose()?;
    let candidates = entry
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::importer(format!("{resource_id}: resource collection entry is missing its \"candidates\" array")))?;
    for candidate in candidates {
        import_candidate(builder, candidate, &resource_id, resource_type_name.clone(), context)?;
    }
    Ok(())
}

fn import_candidate(
    builder: &mut Builder,
    candidate: &Value,
    resource_id: &ResourceId,
    resource_type_name: Option<ResourceTypeName>,
    context: &ImportContext,
) -> Result<()> {
    let mut condition_indices = context.conditions.clone();
    if let Some(tokens) = candidate.get("conditions").and_then(Value::as_array) {
        let priority = candidate
            .get("priority")
            .and_then(Value::as_u64)
            .map(|priority| ConditionPriority::new(priority as u16));
        let score_as_default = candidate.get("scoreAsDefault").and_then(Value::as_f64).map(QualifierMatchScore::new);
        for token in tokens {
            let token = token
                .as_str()
                .ok_or_else(|| Error::importer(format!("{resource_id}: condition token must be a string")))?;
            condition_indices.push(condition_token::parse(builder, token, priority, score_as_default)?);
        }
    }
    let merge_method = match candidate.get("mergeMethod").and_then(Value::as_str) {
        Some(raw) => serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|_| Error::importer(format!("{resource_id}: invalid mergeMethod {raw:?}")))?,
        None => ResourceValueMergeMethod::default(),
    };
    let completeness = match candidate.get("completeness").and_then(Value::as_str) {
        Some(raw) => serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|_| Error::importer(format!("{resource_id}: invalid completeness {raw:?}")))?,
        None => CandidateCompleteness::default(),
    };
    let instance_value = candidate
        .get("value")
        .cloned()
        .ok_or_else(|| Error::importer(format!("{resource_id}: candidate is missing its \"value\"")))?;
    builder.add_loose_candidate(LooseCandidate {
        resource_id: resource_id.clone(),
        resource_type_name,
        condition_indices,
        merge_method,
        completeness,
        instance_value,
    })
}
