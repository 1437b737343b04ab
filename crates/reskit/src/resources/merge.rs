use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a candidate's instance value combines with a less-specific value
/// already selected for the same resource.
///
/// `Delete`'s instance value names the fields to remove from the
/// accumulator: an array of field names, or an object whose truthy-valued
/// keys are removed. Older content emits the `augment`+`null`-field
/// surrogate instead of `delete`; both forms are accepted everywhere a
/// merge method is read, per the accept-both/prefer-delete-where-available
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceValueMergeMethod {
    /// The candidate's value wins outright; nothing from a less-specific
    /// candidate survives.
    Replace,
    /// Object fields are merged recursively, field by field; a `null`
    /// field value in the more-specific candidate deletes that field from
    /// the merged result rather than being treated as a real value.
    Augment,
    /// Removes fields from the accumulator rather than contributing a
    /// value.
    Delete,
}

impl Default for ResourceValueMergeMethod {
    fn default() -> Self {
        ResourceValueMergeMethod::Augment
    }
}

/// Merge `more_specific` onto `base` per `method`.
///
/// `Replace` discards `base` entirely. `Augment` recurses into JSON objects
/// field by field, taking `more_specific`'s value for any field it sets
/// (deleting the field when that value is `null`) and falling back to
/// `base`'s value for fields it doesn't mention; non-object values behave
/// like `Replace`. `Delete` removes the fields named by `more_specific`
/// (an array of names, or an object whose truthy keys are names) from
/// `base`, leaving the rest untouched.
#[must_use]
pub fn merge(base: &Value, more_specific: &Value, method: ResourceValueMergeMethod) -> Value {
    match method {
        ResourceValueMergeMethod::Replace => more_specific.clone(),
        ResourceValueMergeMethod::Augment => augment(base, more_specific),
        ResourceValueMergeMethod::Delete => delete(base, more_specific),
    }
}

fn augment(base: &Value, more_specific: &Value) -> Value {
    match (base, more_specific) {
        (Value::Object(base_fields), Value::Object(overlay_fields)) => {
            let mut merged = base_fields.clone();
            for (key, value) in overlay_fields {
                if value.is_null() {
                    merged.remove(key);
                } else {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Value::Object(merged)
        }
        _ => more_specific.clone(),
    }
}

fn delete(base: &Value, fields_to_remove: &Value) -> Value {
    let Value::Object(base_fields) = base else {
        return base.clone();
    };
    let mut remaining = base_fields.clone();
    match fields_to_remove {
        Value::Array(names) => {
            for name in names {
                if let Some(name) = name.as_str() {
                    remaining.remove(name);
                }
            }
        }
        Value::Object(flags) => {
            for (name, flag) in flags {
                if flag.as_bool().unwrap_or(true) {
                    remaining.remove(name);
                }
            }
        }
        _ => {}
    }
    Value::Object(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replace_discards_base() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"a": 9});
        assert_eq!(merge(&base, &overlay, ResourceValueMergeMethod::Replace), overlay);
    }

    #[test]
    fn augment_merges_fields() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"a": 9});
        assert_eq!(
            merge(&base, &overlay, ResourceValueMergeMethod::Augment),
            json!({"a": 9, "b": 2})
        );
    }

    #[test]
    fn augment_null_deletes_field() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"b": null});
        assert_eq!(
            merge(&base, &overlay, ResourceValueMergeMethod::Augment),
            json!({"a": 1})
        );
    }

    #[test]
    fn augment_of_non_objects_behaves_like_replace() {
        let base = json!([1, 2, 3]);
        let overlay = json!([4, 5]);
        assert_eq!(merge(&base, &overlay, ResourceValueMergeMethod::Augment), overlay);
    }

    #[test]
    fn delete_removes_named_fields() {
        let base = json!({"a": 1, "b": 2, "c": 3});
        let overlay = json!(["a", "c"]);
        assert_eq!(merge(&base, &overlay, ResourceValueMergeMethod::Delete), json!({"b": 2}));
    }

    #[test]
    fn delete_via_truthy_object_flags() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"a": true});
        assert_eq!(merge(&base, &overlay, ResourceValueMergeMethod::Delete), json!({"b": 2}));
    }
}
