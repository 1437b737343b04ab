use std::fmt::Debug;

use serde_json::Value;

use super::merge::{merge, ResourceValueMergeMethod};

/// A resource's value domain: validates instance values and governs how
/// candidates of differing specificity combine.
pub trait ResourceType: Debug + Send + Sync {
    /// Is `value` an acceptable instance value for this type?
    fn validate_instance_value(&self, value: &Value) -> bool;
    /// Combine `older` (already selected, less specific) with `newer`
    /// (being applied on top) per `method`.
    fn merge_values(&self, older: &Value, newer: &Value, method: ResourceValueMergeMethod) -> Value;
    /// The canonical JSON schema instance values of this type must satisfy,
    /// if the type is schema-backed.
    fn schema(&self) -> Option<&Value>;
    /// Clone this implementation behind a fresh box, so a builder holding
    /// `Box<dyn ResourceType>` can still be cloned.
    fn clone_boxed(&self) -> Box<dyn ResourceType>;
}

/// The canonical resource type: any JSON value, merged via
/// [`crate::resources::merge::merge`] with no further validation.
#[derive(Debug, Default)]
pub struct JsonResourceType;

impl JsonResourceType {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResourceType for JsonResourceType {
    fn validate_instance_value(&self, _value: &Value) -> bool {
        true
    }

    fn merge_values(&self, older: &Value, newer: &Value, method: ResourceValueMergeMethod) -> Value {
        merge(older, newer, method)
    }

    fn schema(&self) -> Option<&Value> {
        None
    }

    fn clone_boxed(&self) -> Box<dyn ResourceType> {
        Box::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_type_accepts_anything() {
        let resource_type = JsonResourceType::new();
        assert!(resource_type.validate_instance_value(&json!(null)));
        assert!(resource_type.validate_instance_value(&json!({"a": 1})));
    }

    #[test]
    fn json_type_delegates_to_merge() {
        let resource_type = JsonResourceType::new();
        let older = json!({"a": 1});
        let newer = json!({"b": 2});
        assert_eq!(
            resource_type.merge_values(&older, &newer, ResourceValueMergeMethod::Augment),
            json!({"a": 1, "b": 2})
        );
    }
}
