use ahash::AHashMap;
use resref::QualifierName;

use crate::conditions::ContextProvider;

/// A context backed by a plain name → value map, validated against a
/// qualifier registry at construction time so an invalid or unknown
/// qualifier name never reaches resolution.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    values: AHashMap<QualifierName, String>,
}

impl MapContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `pairs` against `registry` (unknown qualifier names or
    /// values rejected by their type both fail) and build the context.
    pub fn validated(
        registry: &crate::qualifiers::QualifierRegistry,
        pairs: impl IntoIterator<Item = (QualifierName, String)>,
    ) -> crate::error::Result<Self> {
        let mut values = AHashMap::new();
        for (name, value) in pairs {
            let qualifier_index = registry.qualifier_by_name(&name)?;
            let qualifier = registry.qualifier(qualifier_index);
            let qualifier_type = registry.qualifier_type(qualifier.type_index);
            if !qualifier_type.implementation.is_valid_context_value(&value) {
                return Err(resref::Error::invalid_scalar(value, "context value").into());
            }
            values.insert(name, value);
        }
        Ok(Self { values })
    }

    /// Build a context without validation. Used for contexts assembled
    /// programmatically from values already known to be valid.
    #[must_use]
    pub fn unchecked(values: AHashMap<QualifierName, String>) -> Self {
        Self { values }
    }
}

impl ContextProvider for MapContext {
    fn value_of(&self, qualifier_name: &QualifierName) -> Option<&str> {
        self.values.get(qualifier_name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualifiers::types::LiteralQualifierType;
    use resref::QualifierTypeName;

    #[test]
    fn rejects_unknown_qualifier_names() {
        let registry = crate::qualifiers::QualifierRegistry::new();
        let err = MapContext::validated(&registry, vec![(QualifierName::new("language").unwrap(), "fr".to_string())])
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::NotFound { .. }));
    }

    #[test]
    fn accepts_valid_values() {
        let mut registry = crate::qualifiers::QualifierRegistry::new();
        let type_index = registry
            .add_qualifier_type(
                QualifierTypeName::new("literal").unwrap(),
                None,
                Box::new(LiteralQualifierType::new(None).unwrap()),
            )
            .unwrap();
        registry
            .add_qualifier(
                QualifierName::new("language").unwrap(),
                type_index,
                resref::ConditionPriority::DEFAULT,
            )
            .unwrap();
        let context =
            MapContext::validated(&registry, vec![(QualifierName::new("language").unwrap(), "fr".to_string())])
                .unwrap();
        assert_eq!(context.value_of(&QualifierName::new("language").unwrap()), Some("fr"));
    }
}
