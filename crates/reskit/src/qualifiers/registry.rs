use ahash::AHashMap;
use resref::{ConditionPriority, QualifierIndex, QualifierName, QualifierTypeIndex, QualifierTypeName};

use crate::error::{Error, Result};

use super::{Qualifier, RegisteredQualifierType};

/// The interning table for qualifier types and the qualifiers built on top
/// of them. Idempotent by name: registering the same name twice with the
/// same configuration returns the existing index; registering it again
/// with *different* configuration is a [`Error::Conflict`].
#[derive(Debug, Default)]
pub struct QualifierRegistry {
    types: Vec<RegisteredQualifierType>,
    types_by_name: AHashMap<QualifierTypeName, QualifierTypeIndex>,
    qualifiers: Vec<Qualifier>,
    qualifiers_by_name: AHashMap<QualifierName, QualifierIndex>,
}

impl QualifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-clone this registry, including its boxed qualifier-type
    /// implementations.
    #[must_use]
    pub fn clone_registry(&self) -> Self {
        Self {
            types: self.types.clone(),
            types_by_name: self.types_by_name.clone(),
            qualifiers: self.qualifiers.clone(),
            qualifiers_by_name: self.qualifiers_by_name.clone(),
        }
    }

    /// Register a qualifier type implementation. Idempotent by name.
    pub fn add_qualifier_type(
        &mut self,
        name: QualifierTypeName,
        config: Option<serde_json::Value>,
        implementation: Box<dyn super::QualifierType>,
    ) -> Result<QualifierTypeIndex> {
        if let Some(&index) = self.types_by_name.get(&name) {
            let existing = &self.types[index.get()];
            if existing.config == config {
                return Ok(index);
            }
            return Err(Error::conflict(format!(
                "{name}: qualifier type already registered with a different configuration"
            )));
        }
        let index = QualifierTypeIndex::new(self.types.len());
        self.types.push(RegisteredQualifierType {
            name: name.clone(),
            config,
            implementation,
        });
        self.types_by_name.insert(name, index);
        Ok(index)
    }

    pub fn qualifier_type_by_name(&self, name: &QualifierTypeName) -> Result<QualifierTypeIndex> {
        self.types_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(format!("{name}: no such qualifier type")))
    }

    #[must_use]
    pub fn qualifier_type(&self, index: QualifierTypeIndex) -> &RegisteredQualifierType {
        &self.types[index.get()]
    }

    /// Register a qualifier name bound to a qualifier type. Idempotent by
    /// name, as long as the bound type index agrees.
    pub fn add_qualifier(
        &mut self,
        name: QualifierName,
        type_index: QualifierTypeIndex,
        default_priority: ConditionPriority,
    ) -> Result<QualifierIndex> {
        if let Some(&index) = self.qualifiers_by_name.get(&name) {
            let existing = &self.qualifiers[index.get()];
            if existing.type_index == type_index {
                return Ok(index);
            }
            return Err(Error::conflict(format!(
                "{name}: qualifier already registered with a different type"
            )));
        }
        let index = QualifierIndex::new(self.qualifiers.len());
        self.qualifiers.push(Qualifier {
            name: name.clone(),
            type_index,
            default_priority,
        });
        self.qualifiers_by_name.insert(name, index);
        Ok(index)
    }

    pub fn qualifier_by_name(&self, name: &QualifierName) -> Result<QualifierIndex> {
        self.qualifiers_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(format!("{name}: no such qualifier")))
    }

    #[must_use]
    pub fn qualifier(&self, index: QualifierIndex) -> &Qualifier {
        &self.qualifiers[index.get()]
    }

    /// All registered qualifiers in declaration order, with their index.
    pub fn qualifiers(&self) -> impl Iterator<Item = (QualifierIndex, &Qualifier)> {
        self.qualifiers
            .iter()
            .enumerate()
            .map(|(i, qualifier)| (QualifierIndex::new(i), qualifier))
    }

    /// Validate `value` as a context value for `qualifier_index` and score
    /// it against `condition_value`, honoring `score_as_default` when
    /// `value` is absent.
    #[must_use]
    pub fn score(
        &self,
        qualifier_index: QualifierIndex,
        condition_value: &str,
        context_value: Option<&str>,
        score_as_default: Option<resref::QualifierMatchScore>,
    ) -> resref::QualifierMatchScore {
        match context_value {
            Some(context_value) => {
                let qualifier = self.qualifier(qualifier_index);
                let qualifier_type = self.qualifier_type(qualifier.type_index);
                qualifier_type
                    .implementation
                    .match_value(condition_value, context_value)
            }
            None => score_as_default.unwrap_or(resref::QualifierMatchScore::NO_MATCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualifiers::types::LiteralQualifierType;

    fn literal_type() -> Box<dyn super::super::QualifierType> {
        Box::new(LiteralQualifierType::new(None).unwrap())
    }

    #[test]
    fn registering_same_type_twice_is_idempotent() {
        let mut registry = QualifierRegistry::new();
        let name = QualifierTypeName::new("literal").unwrap();
        let a = registry
            .add_qualifier_type(name.clone(), None, literal_type())
            .unwrap();
        let b = registry
            .add_qualifier_type(name, None, literal_type())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn registering_same_type_name_with_different_config_conflicts() {
        let mut registry = QualifierRegistry::new();
        let name = QualifierTypeName::new("literal").unwrap();
        registry
            .add_qualifier_type(name.clone(), None, literal_type())
            .unwrap();
        let err = registry
            .add_qualifier_type(name, Some(serde_json::json!({"hierarchy": {}})), literal_type())
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn score_uses_default_when_context_absent() {
        let mut registry = QualifierRegistry::new();
        let type_name = QualifierTypeName::new("literal").unwrap();
        let type_index = registry
            .add_qualifier_type(type_name, None, literal_type())
            .unwrap();
        let qualifier_name = QualifierName::new("language").unwrap();
        let qualifier_index = registry
            .add_qualifier(qualifier_name, type_index, ConditionPriority::DEFAULT)
            .unwrap();
        let score = registry.score(
            qualifier_index,
            "en",
            None,
            Some(resref::QualifierMatchScore::new(0.5)),
        );
        assert_eq!(score.get(), 0.5);

        let score = registry.score(qualifier_index, "en", None, None);
        assert_eq!(score.get(), 0.0);
    }
}
