//! Qualifiers and the qualifier-type registry.
pub mod registry;
pub mod types;

use resref::{QualifierIndex, QualifierName, QualifierTypeIndex};

pub use registry::QualifierRegistry;
pub use types::QualifierType;

/// A named dimension of context, bound to a [`QualifierType`] and carrying a
/// default priority used when a condition over this qualifier does not
/// specify one explicitly.
#[derive(Debug, Clone)]
pub struct Qualifier {
    pub name: QualifierName,
    pub type_index: QualifierTypeIndex,
    pub default_priority: resref::ConditionPriority,
}

/// A registered [`QualifierType`] implementation, addressed by
/// [`QualifierTypeIndex`].
pub struct RegisteredQualifierType {
    pub name: resref::QualifierTypeName,
    pub config: Option<serde_json::Value>,
    pub implementation: Box<dyn QualifierType>,
}

impl std::fmt::Debug for RegisteredQualifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredQualifierType")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Clone for RegisteredQualifierType {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            config: self.config.clone(),
            implementation: self.implementation.clone_boxed(),
        }
    }
}

/// Resolve a [`QualifierIndex`] back to its owning [`Qualifier`]. Implemented
/// by the builder/snapshot types that actually hold the interning tables.
pub trait QualifierLookup {
    fn qualifier(&self, index: QualifierIndex) -> &Qualifier;
    fn qualifier_type(&self, index: QualifierTypeIndex) -> &RegisteredQualifierType;
}
