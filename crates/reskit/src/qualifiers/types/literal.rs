use ahash::AHashMap;
use resref::QualifierMatchScore;
use serde::Deserialize;

use super::{hierarchy_match, QualifierType};

#[derive(Debug, Deserialize)]
struct LiteralConfig {
    #[serde(default)]
    hierarchy: AHashMap<String, String>,
}

/// Equality-based qualifier matching, with an optional parent/child
/// hierarchy.
///
/// Configuration JSON shape: `{"hierarchy": {"child": "parent", ...}}`.
/// When no hierarchy is configured, the literal domain is open: any
/// non-empty string is a valid condition/context value and only exact
/// equality matches. When a hierarchy is configured, only values appearing
/// in it (as a child or a parent) are valid, and a descendant context value
/// matches an ancestor condition value with a depth-based score below 1.0.
#[derive(Debug, Clone)]
pub struct LiteralQualifierType {
    parents: AHashMap<String, String>,
}

impl LiteralQualifierType {
    #[must_use]
    pub fn new(config: Option<&serde_json::Value>) -> resref::Result<Self> {
        let parents = match config {
            Some(value) => {
                let config: LiteralConfig = serde_json::from_value(value.clone())
                    .map_err(|_| resref::Error::invalid_scalar(value.to_string(), "literal qualifier config"))?;
                config.hierarchy
            }
            None => AHashMap::new(),
        };
        Ok(Self { parents })
    }

    fn is_known(&self, value: &str) -> bool {
        if self.parents.is_empty() {
            !value.is_empty()
        } else {
            self.parents.contains_key(value) || self.parents.values().any(|v| v == value)
        }
    }
}

impl QualifierType for LiteralQualifierType {
    fn is_valid_condition_value(&self, value: &str) -> bool {
        self.is_known(value)
    }

    fn is_valid_context_value(&self, value: &str) -> bool {
        self.is_known(value)
    }

    fn match_value(&self, condition_value: &str, context_value: &str) -> QualifierMatchScore {
        if self.parents.is_empty() {
            if condition_value == context_value {
                QualifierMatchScore::PERFECT_MATCH
            } else {
                QualifierMatchScore::NO_MATCH
            }
        } else {
            hierarchy_match(&self.parents, condition_value, context_value)
        }
    }

    fn clone_boxed(&self) -> Box<dyn QualifierType> {
        Box::new(self.clone())
    }
}
