use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use resref::QualifierMatchScore;
use serde::Deserialize;

use super::{hierarchy_match, QualifierType};

static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct TerritoryConfig {
    #[serde(default)]
    hierarchy: AHashMap<String, String>,
}

/// ISO-3166-style two-letter territory codes, with an optional region
/// hierarchy identical in shape and scoring to
/// [`crate::qualifiers::types::LiteralQualifierType`]'s.
#[derive(Debug, Clone)]
pub struct TerritoryQualifierType {
    parents: AHashMap<String, String>,
}

impl TerritoryQualifierType {
    #[must_use]
    pub fn new(config: Option<&serde_json::Value>) -> resref::Result<Self> {
        let parents = match config {
            Some(value) => {
                let config: TerritoryConfig = serde_json::from_value(value.clone()).map_err(|_| {
                    resref::Error::invalid_scalar(value.to_string(), "territory qualifier config")
                })?;
                config.hierarchy
            }
            None => AHashMap::new(),
        };
        Ok(Self { parents })
    }

    fn is_known(&self, value: &str) -> bool {
        CODE_PATTERN.is_match(value) || self.parents.contains_key(value)
    }
}

impl QualifierType for TerritoryQualifierType {
    fn is_valid_condition_value(&self, value: &str) -> bool {
        self.is_known(value)
    }

    fn is_valid_context_value(&self, value: &str) -> bool {
        self.is_known(value)
    }

    fn match_value(&self, condition_value: &str, context_value: &str) -> QualifierMatchScore {
        if self.parents.is_empty() {
            if condition_value.eq_ignore_ascii_case(context_value) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_code_match() {
        let q = TerritoryQualifierType::new(None).unwrap();
        assert_eq!(q.match_value("US", "US").get(), 1.0);
    }

    #[test]
    fn different_codes_do_not_match() {
        let q = TerritoryQualifierType::new(None).unwrap();
        assert_eq!(q.match_value("US", "CA").get(), 0.0);
    }

    #[test]
    fn rejects_non_two_letter_codes_without_hierarchy() {
        let q = TerritoryQualifierType::new(None).unwrap();
        assert!(!q.is_valid_condition_value("USA"));
    }
}
