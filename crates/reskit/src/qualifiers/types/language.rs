use once_cell::sync::Lazy;
use regex::Regex;
use resref::QualifierMatchScore;

use super::{QualifierType, SUBTAG_FALLOFF};

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("valid regex"));

/// BCP-47-style language tag matching with subtag fallback.
///
/// An exact tag match scores [`resref::QualifierMatchScore::PERFECT_MATCH`].
/// A condition tag that is a strict subtag prefix of the context tag (e.g.
/// condition `en` against context `en-GB`) matches with a reduced score;
/// the reverse — a more specific condition against a less specific context
/// (condition `en-GB`, context `en`) — does not match at all.
#[derive(Debug, Default, Clone)]
pub struct LanguageQualifierType;

impl LanguageQualifierType {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QualifierType for LanguageQualifierType {
    fn is_valid_condition_value(&self, value: &str) -> bool {
        TAG_PATTERN.is_match(value)
    }

    fn is_valid_context_value(&self, value: &str) -> bool {
        TAG_PATTERN.is_match(value)
    }

    fn match_value(&self, condition_value: &str, context_value: &str) -> QualifierMatchScore {
        if condition_value.eq_ignore_ascii_case(context_value) {
            return QualifierMatchScore::PERFECT_MATCH;
        }
        let prefix = format!("{condition_value}-");
        if context_value
            .to_ascii_lowercase()
            .starts_with(&prefix.to_ascii_lowercase())
        {
            QualifierMatchScore::new(SUBTAG_FALLOFF)
        } else {
            QualifierMatchScore::NO_MATCH
        }
    }

    fn clone_boxed(&self) -> Box<dyn QualifierType> {
        Box::new(self.clone())
    }
}
