//! Shared `qualifier=value` / `always` / `never` token parsing used by both
//! filename-encoded conditions and explicit resource-collection JSON.

use resref::{ConditionIndex, ConditionPriority, QualifierMatchScore, QualifierName};

use crate::builder::Builder;
use crate::conditions::Condition;
use crate::error::{Error, Result};

pub fn parse(
    builder: &mut Builder,
    token: &str,
    priority: Option<ConditionPriority>,
    score_as_default: Option<QualifierMatchScore>,
) -> Result<ConditionIndex> {
    match token {
        "always" => builder.add_unconditional(Condition::always()),
        "never" => builder.add_unconditional(Condition::never()),
        _ => {
            let (qualifier_index, value) = match token.split_once('=') {
                Some((name, value)) => {
                    let qualifier_name = QualifierName::new(name)?;
                    (builder.qualifiers().qualifier_by_name(&qualifier_name)?, value)
                }
                None => (bare_token_qualifier(builder, token)?, token),
            };
            let default_priority = builder.qualifiers().qualifier(qualifier_index).default_priority;
            builder.add_condition(qualifier_index, value, priority.unwrap_or(default_priority), score_as_default)
        }
    }
}

/// Resolve a bare (unqualified) token to the qualifier whose type accepts it
/// as a condition value. Fails if no registered qualifier's type accepts it,
/// or if more than one does (the token is ambiguous between them).
fn bare_token_qualifier(builder: &Builder, value: &str) -> Result<resref::QualifierIndex> {
    let registry = builder.qualifiers();
    let mut matches = registry
        .qualifiers()
        .filter(|(_, qualifier)| registry.qualifier_type(qualifier.type_index).implementation.is_valid_condition_value(value));
    let Some((index, qualifier)) = matches.next() else {
        return Err(Error::importer(format!(
            "{value}: bare condition token matches no registered qualifier's value domain"
        )));
    };
    if let Some((_, other)) = matches.next() {
        return Err(Error::importer(format!(
            "{value}: bare condition token is ambiguous between qualifiers {} and {}",
            qualifier.name, other.name
        )));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_builder() -> Builder {
        let mut builder = Builder::new();
        let type_index = builder
            .qualifiers()
            .qualifier_type_by_name(&resref::QualifierTypeName::new("language").unwrap())
            .unwrap();
        builder
            .add_qualifier(QualifierName::new("language").unwrap(), type_index, ConditionPriority::DEFAULT)
            .unwrap();
        builder
    }

    fn seeded_builder_with_territory() -> Builder {
        let mut builder = seeded_builder();
        let type_index = builder
            .qualifiers()
            .qualifier_type_by_name(&resref::QualifierTypeName::new("territory").unwrap())
            .unwrap();
        builder
            .add_qualifier(QualifierName::new("territory").unwrap(), type_index, ConditionPriority::DEFAULT)
            .unwrap();
        builder
    }

    #[test]
    fn parses_qualified_token() {
        let mut builder = seeded_builder();
        let index = parse(&mut builder, "language=fr", None, None).unwrap();
        let condition = builder.condition(index);
        assert_eq!(condition.key(builder.qualifiers()), "language-[fr]");
    }

    #[test]
    fn parses_always_and_never() {
        let mut builder = seeded_builder();
        let always = parse(&mut builder, "always", None, None).unwrap();
        let never = parse(&mut builder, "never", None, None).unwrap();
        assert_ne!(always, never);
    }

    #[test]
    fn rejects_unknown_qualifier() {
        let mut builder = seeded_builder();
        let err = parse(&mut builder, "territory=CA", None, None).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn bare_token_resolves_to_the_only_qualifier_whose_type_accepts_it() {
        let mut builder = seeded_builder_with_territory();
        let index = parse(&mut builder, "fr", None, None).unwrap();
        let condition = builder.condition(index);
        assert_eq!(condition.key(builder.qualifiers()), "language-[fr]");
    }

    #[test]
    fn bare_token_matching_no_qualifier_fails() {
        let mut builder = seeded_builder_with_territory();
        let err = parse(&mut builder, "???", None, None).unwrap_err();
        assert!(matches!(err, Error::Importer { .. }));
    }
}
