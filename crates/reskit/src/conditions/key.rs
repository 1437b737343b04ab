use resref::{ConditionPriority, QualifierMatchScore, QualifierName};

use crate::error::{Error, Result};
use crate::qualifiers::QualifierRegistry;

use super::condition::Condition;

/// Render a condition's canonical key: `<qualifierName>-[<value>](@<priority>)?((<scoreAsDefault>))?`
/// for binary conditions, or the bare operator name (`always`/`never`) for
/// unconditional ones. Two conditions with equal keys are the same
/// condition for interning purposes.
#[must_use]
pub fn render_condition_key(condition: &Condition, qualifiers: &QualifierRegistry) -> String {
    match condition {
        Condition::Unconditional { operator } => operator.as_str().to_string(),
        Condition::Binary {
            qualifier_index,
            value,
            priority,
            score_as_default,
            ..
        } => {
            let name = &qualifiers.qualifier(*qualifier_index).name;
            let mut key = format!("{name}-[{value}]");
            if *priority != ConditionPriority::DEFAULT {
                key.push('@');
                key.push_str(&priority.get().to_string());
            }
            if let Some(score) = score_as_default {
                key.push('(');
                key.push_str(&score.get().to_string());
                key.push(')');
            }
            key
        }
    }
}

/// Parse a condition's canonical key back into a [`Condition`], the
/// inverse of [`render_condition_key`]. `qualifiers` resolves the
/// qualifier name embedded in a binary key back into a [`resref::QualifierIndex`].
pub fn parse_condition_key(key: &str, qualifiers: &QualifierRegistry) -> Result<Condition> {
    if key == "always" {
        return Ok(Condition::always());
    }
    if key == "never" {
        return Ok(Condition::never());
    }
    let open = key.find("-[").ok_or_else(|| Error::importer(format!("malformed condition key: {key}")))?;
    let name = &key[..open];
    let rest = &key[open + 2..];
    let close = rest.find(']').ok_or_else(|| Error::importer(format!("malformed condition key: {key}")))?;
    let value = &rest[..close];
    let mut tail = &rest[close + 1..];

    let mut priority = ConditionPriority::DEFAULT;
    if let Some(stripped) = tail.strip_prefix('@') {
        let end = stripped.find('(').unwrap_or(stripped.len());
        let digits = &stripped[..end];
        let value: u16 = digits
            .parse()
            .map_err(|_| Error::importer(format!("malformed condition key priority: {key}")))?;
        priority = ConditionPriority::new(value);
        tail = &stripped[end..];
    }

    let mut score_as_default = None;
    if let Some(stripped) = tail.strip_prefix('(') {
        let end = stripped
            .find(')')
            .ok_or_else(|| Error::importer(format!("malformed condition key score: {key}")))?;
        let digits = &stripped[..end];
        let value: f64 = digits
            .parse()
            .map_err(|_| Error::importer(format!("malformed condition key score: {key}")))?;
        score_as_default = Some(QualifierMatchScore::new(value));
    }

    let qualifier_name = QualifierName::new(name)?;
    let qualifier_index = qualifiers.qualifier_by_name(&qualifier_name)?;
    Ok(Condition::create(qualifiers, qualifier_index, value, priority, score_as_default)?)
}

/// Render a condition set's key: its member conditions' keys, joined by
/// `+`, in their canonical (already-sorted) order.
#[must_use]
pub fn render_condition_set_key(condition_keys: &[String]) -> String {
    condition_keys.join("+")
}

/// Render a decision's key: its member condition sets' hashes, joined by
/// `+`, in declaration order.
#[must_use]
pub fn render_decision_key(condition_set_hashes: &[String]) -> String {
    condition_set_hashes.join("+")
}
