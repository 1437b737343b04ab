use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    names::ResourceName,
};

/// A dot-separated sequence of [`ResourceName`] segments, e.g. `app.ui.welcome`.
///
/// The empty string is not a valid id. A successfully constructed
/// `ResourceId` is guaranteed to have at least one non-empty, grammar-valid
/// segment; no validation is repeated downstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Validate and wrap `value`.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyId);
        }
        for segment in value.split('.') {
            if segment.is_empty() {
                return Err(Error::empty_segment(value));
            }
            if !ResourceName::is_valid(segment) {
                return Err(Error::invalid_scalar(value, "resource id"));
            }
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dotted id's segments, in order.
    #[must_use]
    pub fn split(&self) -> Vec<ResourceName> {
        self.0
            .split('.')
            .map(|segment| {
                ResourceName::new(segment).expect("ResourceId invariant: every segment is valid")
            })
            .collect()
    }

    /// Join previously split segments back into a `ResourceId`.
    ///
    /// `split(join(xs)) = xs` for any non-empty sequence of valid names.
    pub fn join(names: &[ResourceName]) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::EmptyId);
        }
        let joined = names
            .iter()
            .map(ResourceName::as_str)
            .collect::<Vec<_>>()
            .join(".");
        Ok(Self(joined))
    }

    /// The last segment of the id.
    #[must_use]
    pub fn basename(&self) -> ResourceName {
        let segments = self.split();
        segments
            .into_iter()
            .last()
            .expect("ResourceId invariant: at least one segment")
    }

    /// The id with its last segment removed, or `Err` if this id has no parent
    /// (it is a single segment, i.e. a top-level child of the root).
    pub fn parent(&self) -> Result<Self> {
        let mut segments = self.split();
        if segments.len() <= 1 {
            return Err(Error::no_parent(self.0.clone()));
        }
        segments.pop();
        Self::join(&segments)
    }

    /// `base.child`, or just `child` when `base` is `None` (the root).
    pub fn child(base: Option<&ResourceId>, child: &ResourceName) -> Self {
        match base {
            Some(base) => Self(format!("{}.{}", base.0, child.as_str())),
            None => Self(child.as_str().to_string()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> String {
        value.0
    }
}

/// Join raw string segments with `.`, ignoring empty segments.
///
/// `join_segments(&[a, "", b]) == join_segments(&[a, b])`.
#[must_use]
pub fn join_segments(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_string() {
        assert!(matches!(ResourceId::new(""), Err(Error::EmptyId)));
    }

    #[test]
    fn split_join_round_trips() {
        let id = ResourceId::new("app.ui.welcome").unwrap();
        let segments = id.split();
        let rejoined = ResourceId::join(&segments).unwrap();
        assert_eq!(id, rejoined);
    }

    #[test]
    fn basename_is_last_segment() {
        let id = ResourceId::new("app.ui.welcome").unwrap();
        assert_eq!(id.basename().as_str(), "welcome");
    }

    #[test]
    fn parent_fails_for_single_segment() {
        let id = ResourceId::new("welcome").unwrap();
        assert!(id.parent().is_err());
    }

    #[test]
    fn parent_strips_last_segment() {
        let id = ResourceId::new("app.ui.welcome").unwrap();
        assert_eq!(id.parent().unwrap().as_str(), "app.ui");
    }

    #[test]
    fn join_segments_ignores_empty() {
        assert_eq!(join_segments(&["a", "", "b"]), join_segments(&["a", "b"]));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(ResourceId::new("app..welcome").is_err());
    }

    #[test]
    fn child_of_root_is_bare_name() {
        let name = ResourceName::new("app").unwrap();
        let id = ResourceId::child(None, &name);
        assert_eq!(id.as_str(), "app");
    }

    #[test]
    fn child_of_branch_is_dotted() {
        let base = ResourceId::new("app.ui").unwrap();
        let name = ResourceName::new("welcome").unwrap();
        let id = ResourceId::child(Some(&base), &name);
        assert_eq!(id.as_str(), "app.ui.welcome");
    }
}
