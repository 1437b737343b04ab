use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("valid regex"));

/// Defines a validated, opaque string wrapper matching `NAME_PATTERN`.
///
/// A successfully constructed value is guaranteed to match the grammar; no
/// validation is ever repeated downstream.
macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Does `value` match the grammar for this kind?
            #[must_use]
            pub fn is_valid(value: &str) -> bool {
                NAME_PATTERN.is_match(value)
            }

            /// Validate and wrap `value`, or fail with a tagged error string.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if Self::is_valid(&value) {
                    Ok(Self(value))
                } else {
                    Err(Error::invalid_scalar(value, $kind))
                }
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

validated_name!(
    /// A named dimension of context, e.g. `language` or `territory`.
    QualifierName,
    "qualifier name"
);
validated_name!(
    /// The name of a registered [`QualifierType`](crate placeholder) implementation.
    QualifierTypeName,
    "qualifier type name"
);
validated_name!(
    /// A single segment of a dotted [`ResourceId`](crate::resource_id::ResourceId).
    ResourceName,
    "resource name"
);
validated_name!(
    /// The name of a registered resource type.
    ResourceTypeName,
    "resource type name"
);
