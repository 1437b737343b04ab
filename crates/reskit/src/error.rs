//! Error types.
//!
//! Every fallible operation in this crate returns a `Result<T, Error>`.
//! Failures never unwind; they compose via explicit chaining
//! ([`std::result::Result`]'s `?`) or via [`ErrorAggregator`] when an
//! operation processes many independent items and wants to report every
//! failure rather than stopping at the first one.
use core::fmt;

/// The taxonomy of failures this crate can produce. Every variant renders
/// as a human-readable string prefixed by the offending input, per the
/// `"<input>: <message>"` convention used throughout.
#[derive(Debug)]
pub enum Error {
    /// An invalid scalar, key, id, or index (wraps [`resref::Error`]).
    Validation(resref::Error),
    /// A duplicate interned entity with differing content, or a duplicate
    /// candidate/leaf declaration.
    Conflict { description: String },
    /// A referenced qualifier, resource, branch, or leaf does not exist.
    NotFound { description: String },
    /// Resolution could not produce a value, e.g. no `full` candidate.
    Resolution { description: String },
    /// The import pipeline failed to parse or schedule an importable item.
    Importer { description: String },
    /// Zero or more errors accumulated from a batch operation.
    Aggregate(Vec<Error>),
}

impl Error {
    pub(crate) fn conflict(description: impl Into<String>) -> Error {
        Error::Conflict {
            description: description.into(),
        }
    }

    pub(crate) fn not_found(description: impl Into<String>) -> Error {
        Error::NotFound {
            description: description.into(),
        }
    }

    pub(crate) fn resolution(description: impl Into<String>) -> Error {
        Error::Resolution {
            description: description.into(),
        }
    }

    pub(crate) fn importer(description: impl Into<String>) -> Error {
        Error::Importer {
            description: description.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(error) => error.fmt(f),
            Error::Conflict { description }
            | Error::NotFound { description }
            | Error::Resolution { description }
            | Error::Importer { description } => f.write_str(description),
            Error::Aggregate(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(error) => Some(error),
            _ => None,
        }
    }
}

impl From<resref::Error> for Error {
    fn from(error: resref::Error) -> Self {
        Error::Validation(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Collects zero or more [`Error`]s from a batch operation, reporting them
/// together as a single [`Error::Aggregate`] if any occurred.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    errors: Vec<Error>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Aggregate(self.errors))
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(Error::Aggregate(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_carry_their_message_through() {
        let inner = resref::names::QualifierName::new("9bad").unwrap_err();
        let message = inner.to_string();
        let error: Error = inner.into();
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn aggregator_collapses_to_aggregate_when_non_empty() {
        let mut aggregator = ErrorAggregator::new();
        aggregator.push(Error::conflict("a: conflict"));
        aggregator.push(Error::conflict("b: conflict"));
        let err = aggregator.into_result().unwrap_err();
        assert_eq!(err.to_string(), "a: conflict; b: conflict");
    }

    #[test]
    fn empty_aggregator_is_ok() {
        assert!(ErrorAggregator::new().into_result().is_ok());
    }
}
