use core::fmt;

/// Errors produced while validating scalar identifiers or building the resource tree.
///
/// Every variant renders as `"<input>: <message>"`, per the error message
/// convention of the system: failures are values, never panics or unwinds.
#[derive(Debug)]
pub enum Error {
    /// A raw value does not match the grammar for the named kind.
    InvalidScalar { input: String, kind: &'static str },
    /// An empty string was used where a non-empty identifier is required.
    EmptyId,
    /// A dotted id could not be split because it contains an empty segment.
    EmptySegment { input: String },
    /// `basename`/`parent` was called on an id with no parent (the root).
    NoParent { input: String },
    /// A prefix of the inserted id is already a leaf, so it cannot also be a branch.
    TreeShapeConflict { id: String },
    /// A leaf or branch already exists at this id.
    DuplicateEntry { id: String },
    /// No node exists at this id.
    NotFound { id: String },
    /// A node exists at this id but is not a leaf.
    NotALeaf { id: String },
    /// A node exists at this id but is not a branch.
    NotABranch { id: String },
    /// Zero or more errors accumulated from an operation that processes many items.
    Aggregate(Vec<Error>),
}

impl Error {
    pub fn invalid_scalar(input: impl Into<String>, kind: &'static str) -> Error {
        Error::InvalidScalar {
            input: input.into(),
            kind,
        }
    }

    pub(crate) fn empty_segment(input: impl Into<String>) -> Error {
        Error::EmptySegment {
            input: input.into(),
        }
    }

    pub(crate) fn no_parent(input: impl Into<String>) -> Error {
        Error::NoParent {
            input: input.into(),
        }
    }

    pub(crate) fn tree_shape_conflict(id: impl Into<String>) -> Error {
        Error::TreeShapeConflict { id: id.into() }
    }

    pub(crate) fn duplicate_entry(id: impl Into<String>) -> Error {
        Error::DuplicateEntry { id: id.into() }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Error {
        Error::NotFound { id: id.into() }
    }

    pub(crate) fn not_a_leaf(id: impl Into<String>) -> Error {
        Error::NotALeaf { id: id.into() }
    }

    pub(crate) fn not_a_branch(id: impl Into<String>) -> Error {
        Error::NotABranch { id: id.into() }
    }

    /// Is this an aggregate of zero child errors — i.e. no failure at all?
    pub fn is_empty_aggregate(&self) -> bool {
        matches!(self, Error::Aggregate(errors) if errors.is_empty())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidScalar { input, kind } => {
                write!(f, "{input}: not a valid {kind}")
            }
            Error::EmptyId => write!(f, "<empty>: not a valid resource id"),
            Error::EmptySegment { input } => {
                write!(f, "{input}: contains an empty segment")
            }
            Error::NoParent { input } => write!(f, "{input}: has no parent"),
            Error::TreeShapeConflict { id } => {
                write!(f, "{id}: already exists as a leaf, cannot also be a branch")
            }
            Error::DuplicateEntry { id } => {
                write!(f, "{id}: already exists")
            }
            Error::NotFound { id } => write!(f, "{id}: not found"),
            Error::NotALeaf { id } => write!(f, "{id}: is not a leaf"),
            Error::NotABranch { id } => write!(f, "{id}: is not a branch"),
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

impl std::error::Error for Error {}

/// Collects zero or more [`Error`]s from an operation that processes many
/// items independently, reporting them together as a single
/// [`Error::Aggregate`] if any occurred.
#[derive(Debug, Default)]
pub struct MessageAggregator {
    errors: Vec<Error>,
}

impl MessageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the aggregator, returning `Ok(())` if no errors were
    /// collected, or `Err` with an [`Error::Aggregate`] otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Aggregate(self.errors))
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
