use std::fmt;

/// Defines a dense, non-negative integer index into one of the builder's
/// interning tables. Indices are assigned in first-seen order and never
/// change for the lifetime of the builder or the snapshot it produces.
macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            #[must_use]
            pub fn new(value: usize) -> Self {
                Self(value)
            }

            #[must_use]
            pub fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$name> for usize {
            fn from(value: $name) -> usize {
                value.0
            }
        }
    };
}

index_type!(
    /// Index of an interned qualifier.
    QualifierIndex
);
index_type!(
    /// Index of a registered qualifier type.
    QualifierTypeIndex
);
index_type!(
    /// Index of an interned [`Condition`](crate placeholder).
    ConditionIndex
);
index_type!(
    /// Index of an interned condition set.
    ConditionSetIndex
);
index_type!(
    /// Index of an interned decision.
    DecisionIndex
);
index_type!(
    /// Index of a resource within the builder/snapshot.
    ResourceIndex
);
index_type!(
    /// Index of a registered resource type.
    ResourceTypeIndex
);
index_type!(
    /// Index of a candidate declaration.
    CandidateIndex
);
index_type!(
    /// Index of a candidate's instance value slot.
    CandidateValueIndex
);
