use std::fmt;

use thiserror::Error;

/// Returned when asking an empty tree for its smallest or largest element.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("underflow: cannot take the {0} of an empty tree")]
pub struct UnderflowError(pub Extreme);

/// Which end of the tree an [`UnderflowError`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Raised by `find_min`.
    Min,
    /// Raised by `find_max`.
    Max,
}

impl fmt::Display for Extreme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("minimum"),
            Self::Max => f.write_str("maximum"),
        }
    }
}

/// A non-fatal report explaining why an `insert` or `remove` left the tree untouched.
///
/// These are not errors. The operation still completed, it just had nothing to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An element comparing equal to the inserted one was already stored.
    DuplicateKey,
    /// No element comparing equal to the removed one was stored.
    KeyNotFound,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("element already present, insert ignored"),
            Self::KeyNotFound => f.write_str("element not present, remove ignored"),
        }
    }
}
