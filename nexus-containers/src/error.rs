//! Error type shared by both containers.

use std::error::Error;
use std::fmt;

/// Errors reported by fallible container operations.
///
/// Every variant is returned synchronously from the offending call; the
/// container is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerError {
    /// A position outside the valid range for the requested operation.
    OutOfRange {
        /// The rejected position.
        pos: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },
    /// Access or removal on a container with no elements.
    EmptyContainer,
    /// Requested capacity exceeds [`max_size`](crate::DynArray::max_size).
    LengthError {
        /// Requested element count.
        requested: usize,
        /// Largest element count the container can address.
        max: usize,
    },
    /// The allocator could not provide a buffer for `requested` elements.
    AllocationError {
        /// Requested element count.
        requested: usize,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos, len } => {
                write!(f, "position {pos} out of range for length {len}")
            }
            Self::EmptyContainer => write!(f, "container is empty"),
            Self::LengthError { requested, max } => {
                write!(
                    f,
                    "requested capacity {requested} exceeds maximum size {max}"
                )
            }
            Self::AllocationError { requested } => {
                write!(f, "failed to allocate storage for {requested} elements")
            }
        }
    }
}

impl Error for ContainerError {}

/// A value handed back by an insertion that did not happen.
///
/// The container is unchanged; `value` is exactly what the caller passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected<T> {
    /// The value that could not be inserted.
    pub value: T,
    /// Why the insertion failed.
    pub error: ContainerError,
}

impl<T> Rejected<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> From<Rejected<T>> for ContainerError {
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insertion rejected: {}", self.error)
    }
}

impl<T: fmt::Debug> Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ContainerError::OutOfRange { pos: 3, len: 3 };
        assert_eq!(err.to_string(), "position 3 out of range for length 3");

        assert_eq!(
            ContainerError::EmptyContainer.to_string(),
            "container is empty"
        );

        let err = ContainerError::LengthError {
            requested: 10,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "requested capacity 10 exceeds maximum size 4"
        );
    }

    #[test]
    fn rejected_returns_value() {
        let rejected = Rejected {
            value: String::from("order"),
            error: ContainerError::OutOfRange { pos: 5, len: 2 },
        };
        assert_eq!(
            rejected.to_string(),
            "insertion rejected: position 5 out of range for length 2"
        );
        assert!(rejected.source().is_some());
        assert_eq!(
            ContainerError::from(rejected.clone()),
            ContainerError::OutOfRange { pos: 5, len: 2 }
        );
        assert_eq!(rejected.into_inner(), "order");
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn Error) {}
        takes_error(&ContainerError::AllocationError { requested: 1 });
    }
}
