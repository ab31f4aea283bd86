//! Error types for property store operations

use crate::layout::{DataType, PropertyId};

/// Errors that can occur during property store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropError {
    /// Checked row access past the live range
    OutOfRange {
        /// Requested row position
        index: usize,
        /// Number of live rows at the time of the call
        len: usize,
    },
    /// Property identifier not registered (never added, or erased)
    UnknownProperty {
        /// The offending identifier
        id: PropertyId,
    },
    /// Element type requested at bind differs from the registered type
    TypeMismatch {
        /// Type requested by the accessor
        requested: DataType,
        /// Type recorded at registration
        stored: DataType,
    },
    /// Scalar bind on a column registered with an array width
    WidthMismatch {
        /// Width recorded at registration
        width: usize,
    },
}

impl core::fmt::Display for PropError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PropError::OutOfRange { index, len } => {
                write!(f, "row index {index} out of range for {len} live rows")
            }
            PropError::UnknownProperty { id } => {
                write!(f, "{id} is not registered")
            }
            PropError::TypeMismatch { requested, stored } => {
                write!(f, "accessor type {requested} does not match stored type {stored}")
            }
            PropError::WidthMismatch { width } => {
                write!(f, "scalar accessor bound to a column of array width {width}")
            }
        }
    }
}

/// Result type for property store operations
pub type Result<T> = core::result::Result<T, PropError>;

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_carries_context() {
        let err = PropError::OutOfRange { index: 42, len: 42 };
        let msg = err.to_string();
        assert!(msg.contains("42"));

        let err = PropError::TypeMismatch {
            requested: DataType::I32,
            stored: DataType::F32,
        };
        let msg = err.to_string();
        assert!(msg.contains("i32"));
        assert!(msg.contains("f32"));
    }

    #[test]
    fn test_errors_compare() {
        let a = PropError::WidthMismatch { width: 3 };
        let b = PropError::WidthMismatch { width: 3 };
        assert_eq!(a, b);
        assert_ne!(a, PropError::WidthMismatch { width: 2 });
    }
}
