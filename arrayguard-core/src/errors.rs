//! Error Types for Check Failures
//!
//! ## Design Philosophy
//!
//! Every check either returns `Ok(())` or a [`ValidationError`]. There are only two
//! kinds of failure, chosen by *what* was violated:
//!
//! ### Type mismatches
//! - dtype not a subtype of any allowed dtype
//! - value not an instance (or exact type) of the allowed classes
//! - value not a number under the selected [`NumberDefinition`](crate::NumberDefinition)
//! - strict integer-like checks on non-integer dtypes
//!
//! ### Constraint violations
//! - shape or length mismatch
//! - values out of range, unsorted, non-finite or not integer-like
//! - string not a member of an allowed set
//!
//! ## Messages
//!
//! The message always starts with the caller-supplied variable name and ends with a
//! period, e.g. `"Array values must all be less than or equal to 1."`. `Display`
//! prints the message verbatim so that a composite check re-raising a sub-check
//! error preserves it unchanged.
//!
//! ```rust
//! use arrayguard_core::{checkers, ValidationError};
//!
//! match checkers::is_finite(&[1.0, f64::NAN], "Points") {
//!     Err(ValidationError::ConstraintViolation { message }) => {
//!         assert_eq!(message, "Points must have finite values.");
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for check operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The two failure kinds a check can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Type, dtype or class outside the required set
    Type,
    /// Acceptable type whose content violates a constraint
    Value,
}

/// Check failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The subject's type, dtype or class does not belong to the required set
    #[error("{message}")]
    TypeMismatch {
        /// Name-qualified, human readable description
        message: String,
    },

    /// The subject's type is acceptable but its content violates a constraint
    #[error("{message}")]
    ConstraintViolation {
        /// Name-qualified, human readable description
        message: String,
    },
}

impl ValidationError {
    /// Build a type mismatch failure
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!("type check failed: {}", message);
        Self::TypeMismatch { message }
    }

    /// Build a constraint violation failure
    pub fn constraint(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!("constraint check failed: {}", message);
        Self::ConstraintViolation { message }
    }

    /// Which kind of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::Type,
            Self::ConstraintViolation { .. } => ErrorKind::Value,
        }
    }

    /// The full message, identical to the `Display` output
    pub fn message(&self) -> &str {
        match self {
            Self::TypeMismatch { message } | Self::ConstraintViolation { message } => message,
        }
    }

    /// True for [`ValidationError::TypeMismatch`]
    pub fn is_type_mismatch(&self) -> bool {
        self.kind() == ErrorKind::Type
    }

    /// True for [`ValidationError::ConstraintViolation`]
    pub fn is_constraint_violation(&self) -> bool {
        self.kind() == ErrorKind::Value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = ValidationError::constraint("Array must have finite values.");
        assert_eq!(err.to_string(), "Array must have finite values.");
        assert_eq!(err.message(), "Array must have finite values.");
    }

    #[test]
    fn kinds() {
        assert_eq!(ValidationError::type_mismatch("x").kind(), ErrorKind::Type);
        assert_eq!(ValidationError::constraint("x").kind(), ErrorKind::Value);
        assert!(ValidationError::type_mismatch("x").is_type_mismatch());
        assert!(ValidationError::constraint("x").is_constraint_violation());
    }
}
