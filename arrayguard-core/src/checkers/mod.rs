//! Predicate Checks
//!
//! ## Overview
//!
//! Every check takes the subject first, then its required arguments, then options,
//! and returns `Ok(())` or a [`ValidationError`](crate::ValidationError). Checks never
//! modify or convert the caller's data; array-like inputs that are not already
//! arrays are materialized into a temporary [`Array`](crate::Array) for inspection.
//!
//! ## Check Families
//!
//! ### 1. Type Classification
//! Dtype subtyping and numeric categories:
//! ```rust
//! use arrayguard_core::checkers::{is_numeric, is_real, is_subdtype};
//! use arrayguard_core::{Array, DTypeFamily};
//!
//! let arr = Array::from_vec(vec![1.0f32, 2.0]);
//! is_subdtype(&arr, DTypeFamily::Floating, "Input")?;
//! is_numeric(&arr, "Array")?;
//! is_real(&arr, "Array")?;
//! # Ok::<(), arrayguard_core::ValidationError>(())
//! ```
//!
//! ### 2. Numbers and Scalars
//! What counts as a number is selected by a [`NumberDefinition`]; booleans never
//! count:
//! ```rust
//! use arrayguard_core::checkers::{is_number, NumberDefinition};
//! use arrayguard_core::Value;
//!
//! assert!(is_number(&Value::from(true), NumberDefinition::Abstract, true, "Object").is_err());
//! ```
//!
//! ### 3. Shapes and Lengths
//! `-1` is a wildcard dimension; a list of shapes means "any of these":
//! ```rust
//! use arrayguard_core::checkers::{has_length, has_shape, LengthOptions};
//! use arrayguard_core::{Array, Value};
//!
//! has_shape(&Array::eye(3), [[3i64, 3], [4, 4]], "Array")?;
//! has_length(&Value::from(vec![1, 2]), &LengthOptions::default().with_exact_length(vec![2, 3]))?;
//! # Ok::<(), arrayguard_core::ValidationError>(())
//! ```
//!
//! ### 4. Ranges and Ordering
//! ```rust
//! use arrayguard_core::checkers::{is_in_range, is_sorted, RangeOptions, SortOptions};
//!
//! is_in_range(&[0.0, 0.5, 1.0], &[0, 1], &RangeOptions::default())?;
//! let err = is_sorted(&[3, 2, 1], &SortOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Array [3 2 1] must be sorted in ascending order.");
//! # Ok::<(), arrayguard_core::ValidationError>(())
//! ```
//!
//! ### 5. Instances and Containers
//! Class checks over host values, with or without subclass acceptance.
//!
//! ## Error Kinds
//!
//! - type mismatch: the subject's type, dtype or class is outside the allowed set
//! - constraint violation: the type is acceptable but the content is not
//!
//! Composite checks propagate the errors of the checks they are built from, with
//! two exceptions: failed dtype checks inside [`is_numeric`]/[`is_real`] are reported
//! with a short message, and an invalid sort axis is reported as out of bounds.

pub mod dtype;
pub mod instance;
pub mod length;
pub mod number;
pub mod range;
pub mod shape;
pub mod sorted;

pub use dtype::{is_integerlike, is_numeric, is_real, is_subdtype, DTypeLike};
pub use instance::{
    is_instance, is_iterable, is_iterable_of_some_type, is_iterable_of_strings, is_sequence,
    is_string, is_string_in_iterable, is_type,
};
pub use length::{has_length, LengthOptions};
pub use number::{is_number, is_scalar, NumberDefinition};
pub use range::{is_finite, is_greater_than, is_in_range, is_less_than, is_nonnegative, RangeOptions};
pub use shape::has_shape;
pub use sorted::{is_sorted, SortOptions};

/// Default variable name for array subjects
pub const DEFAULT_ARRAY_NAME: &str = "Array";

/// Default variable name for arbitrary objects
pub const DEFAULT_OBJECT_NAME: &str = "Object";

/// Default variable name for dtype subjects
pub const DEFAULT_INPUT_NAME: &str = "Input";

/// Default variable name for scalar subjects
pub const DEFAULT_SCALAR_NAME: &str = "Scalar";

/// Default variable name for iterables
pub const DEFAULT_ITERABLE_NAME: &str = "Iterable";

/// Default variable name for iterables of strings
pub const DEFAULT_STRING_ITERABLE_NAME: &str = "String Iterable";

/// Default variable name for strings
pub const DEFAULT_STRING_NAME: &str = "String";
