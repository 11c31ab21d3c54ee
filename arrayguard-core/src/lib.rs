//! Core checking toolkit for ArrayGuard
//!
//! Composable predicate checks over numeric arrays and host values. Each check
//! rejects malformed input early with a precise, uniform message and never modifies
//! what it inspects.
//!
//! Building blocks:
//! - a dtype hierarchy ([`DType`], [`DTypeFamily`]) and a host class hierarchy
//!   ([`TypeClass`]) for subtype and instance checks
//! - shape normalization with `-1` wildcard dimensions
//! - range, sortedness, finiteness and length checks
//! - [`ArrayConstraints`], a serde-configurable bundle of array checks
//!
//! ```
//! use arrayguard_core::checkers::{self, RangeOptions};
//! use arrayguard_core::Array;
//!
//! let weights = Array::from_vec(vec![0.0, 0.5, 1.0]);
//! checkers::has_shape(&weights, -1, "Weights")?;
//! checkers::is_in_range(&weights, &[0, 1], &RangeOptions::default().with_name("Weights"))?;
//!
//! let err = checkers::is_in_range(&[0.0, 1.1], &[0, 1], &RangeOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Array values must all be less than or equal to 1.");
//! # Ok::<(), arrayguard_core::ValidationError>(())
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod array;
pub mod candidates;
pub mod checkers;
pub mod constraints;
pub mod dtype;
pub mod errors;
pub mod format;
pub mod shape;
pub mod traits;
pub mod value;

// Public API
pub use array::{coerce_to_array, Array, ArrayData, Element};
pub use candidates::OneOrMany;
pub use constraints::{ArrayConstraints, CheckFailure, CheckKind, ConstraintReport};
pub use dtype::{DType, DTypeFamily, DTypeSpec};
pub use errors::{ErrorKind, ValidationError, ValidationResult};
pub use shape::{normalize_shape, ShapeLike, ShapeSpec, WILDCARD};
pub use traits::{ArrayLike, Validator};
pub use value::{ArrayScalar, ScalarValue, TypeClass, Value};
pub use checkers::NumberDefinition;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
