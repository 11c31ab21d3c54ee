//! Core traits shared by the checks
//!
//! [`ArrayLike`] is the input seam of every array check; [`Validator`] is implemented
//! by the reusable option bundles that can validate a subject on their own.

use std::borrow::Cow;

use num_complex::Complex64;

use crate::array::{coerce_to_array, Array, Element};
use crate::errors::ValidationResult;
use crate::value::{ArrayScalar, Value};

/// Anything a check can read as an [`Array`].
///
/// Existing arrays are borrowed; everything else goes through [`coerce_to_array`].
pub trait ArrayLike {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>>;
}

impl ArrayLike for Array {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        Ok(Cow::Borrowed(self))
    }
}

impl ArrayLike for Value {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        match self {
            Value::Array(array) => Ok(Cow::Borrowed(array)),
            other => coerce_to_array(other).map(Cow::Owned),
        }
    }
}

impl<T: Clone + Into<Value>> ArrayLike for [T] {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        let list = Value::List(self.iter().cloned().map(Into::into).collect());
        coerce_to_array(&list).map(Cow::Owned)
    }
}

impl<T: Clone + Into<Value>> ArrayLike for Vec<T> {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        self.as_slice().to_array()
    }
}

impl<T: Clone + Into<Value>, const N: usize> ArrayLike for [T; N] {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        self.as_slice().to_array()
    }
}

impl<T: Element, D: ndarray::Dimension> ArrayLike for ndarray::Array<T, D> {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        Ok(Cow::Owned(Array::from_ndarray(self.clone())))
    }
}

macro_rules! impl_scalar_array_like {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArrayLike for $ty {
                fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
                    coerce_to_array(&Value::from(self.clone())).map(Cow::Owned)
                }
            }
        )*
    };
}

impl_scalar_array_like!(bool, i32, i64, u32, usize, f32, f64, Complex64, ArrayScalar);

impl<A: ArrayLike + ?Sized> ArrayLike for &A {
    fn to_array(&self) -> ValidationResult<Cow<'_, Array>> {
        (**self).to_array()
    }
}

/// A reusable bundle of checks that validates a subject in one call.
pub trait Validator {
    /// The kind of input this validator inspects
    type Subject: ?Sized;

    /// First failing check wins.
    fn validate(&self, subject: &Self::Subject) -> ValidationResult<()>;

    /// Convenience wrapper over [`validate`](Self::validate).
    fn is_valid(&self, subject: &Self::Subject) -> bool {
        self.validate(subject).is_ok()
    }
}
