//! Length checks.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::array::{coerce_to_array, Array};
use crate::candidates::OneOrMany;
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::traits::Validator;
use crate::value::{TypeClass, Value};

use super::instance::is_instance;
use super::shape::has_shape;
use super::sorted::{is_sorted, SortOptions};
use super::DEFAULT_ARRAY_NAME;

/// Length requirements for [`has_length`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthOptions {
    /// Length must equal this value, or any value of a list
    pub exact_length: Option<OneOrMany<usize>>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Require a one-dimensional subject
    pub must_be_1d: bool,
    /// Treat numbers and 0-d arrays as length-1 arrays
    pub allow_scalar: bool,
    pub name: String,
}

impl Default for LengthOptions {
    fn default() -> Self {
        Self {
            exact_length: None,
            min_length: None,
            max_length: None,
            must_be_1d: false,
            allow_scalar: false,
            name: DEFAULT_ARRAY_NAME.to_string(),
        }
    }
}

impl LengthOptions {
    pub fn with_exact_length(mut self, exact: impl Into<OneOrMany<usize>>) -> Self {
        self.exact_length = Some(exact.into());
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_must_be_1d(mut self, must_be_1d: bool) -> Self {
        self.must_be_1d = must_be_1d;
        self
    }

    pub fn with_allow_scalar(mut self, allow_scalar: bool) -> Self {
        self.allow_scalar = allow_scalar;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Validator for LengthOptions {
    type Subject = Value;

    fn validate(&self, subject: &Value) -> ValidationResult<()> {
        has_length(subject, self)
    }
}

/// `3` for a single length, `[2 3]` for a list.
fn exact_repr(exact: &OneOrMany<usize>) -> String {
    match exact {
        OneOrMany::One(n) => n.to_string(),
        OneOrMany::Many(list) => {
            let lengths: Vec<i64> = list.iter().map(|&n| n as i64).collect();
            format::format_array(&Array::from_vec(lengths))
        }
    }
}

/// Reshape scalars to length-1 arrays.
fn as_sized(subject: &Value) -> ValidationResult<Cow<'_, Value>> {
    let reshape = match subject {
        Value::Array(array) => array.ndim() == 0,
        other => other.is_instance_of(TypeClass::Number),
    };
    if !reshape {
        return Ok(Cow::Borrowed(subject));
    }
    let array = coerce_to_array(&Value::List(vec![subject.clone()]))?;
    Ok(Cow::Owned(Value::Array(array)))
}

/// Check the length of a sequence or array against exact and min/max requirements.
///
/// Multidimensional arrays are measured along their first axis.
///
/// ```
/// use arrayguard_core::checkers::{has_length, LengthOptions};
/// use arrayguard_core::Value;
///
/// let pair = Value::from(vec![1, 2]);
/// assert!(has_length(&pair, &LengthOptions::default().with_exact_length(vec![2, 3])).is_ok());
///
/// let err = has_length(&pair, &LengthOptions::default().with_min_length(3)).unwrap_err();
/// assert_eq!(err.to_string(), "Array must have a minimum length of 3. Got length 2 instead.");
/// ```
pub fn has_length(subject: &Value, options: &LengthOptions) -> ValidationResult<()> {
    let name = options.name.as_str();
    let subject = if options.allow_scalar {
        as_sized(subject)?
    } else {
        Cow::Borrowed(subject)
    };

    is_instance(&subject, [TypeClass::Sequence, TypeClass::NdArray], true, name)?;
    if options.must_be_1d {
        has_shape(&*subject, -1i64, DEFAULT_ARRAY_NAME)?;
    }
    let length = subject
        .len()
        .ok_or_else(|| ValidationError::type_mismatch("len() of unsized object"))?;

    if let Some(exact) = &options.exact_length {
        if !exact.any_match(|n| *n == length) {
            return Err(ValidationError::constraint(format!(
                "{name} must have a length equal to any of: {}. Got length {length} instead.",
                exact_repr(exact)
            )));
        }
    }

    if let (Some(min), Some(max)) = (options.min_length, options.max_length) {
        is_sorted(&[min, max], &SortOptions::default().with_name("Range"))?;
    }
    if let Some(min) = options.min_length {
        if length < min {
            return Err(ValidationError::constraint(format!(
                "{name} must have a minimum length of {min}. Got length {length} instead."
            )));
        }
    }
    if let Some(max) = options.max_length {
        if length > max {
            return Err(ValidationError::constraint(format!(
                "{name} must have a maximum length of {max}. Got length {length} instead."
            )));
        }
    }
    Ok(())
}
