//! Bound, range and finiteness checks.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::array::ArrayData;
use crate::errors::{ValidationError, ValidationResult};
use crate::traits::ArrayLike;
use crate::value::Value;

use super::dtype::{is_numeric, is_real};
use super::number::{is_number, NumberDefinition};
use super::shape::has_shape;
use super::sorted::{is_sorted, SortOptions};
use super::DEFAULT_ARRAY_NAME;

/// Which side of a bound every element must fall on.
#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

fn check_bound<A: ArrayLike + ?Sized>(
    array: &A,
    value: Value,
    strict: bool,
    bound: Bound,
    name: &str,
) -> ValidationResult<()> {
    is_number(&value, NumberDefinition::Abstract, true, super::DEFAULT_OBJECT_NAME)?;
    is_real(&value, DEFAULT_ARRAY_NAME)?;
    let array = array.to_array()?;
    is_real(&*array, name)?;

    // `None` is an unordered (NaN) comparison and never holds.
    let holds = |ordering: Option<Ordering>| match (bound, strict, ordering) {
        (_, _, None) => false,
        (Bound::Lower, true, Some(o)) => o == Ordering::Greater,
        (Bound::Lower, false, Some(o)) => o != Ordering::Less,
        (Bound::Upper, true, Some(o)) => o == Ordering::Less,
        (Bound::Upper, false, Some(o)) => o != Ordering::Greater,
    };
    // Integer elements against an integer bound compare exactly; f64 loses precision above 2^53.
    let passed = match (array.data(), value.as_i128()) {
        (ArrayData::Int(values), Some(threshold)) => values
            .iter()
            .all(|&x| holds(Some(i128::from(x).cmp(&threshold)))),
        (ArrayData::UInt(values), Some(threshold)) => values
            .iter()
            .all(|&x| holds(Some(i128::from(x).cmp(&threshold)))),
        _ => {
            let threshold = value.as_f64().unwrap_or(f64::NAN);
            array.as_real().map_or(false, |values| {
                values.iter().all(|x| holds(x.partial_cmp(&threshold)))
            })
        }
    };
    if passed {
        return Ok(());
    }
    let relation = match (bound, strict) {
        (Bound::Lower, true) => "greater than",
        (Bound::Lower, false) => "greater than or equal to",
        (Bound::Upper, true) => "less than",
        (Bound::Upper, false) => "less than or equal to",
    };
    Err(ValidationError::constraint(format!(
        "{name} values must all be {relation} {value}."
    )))
}

/// Check that every element is greater than `value` (or equal, when not `strict`).
///
/// `value` must be a real number. NaN elements never satisfy the bound.
///
/// ```
/// use arrayguard_core::checkers::is_greater_than;
///
/// assert!(is_greater_than(&[1, 2, 3], 0, true, "Array").is_ok());
/// let err = is_greater_than(&[1, 2, 3], 1, true, "Array").unwrap_err();
/// assert_eq!(err.to_string(), "Array values must all be greater than 1.");
/// ```
pub fn is_greater_than<A: ArrayLike + ?Sized>(
    array: &A,
    value: impl Into<Value>,
    strict: bool,
    name: &str,
) -> ValidationResult<()> {
    check_bound(array, value.into(), strict, Bound::Lower, name)
}

/// Check that every element is less than `value` (or equal, when not `strict`).
pub fn is_less_than<A: ArrayLike + ?Sized>(
    array: &A,
    value: impl Into<Value>,
    strict: bool,
    name: &str,
) -> ValidationResult<()> {
    check_bound(array, value.into(), strict, Bound::Upper, name)
}

/// Check that no element is negative.
pub fn is_nonnegative<A: ArrayLike + ?Sized>(array: &A, name: &str) -> ValidationResult<()> {
    is_greater_than(array, 0, false, name)
}

/// Options for [`is_in_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Exclude the lower bound
    pub strict_lower: bool,
    /// Exclude the upper bound
    pub strict_upper: bool,
    pub name: String,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            strict_lower: false,
            strict_upper: false,
            name: DEFAULT_ARRAY_NAME.to_string(),
        }
    }
}

impl RangeOptions {
    pub fn with_strict_lower(mut self, strict: bool) -> Self {
        self.strict_lower = strict;
        self
    }

    pub fn with_strict_upper(mut self, strict: bool) -> Self {
        self.strict_upper = strict;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Check that every element lies within `rng = [lower, upper]`.
///
/// `rng` must have shape `(2,)` and be sorted ascending. Bounds are inclusive
/// unless the options make them strict.
///
/// ```
/// use arrayguard_core::checkers::{is_in_range, RangeOptions};
///
/// let options = RangeOptions::default();
/// assert!(is_in_range(&[0.0, 0.5, 1.0], &[0, 1], &options).is_ok());
///
/// let err = is_in_range(&[0.0, 0.5, 1.1], &[0, 1], &options).unwrap_err();
/// assert_eq!(err.to_string(), "Array values must all be less than or equal to 1.");
/// ```
pub fn is_in_range<A, R>(array: &A, rng: &R, options: &RangeOptions) -> ValidationResult<()>
where
    A: ArrayLike + ?Sized,
    R: ArrayLike + ?Sized,
{
    let rng = rng.to_array()?;
    has_shape(&*rng, 2i64, "Range")?;
    is_sorted(&*rng, &SortOptions::default().with_name("Range"))?;

    let (Some(lower), Some(upper)) = (rng.scalar_at(0), rng.scalar_at(1)) else {
        return Err(ValidationError::constraint("Range must have two elements."));
    };
    is_greater_than(array, lower, options.strict_lower, &options.name)?;
    is_less_than(array, upper, options.strict_upper, &options.name)
}

/// Check that no element is infinite or NaN.
pub fn is_finite<A: ArrayLike + ?Sized>(array: &A, name: &str) -> ValidationResult<()> {
    let array = array.to_array()?;
    let finite = match array.data() {
        ArrayData::Bool(_) | ArrayData::Int(_) | ArrayData::UInt(_) => true,
        ArrayData::Float(values) => values.iter().all(|x| x.is_finite()),
        ArrayData::Complex(values) => values.iter().all(|c| c.re.is_finite() && c.im.is_finite()),
        ArrayData::Str(_) | ArrayData::Object(_) => {
            is_numeric(&*array, name)?;
            true
        }
    };
    if finite {
        Ok(())
    } else {
        Err(ValidationError::constraint(format!("{name} must have finite values.")))
    }
}
