//! Sortedness along an axis.

use core::cmp::Ordering;

use ndarray::{ArrayD, Axis};
use serde::{Deserialize, Serialize};

use crate::array::{Array, ArrayData};
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::traits::ArrayLike;

use super::dtype::is_numeric;
use super::range::{is_in_range, RangeOptions};
use super::DEFAULT_ARRAY_NAME;

/// Arrays up to this size are printed in full in failure messages.
const MAX_ECHOED_ELEMENTS: usize = 4;

/// Options for [`is_sorted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub ascending: bool,
    /// Reject equal neighbours
    pub strict: bool,
    /// Axis to check along. `None` flattens the array first; negative values count
    /// from the last axis.
    pub axis: Option<isize>,
    pub name: String,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            ascending: true,
            strict: false,
            axis: Some(-1),
            name: DEFAULT_ARRAY_NAME.to_string(),
        }
    }
}

impl SortOptions {
    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_axis(mut self, axis: Option<isize>) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn holds(&self, ordering: Option<Ordering>) -> bool {
        match (ordering, self.ascending, self.strict) {
            (None, _, _) => false,
            (Some(o), true, false) => o != Ordering::Greater,
            (Some(o), true, true) => o == Ordering::Less,
            (Some(o), false, false) => o != Ordering::Less,
            (Some(o), false, true) => o == Ordering::Greater,
        }
    }
}

/// Whether every lane along `axis` satisfies `holds` for each neighbour pair.
fn lanes_sorted<T, F>(data: &ArrayD<T>, axis: usize, mut holds: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    data.lanes(Axis(axis))
        .into_iter()
        .all(|lane| lane.iter().zip(lane.iter().skip(1)).all(|(a, b)| holds(a, b)))
}

/// Resolve the requested axis against `ndim`, validating out-of-range values.
fn resolve_axis(axis: isize, ndim: usize) -> ValidationResult<usize> {
    let ndim_i = ndim as i64;
    if axis != -1 {
        let bounds = [-ndim_i, ndim_i - 1];
        is_in_range(&(axis as i64), &bounds, &RangeOptions::default().with_name("Axis")).map_err(|_| {
            ValidationError::constraint(format!("Axis {axis} is out of bounds for ndim {ndim}."))
        })?;
    }
    let axis = axis as i64;
    let resolved = if axis < 0 { ndim_i + axis } else { axis };
    Ok(resolved as usize)
}

/// Check that an array is sorted along an axis.
///
/// 0-dimensional arrays are trivially sorted. NaN never compares as ordered.
///
/// ```
/// use arrayguard_core::checkers::{is_sorted, SortOptions};
///
/// assert!(is_sorted(&[1, 2, 3], &SortOptions::default()).is_ok());
///
/// let err = is_sorted(&[3, 2, 1], &SortOptions::default()).unwrap_err();
/// assert_eq!(err.to_string(), "Array [3 2 1] must be sorted in ascending order.");
/// ```
pub fn is_sorted<A: ArrayLike + ?Sized>(array: &A, options: &SortOptions) -> ValidationResult<()> {
    let array = array.to_array()?;
    if array.ndim() == 0 {
        return Ok(());
    }
    let name = options.name.as_str();
    if matches!(array.data(), ArrayData::Object(_)) {
        is_numeric(&*array, name)?;
    }

    let flattened;
    let (array, axis): (&Array, usize) = match options.axis {
        None => {
            flattened = array.flatten();
            (&flattened, 0)
        }
        Some(axis) => (&*array, resolve_axis(axis, array.ndim())?),
    };

    let sorted = match array.data() {
        ArrayData::Bool(a) => lanes_sorted(a, axis, |x, y| options.holds(x.partial_cmp(y))),
        ArrayData::Int(a) => lanes_sorted(a, axis, |x, y| options.holds(x.partial_cmp(y))),
        ArrayData::UInt(a) => lanes_sorted(a, axis, |x, y| options.holds(x.partial_cmp(y))),
        ArrayData::Float(a) => lanes_sorted(a, axis, |x, y| options.holds(x.partial_cmp(y))),
        ArrayData::Complex(a) => lanes_sorted(a, axis, |x, y| {
            options.holds((x.re, x.im).partial_cmp(&(y.re, y.im)))
        }),
        ArrayData::Str(a) => lanes_sorted(a, axis, |x, y| options.holds(x.partial_cmp(y))),
        ArrayData::Object(_) => false,
    };
    if sorted {
        return Ok(());
    }

    let body = if array.size() <= MAX_ECHOED_ELEMENTS {
        format::format_array(array)
    } else {
        format!("with {} elements", array.size())
    };
    let strict = if options.strict { "strict " } else { "" };
    let order = if options.ascending { "ascending" } else { "descending" };
    Err(ValidationError::constraint(format!(
        "{name} {body} must be sorted in {strict}{order} order."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn orders() {
        let opts = SortOptions::default();
        assert!(is_sorted(&[1, 1, 2], &opts).is_ok());
        assert!(is_sorted(&[1, 1, 2], &opts.clone().with_strict(true)).is_err());
        assert!(is_sorted(&[3, 2, 2], &opts.clone().with_ascending(false)).is_ok());

        let err = is_sorted(&[3, 3], &opts.clone().with_ascending(false).with_strict(true)).unwrap_err();
        assert_eq!(err.message(), "Array [3 3] must be sorted in strict descending order.");
    }

    #[test]
    fn large_arrays_are_summarized() {
        let err = is_sorted(&[5, 4, 3, 2, 1], &SortOptions::default()).unwrap_err();
        assert_eq!(err.message(), "Array with 5 elements must be sorted in ascending order.");
    }

    #[test]
    fn scalars_and_empty_arrays_pass() {
        assert!(is_sorted(&Array::scalar(1.0), &SortOptions::default()).is_ok());
        assert!(is_sorted(&Array::from_vec(Vec::<f64>::new()), &SortOptions::default()).is_ok());
    }

    #[test]
    fn nan_is_never_ordered() {
        assert!(is_sorted(&[1.0, f64::NAN], &SortOptions::default()).is_err());
    }

    #[test]
    fn axes() {
        // [[1, 2], [0, 3]]: rows ascending, columns not
        let m = Array::from_shape_vec(&[2, 2], vec![1i64, 2, 0, 3]).unwrap();
        let opts = SortOptions::default();
        assert!(is_sorted(&m, &opts).is_ok());
        assert!(is_sorted(&m, &opts.clone().with_axis(Some(1))).is_ok());
        assert!(is_sorted(&m, &opts.clone().with_axis(Some(-2))).is_err());
        assert!(is_sorted(&m, &opts.clone().with_axis(Some(0))).is_err());

        let err = is_sorted(&m, &opts.clone().with_axis(None)).unwrap_err();
        assert_eq!(err.message(), "Array [1 2 0 3] must be sorted in ascending order.");
    }

    #[test]
    fn axis_out_of_bounds() {
        let m = Array::from_shape_vec(&[2, 2], vec![1i64, 2, 3, 4]).unwrap();
        let err = is_sorted(&m, &SortOptions::default().with_axis(Some(2))).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(err.message(), "Axis 2 is out of bounds for ndim 2.");

        let err = is_sorted(&m, &SortOptions::default().with_axis(Some(-3))).unwrap_err();
        assert_eq!(err.message(), "Axis -3 is out of bounds for ndim 2.");
    }

    #[test]
    fn other_element_kinds() {
        assert!(is_sorted(&[false, true], &SortOptions::default()).is_ok());
        assert!(is_sorted(&Value::from(vec!["a", "b"]), &SortOptions::default()).is_ok());

        let objects = Value::list([Value::None, Value::from(1)]);
        let err = is_sorted(&objects, &SortOptions::default()).unwrap_err();
        assert_eq!(err.message(), "Array must be numeric.");
    }

    #[test]
    fn options_from_json() {
        let opts: SortOptions = serde_json::from_str(r#"{"strict": true, "name": "Times"}"#).unwrap();
        assert!(opts.ascending);
        assert!(opts.strict);
        assert_eq!(opts.axis, Some(-1));

        let flat: SortOptions = serde_json::from_str(r#"{"axis": null}"#).unwrap();
        assert_eq!(flat.axis, None);
    }
}
