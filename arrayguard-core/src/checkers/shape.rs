//! Shape checks.

use crate::candidates::OneOrMany;
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::shape::{self, ShapeLike};
use crate::traits::ArrayLike;

/// Check that an array has one of the allowed shapes.
///
/// Each candidate is normalized on demand and the first match wins, so an
/// invalid candidate after a matching one is never inspected. `-1` matches any
/// dimension size.
///
/// ```
/// use arrayguard_core::checkers::has_shape;
/// use arrayguard_core::Array;
///
/// assert!(has_shape(&[1, 2, 3], -1, "Array").is_ok());
/// assert!(has_shape(&Array::eye(3), [[3i64, 3], [4, 4]], "Array").is_ok());
///
/// let err = has_shape(&Array::eye(2), [[3i64, 3], [4, 4]], "Array").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Array has shape (2, 2) which is not allowed. Shape must be one of [(3, 3), (4, 4)]."
/// );
/// ```
pub fn has_shape<A: ArrayLike + ?Sized>(
    array: &A,
    shape: impl Into<OneOrMany<ShapeLike>>,
    name: &str,
) -> ValidationResult<()> {
    let array = array.to_array()?;
    let candidates = shape.into();
    let actual = array.shape();
    let matched = candidates.try_any_match(|candidate| {
        shape::normalize_shape(candidate).map(|spec| shape::matches(actual, &spec))
    })?;
    if matched {
        return Ok(());
    }
    let requirement = match candidates.as_slice() {
        [only] => format!("Shape must be {only}."),
        all => format!("Shape must be one of {}.", format::list_repr(all)),
    };
    Err(ValidationError::constraint(format!(
        "{name} has shape {} which is not allowed. {requirement}",
        format::tuple_repr(actual)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::value::Value;

    #[test]
    fn single_candidates() {
        assert!(has_shape(&[1, 2, 3], -1, "Array").is_ok());
        assert!(has_shape(&[1, 2, 3], 3, "Array").is_ok());
        assert!(has_shape(&Value::from(1.0), (), "Array").is_ok());

        let err = has_shape(&[1, 2, 3], [-1i64, 3], "Points").unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(
            err.message(),
            "Points has shape (3,) which is not allowed. Shape must be (-1, 3)."
        );
    }

    #[test]
    fn candidate_lists() {
        let scalar_or_vector = Value::list([Value::tuple(Vec::<i64>::new()), Value::Int(-1)]);
        assert!(has_shape(&Value::from(1), scalar_or_vector.clone(), "Array").is_ok());
        assert!(has_shape(&[1, 2], scalar_or_vector, "Array").is_ok());

        let err = has_shape(&Array::eye(2), [[3i64, 3]], "Array").unwrap_err();
        // A one-element list reads like a single shape
        assert_eq!(
            err.message(),
            "Array has shape (2, 2) which is not allowed. Shape must be (3, 3)."
        );
    }

    #[test]
    fn invalid_candidates_are_reported() {
        let err = has_shape(&[1, 2], -2, "Array").unwrap_err();
        assert_eq!(err.message(), "Shape values must all be greater than or equal to -1.");

        let err = has_shape(&[1, 2], Value::None, "Array").unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn first_match_short_circuits() {
        let candidates = Value::list([Value::Int(2), Value::None]);
        assert!(has_shape(&[1, 2], candidates, "Array").is_ok());
    }
}
