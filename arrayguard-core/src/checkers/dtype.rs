//! Dtype checks
//!
//! Subtyping against exact dtypes and abstract families, and the numeric
//! categories built on it.

use crate::array::{Array, ArrayData};
use crate::candidates::OneOrMany;
use crate::dtype::{DType, DTypeFamily, DTypeSpec};
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::traits::ArrayLike;
use crate::value::{ArrayScalar, Value};

/// Dtypes accepted by [`is_numeric`] without consulting the hierarchy.
const COMMON_NUMERIC: [DType; 5] = [
    DType::Int32,
    DType::Int64,
    DType::Float32,
    DType::Float64,
    DType::Complex128,
];

/// Dtypes accepted by [`is_real`] without consulting the hierarchy.
const COMMON_REAL: [DType; 4] = [DType::Int32, DType::Int64, DType::Float32, DType::Float64];

/// Something that names a dtype.
pub trait DTypeLike {
    fn resolve_dtype(&self) -> ValidationResult<DType>;
}

impl DTypeLike for DType {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        Ok(*self)
    }
}

impl DTypeLike for Array {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        Ok(self.dtype())
    }
}

impl DTypeLike for ArrayScalar {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        Ok(self.dtype())
    }
}

impl DTypeLike for str {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        self.parse()
    }
}

impl DTypeLike for Value {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        match self {
            Value::Str(s) => s.parse(),
            Value::Scalar(scalar) => Ok(scalar.dtype()),
            Value::Array(array) => Ok(array.dtype()),
            other => Err(ValidationError::type_mismatch(format!(
                "Cannot interpret '{other}' as a data type."
            ))),
        }
    }
}

impl<T: DTypeLike + ?Sized> DTypeLike for &T {
    fn resolve_dtype(&self) -> ValidationResult<DType> {
        (**self).resolve_dtype()
    }
}

/// Check that a dtype is a subtype of at least one allowed dtype or family.
///
/// ```
/// use arrayguard_core::{checkers, Array, DTypeFamily};
///
/// let arr = Array::from_vec(vec![1u8, 2, 3]);
/// assert!(checkers::is_subdtype(&arr, DTypeFamily::Integer, "Input").is_ok());
///
/// let err = checkers::is_subdtype(&arr, DTypeFamily::Floating, "Input").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Input has incorrect dtype of 'uint8'. The dtype must be a subtype of <class 'numpy.floating'>."
/// );
/// ```
pub fn is_subdtype<S>(
    subject: &S,
    allowed: impl Into<OneOrMany<DTypeSpec>>,
    name: &str,
) -> ValidationResult<()>
where
    S: DTypeLike + ?Sized,
{
    let dtype = subject.resolve_dtype()?;
    let allowed = allowed.into();
    if allowed.any_match(|spec| dtype.is_subdtype(spec)) {
        return Ok(());
    }
    let requirement = match allowed.as_slice() {
        [only] => format!("The dtype must be a subtype of {only}."),
        specs => format!(
            "The dtype must be a subtype of at least one of \n{}.",
            format::list_repr(specs)
        ),
    };
    Err(ValidationError::type_mismatch(format!(
        "{name} has incorrect dtype of '{dtype}'. {requirement}"
    )))
}

/// Check that an array holds numbers (integers, floats or complex values).
///
/// Non-finite values are accepted; see [`is_finite`](super::is_finite).
pub fn is_numeric<A: ArrayLike + ?Sized>(array: &A, name: &str) -> ValidationResult<()> {
    let array = array.to_array()?;
    let dtype = array.dtype();
    if COMMON_NUMERIC.contains(&dtype) {
        log_trace!("numeric fast path for {}", dtype);
        return Ok(());
    }
    is_subdtype(&dtype, DTypeFamily::Number, name)
        .map_err(|_| ValidationError::type_mismatch(format!("{name} must be numeric.")))
}

/// Check that an array holds real numbers (integers or floats).
pub fn is_real<A: ArrayLike + ?Sized>(array: &A, name: &str) -> ValidationResult<()> {
    let array = array.to_array()?;
    let dtype = array.dtype();
    if COMMON_REAL.contains(&dtype) {
        log_trace!("real fast path for {}", dtype);
        return Ok(());
    }
    is_subdtype(&dtype, [DTypeFamily::Floating, DTypeFamily::Integer], name)
        .map_err(|_| ValidationError::type_mismatch(format!("{name} must have real numbers.")))
}

/// Check that an array has integer values.
///
/// With `strict` the dtype itself must be an integer dtype, and a mismatch is
/// reported as `Input`. Otherwise every element must equal its floor, so `1.0`
/// passes and `1.5` does not.
pub fn is_integerlike<A: ArrayLike + ?Sized>(
    array: &A,
    strict: bool,
    name: &str,
) -> ValidationResult<()> {
    let array = array.to_array()?;
    if strict {
        return is_subdtype(&*array, DTypeFamily::Integer, super::DEFAULT_INPUT_NAME);
    }
    if matches!(array.data(), ArrayData::Bool(_)) {
        return Ok(());
    }
    is_real(&*array, name)?;
    let all_integral = match array.as_real() {
        Some(values) => values.iter().all(|x| *x == x.floor()),
        None => false,
    };
    if all_integral {
        Ok(())
    } else {
        Err(ValidationError::constraint(format!(
            "{name} must have integer-like values."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdtype_single_and_many() {
        let floats = Array::from_vec(vec![1.0f32]);
        assert!(is_subdtype(&floats, DTypeFamily::Floating, "Input").is_ok());
        assert!(is_subdtype(&floats, DType::Float32, "Input").is_ok());
        assert!(is_subdtype(&floats, [DTypeFamily::Integer, DTypeFamily::Inexact], "Input").is_ok());

        let err = is_subdtype(&floats, [DTypeFamily::Integer, DTypeFamily::ComplexFloating], "Input")
            .unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.message(),
            "Input has incorrect dtype of 'float32'. The dtype must be a subtype of at least one of \n\
             [<class 'numpy.integer'>, <class 'numpy.complexfloating'>]."
        );
    }

    #[test]
    fn subdtype_of_exact_dtype_names_scalar_class() {
        let err = is_subdtype(&DType::Int64, DType::Float64, "Input").unwrap_err();
        assert_eq!(
            err.message(),
            "Input has incorrect dtype of 'int64'. The dtype must be a subtype of <class 'numpy.float64'>."
        );
    }

    #[test]
    fn subject_resolution() {
        assert!(is_subdtype("float64", DTypeFamily::Floating, "Input").is_ok());
        assert!(is_subdtype(&Value::from("i4"), DTypeFamily::SignedInteger, "Input").is_ok());
        assert!(is_subdtype(&ArrayScalar::uint8(3), DTypeFamily::UnsignedInteger, "Input").is_ok());

        let err = is_subdtype(&Value::from(vec![1, 2]), DTypeFamily::Number, "Input").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.message().starts_with("Cannot interpret"));

        assert!(is_subdtype("not-a-dtype", DTypeFamily::Number, "Input").is_err());
    }

    #[test]
    fn numeric_categories() {
        assert!(is_numeric(&[1.0, 2.0], "Array").is_ok());
        assert!(is_numeric(&Array::from_vec(vec![1u16]), "Array").is_ok());
        assert!(is_numeric(&Array::from_vec(vec![f64::NAN, f64::INFINITY]), "Array").is_ok());

        let err = is_numeric(&Array::from_vec(vec![true]), "Array").unwrap_err();
        assert_eq!(err.message(), "Array must be numeric.");
        let err = is_numeric(&Value::from(vec!["a"]), "Labels").unwrap_err();
        assert_eq!(err.message(), "Labels must be numeric.");

        assert!(is_real(&Array::from_vec(vec![1u8]), "Array").is_ok());
        let complex = Array::from_vec(vec![num_complex::Complex64::new(1.0, 1.0)]);
        let err = is_real(&complex, "Array").unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(err.message(), "Array must have real numbers.");
    }

    #[test]
    fn integerlike() {
        assert!(is_integerlike(&[1.0, 2.0, -3.0], false, "Array").is_ok());
        assert!(is_integerlike(&[1, 2], true, "Array").is_ok());
        assert!(is_integerlike(&[f64::INFINITY], false, "Array").is_ok());
        assert!(is_integerlike(&[true, false], false, "Array").is_ok());

        let err = is_integerlike(&[1.5], false, "Array").unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(err.message(), "Array must have integer-like values.");

        assert!(is_integerlike(&[f64::NAN], false, "Array").is_err());

        let err = is_integerlike(&[1.0], true, "Array").unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn strict_integerlike_mismatch_names_input() {
        let err = is_integerlike(&[1.0], true, "Counts").unwrap_err();
        assert_eq!(
            err.message(),
            "Input has incorrect dtype of 'float64'. The dtype must be a subtype of <class 'numpy.integer'>."
        );
        let err = is_integerlike(&[1.5], false, "Counts").unwrap_err();
        assert_eq!(err.message(), "Counts must have integer-like values.");
    }
}
