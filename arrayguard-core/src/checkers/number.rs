//! Number and scalar checks
//!
//! What counts as a "number" depends on who is asking. Three definitions are
//! supported, each a fixed table of accepted classes:
//!
//! | definition | real only                          | any number                  |
//! |------------|------------------------------------|-----------------------------|
//! | abstract   | `numbers.Real`                     | `numbers.Number`            |
//! | builtin    | `float`, `int`                     | `float`, `int`, `complex`   |
//! | numpy      | `numpy.floating`, `numpy.integer`  | `numpy.number`              |
//!
//! Booleans are rejected under every definition.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dtype::DTypeFamily;
use crate::errors::{ValidationError, ValidationResult};
use crate::value::{TypeClass, Value};

use super::dtype::{is_numeric, is_real};
use super::instance::{is_instance, is_string_in_iterable, str_list};

const ABSTRACT_REAL: &[TypeClass] = &[TypeClass::Real];
const ABSTRACT_ANY: &[TypeClass] = &[TypeClass::Number];
const BUILTIN_REAL: &[TypeClass] = &[TypeClass::Float, TypeClass::Int];
const BUILTIN_ANY: &[TypeClass] = &[TypeClass::Float, TypeClass::Int, TypeClass::Complex];
const NUMPY_REAL: &[TypeClass] = &[
    TypeClass::ArrayFamily(DTypeFamily::Floating),
    TypeClass::ArrayFamily(DTypeFamily::Integer),
];
const NUMPY_ANY: &[TypeClass] = &[TypeClass::ArrayFamily(DTypeFamily::Number)];

/// Which class hierarchy decides what a number is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberDefinition {
    /// The abstract numeric tower; accepts host and array-library numbers
    #[default]
    Abstract,
    /// Host builtin classes only (plus array-library scalars that subclass them)
    Builtin,
    /// Array-library scalar classes only
    Numpy,
}

impl NumberDefinition {
    pub const NAMES: [&'static str; 3] = ["abstract", "builtin", "numpy"];

    pub fn name(self) -> &'static str {
        match self {
            NumberDefinition::Abstract => "abstract",
            NumberDefinition::Builtin => "builtin",
            NumberDefinition::Numpy => "numpy",
        }
    }

    /// Accepted classes. A single-entry table is reported as a single class.
    pub fn classes(self, must_be_real: bool) -> &'static [TypeClass] {
        match (self, must_be_real) {
            (NumberDefinition::Abstract, true) => ABSTRACT_REAL,
            (NumberDefinition::Abstract, false) => ABSTRACT_ANY,
            (NumberDefinition::Builtin, true) => BUILTIN_REAL,
            (NumberDefinition::Builtin, false) => BUILTIN_ANY,
            (NumberDefinition::Numpy, true) => NUMPY_REAL,
            (NumberDefinition::Numpy, false) => NUMPY_ANY,
        }
    }
}

impl fmt::Display for NumberDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberDefinition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        is_string_in_iterable(&Value::from(s), &str_list(&Self::NAMES), "Definition")?;
        Ok(match s {
            "builtin" => NumberDefinition::Builtin,
            "numpy" => NumberDefinition::Numpy,
            _ => NumberDefinition::Abstract,
        })
    }
}

/// Check that `value` is a number under `definition`.
///
/// Infinite and NaN values are numbers; see [`is_finite`](super::is_finite).
///
/// ```
/// use arrayguard_core::checkers::{is_number, NumberDefinition};
/// use arrayguard_core::{ArrayScalar, Value};
///
/// assert!(is_number(&Value::from(1), NumberDefinition::Abstract, true, "Object").is_ok());
/// assert!(is_number(&Value::from(ArrayScalar::float64(1.0)), NumberDefinition::Builtin, true, "Object").is_ok());
/// assert!(is_number(&Value::from(ArrayScalar::float32(1.0)), NumberDefinition::Builtin, true, "Object").is_err());
/// assert!(is_number(&Value::from(true), NumberDefinition::Numpy, false, "Object").is_err());
/// ```
pub fn is_number(
    value: &Value,
    definition: NumberDefinition,
    must_be_real: bool,
    name: &str,
) -> ValidationResult<()> {
    match definition.classes(must_be_real) {
        [only] => is_instance(value, *only, true, name),
        classes => is_instance(value, classes, true, name),
    }
}

/// Check that `value` is a scalar: a number, or a 0-dimensional numeric array.
///
/// A non-array `value` that is not a number is reported as `Object`.
pub fn is_scalar(value: &Value, must_be_real: bool, name: &str) -> ValidationResult<()> {
    match value {
        Value::Array(array) => {
            if array.ndim() > 0 {
                return Err(ValidationError::constraint(format!(
                    "{name} must be a 0-dimensional array, got `ndim={}` instead.",
                    array.ndim()
                )));
            }
            if must_be_real {
                is_real(array, name)
            } else {
                is_numeric(array, name)
            }
        }
        other => is_number(
            other,
            NumberDefinition::Abstract,
            must_be_real,
            super::DEFAULT_OBJECT_NAME,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::value::ArrayScalar;
    use num_complex::Complex64;

    const ALL: [NumberDefinition; 3] = [
        NumberDefinition::Abstract,
        NumberDefinition::Builtin,
        NumberDefinition::Numpy,
    ];

    #[test]
    fn booleans_are_never_numbers() {
        for definition in ALL {
            for real in [true, false] {
                let err = is_number(&Value::from(true), definition, real, "Object").unwrap_err();
                assert!(err.is_type_mismatch());
                assert!(is_number(&Value::from(ArrayScalar::bool(true)), definition, real, "Object").is_err());
            }
        }
    }

    #[test]
    fn definitions() {
        let int = Value::from(1);
        let complex = Value::from(Complex64::new(1.0, 2.0));
        let np_int = Value::from(ArrayScalar::int64(1));

        assert!(is_number(&int, NumberDefinition::Abstract, true, "Object").is_ok());
        assert!(is_number(&int, NumberDefinition::Builtin, true, "Object").is_ok());
        assert!(is_number(&int, NumberDefinition::Numpy, true, "Object").is_err());

        assert!(is_number(&complex, NumberDefinition::Abstract, false, "Object").is_ok());
        assert!(is_number(&complex, NumberDefinition::Builtin, true, "Object").is_err());

        assert!(is_number(&np_int, NumberDefinition::Numpy, true, "Object").is_ok());
        assert!(is_number(&np_int, NumberDefinition::Abstract, true, "Object").is_ok());
        assert!(is_number(&np_int, NumberDefinition::Builtin, false, "Object").is_err());
    }

    #[test]
    fn number_messages() {
        let err = is_number(&Value::from("1"), NumberDefinition::Abstract, true, "Object").unwrap_err();
        assert_eq!(
            err.message(),
            "Object must be an instance of <class 'numbers.Real'>. Got <class 'str'> instead."
        );
        let err = is_number(&Value::from("1"), NumberDefinition::Builtin, false, "Object").unwrap_err();
        assert_eq!(
            err.message(),
            "Object must be an instance of any type (<class 'float'>, <class 'int'>, <class 'complex'>). \
             Got <class 'str'> instead."
        );
    }

    #[test]
    fn parse_definition() {
        assert_eq!("numpy".parse::<NumberDefinition>().unwrap(), NumberDefinition::Numpy);
        let err = "python".parse::<NumberDefinition>().unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(
            err.message(),
            "Definition 'python' is not in the iterable. Definition must be one of: \n\t\
             ['abstract', 'builtin', 'numpy']"
        );
    }

    #[test]
    fn scalars() {
        assert!(is_scalar(&Value::from(0.0), true, "Scalar").is_ok());
        assert!(is_scalar(&Value::from(Array::scalar(1i64)), true, "Scalar").is_ok());
        let complex = Value::from(Array::scalar(Complex64::new(1.0, 2.0)));
        assert!(is_scalar(&complex, false, "Scalar").is_ok());
        let err = is_scalar(&complex, true, "Scalar").unwrap_err();
        assert_eq!(err.message(), "Scalar must have real numbers.");

        let err = is_scalar(&Value::from(Array::from_vec(vec![1.0])), true, "Scalar").unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(err.message(), "Scalar must be a 0-dimensional array, got `ndim=1` instead.");

        assert!(is_scalar(&Value::from(vec![1.0]), true, "Scalar").is_err());
    }

    #[test]
    fn non_number_scalar_is_reported_as_object() {
        let err = is_scalar(&Value::from("1"), true, "Radius").unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.message(),
            "Object must be an instance of <class 'numbers.Real'>. Got <class 'str'> instead."
        );

        let err = is_scalar(&Value::from(Array::from_vec(vec![1.0])), true, "Radius").unwrap_err();
        assert!(err.message().starts_with("Radius must be a 0-dimensional array"));
    }
}
