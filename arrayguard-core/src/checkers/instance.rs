//! Instance, container and string checks.

use crate::candidates::OneOrMany;
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::value::{ScalarValue, TypeClass, Value};

/// `<class 'int'>` for a single class, `(<class 'int'>, <class 'str'>)` for a list.
fn classes_repr(classes: &OneOrMany<TypeClass>) -> String {
    match classes {
        OneOrMany::One(class) => class.to_string(),
        OneOrMany::Many(list) => format::tuple_repr(list),
    }
}

/// Check that `value` is an instance of one of `classes`.
///
/// With `allow_subclass` any subclass is accepted (is-a semantics); otherwise the
/// value's own class must be listed.
///
/// ```
/// use arrayguard_core::checkers::is_instance;
/// use arrayguard_core::{TypeClass, Value};
///
/// assert!(is_instance(&Value::from("eggs"), [TypeClass::Int, TypeClass::Str], true, "Object").is_ok());
///
/// let err = is_instance(&Value::from(1.5), TypeClass::Int, true, "Object").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Object must be an instance of <class 'int'>. Got <class 'float'> instead."
/// );
/// ```
pub fn is_instance(
    value: &Value,
    classes: impl Into<OneOrMany<TypeClass>>,
    allow_subclass: bool,
    name: &str,
) -> ValidationResult<()> {
    let classes = classes.into();
    let actual = value.type_class();
    let body = if allow_subclass {
        if classes.any_match(|class| actual.is_subclass_of(*class)) {
            return Ok(());
        }
        if classes.len() == 1 {
            "must be an instance of"
        } else {
            "must be an instance of any type"
        }
    } else {
        if classes.any_match(|class| *class == actual) {
            return Ok(());
        }
        if classes.is_list() {
            "must have one of the following types"
        } else {
            "must have type"
        }
    };
    Err(ValidationError::type_mismatch(format!(
        "{name} {body} {}. Got {actual} instead.",
        classes_repr(&classes)
    )))
}

/// Check that `value`'s class is exactly one of `classes`.
pub fn is_type(
    value: &Value,
    classes: impl Into<OneOrMany<TypeClass>>,
    name: &str,
) -> ValidationResult<()> {
    is_instance(value, classes, false, name)
}

/// Check that `value` is a string.
pub fn is_string(value: &Value, allow_subclass: bool, name: &str) -> ValidationResult<()> {
    is_instance(value, TypeClass::Str, allow_subclass, name)
}

/// Check that `value` is a sequence (string, list, tuple).
pub fn is_sequence(value: &Value, name: &str) -> ValidationResult<()> {
    is_instance(value, TypeClass::Sequence, true, name)
}

/// Check that `value` can be iterated.
pub fn is_iterable(value: &Value, name: &str) -> ValidationResult<()> {
    is_instance(value, TypeClass::Iterable, true, name)
}

/// Check that `value` is iterable and every item is an instance of `classes`.
///
/// Stops at the first offending item; the message names it as
/// `All items of {name}`.
pub fn is_iterable_of_some_type(
    value: &Value,
    classes: impl Into<OneOrMany<TypeClass>>,
    allow_subclass: bool,
    name: &str,
) -> ValidationResult<()> {
    is_iterable(value, name)?;
    let classes = classes.into();
    let item_name = format!("All items of {name}");
    let Some(items) = value.items() else {
        return Ok(());
    };
    for item in items {
        is_instance(&item, classes.clone(), allow_subclass, &item_name)?;
    }
    Ok(())
}

/// Check that `value` is iterable and holds only strings.
pub fn is_iterable_of_strings(value: &Value, allow_subclass: bool, name: &str) -> ValidationResult<()> {
    is_iterable_of_some_type(value, TypeClass::Str, allow_subclass, name)
}

/// Check that `candidate` is a string contained in `allowed`.
pub fn is_string_in_iterable(candidate: &Value, allowed: &Value, name: &str) -> ValidationResult<()> {
    is_string(candidate, true, name)?;
    is_iterable_of_strings(allowed, true, super::DEFAULT_STRING_ITERABLE_NAME)?;
    let needle = item_text(candidate).unwrap_or_default();
    let found = allowed
        .items()
        .map_or(false, |mut items| items.any(|item| item_text(&item) == Some(needle)));
    if found {
        return Ok(());
    }
    Err(ValidationError::constraint(format!(
        "{name} '{needle}' is not in the iterable. {name} must be one of: \n\t{allowed}"
    )))
}

fn item_text(item: &Value) -> Option<&str> {
    match item {
        Value::Str(s) => Some(s),
        Value::Scalar(scalar) => match scalar.value() {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

/// Convenience for string literals.
pub(crate) fn str_list(items: &[&str]) -> Value {
    Value::list(items.iter().copied())
}
