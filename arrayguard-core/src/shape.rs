//! Shape normalization and matching
//!
//! A shape-like input is a single dimension, a tuple of dimensions or an arbitrary
//! host value that still has to be validated. Normalization turns any of these into
//! a [`ShapeSpec`] tuple in which `-1` ([`WILDCARD`]) matches a dimension of any
//! size. Well-formed inputs never go through the instance checks; only invalid
//! input pays for building a detailed message.

use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::array::Array;
use crate::candidates::OneOrMany;
use crate::checkers::{instance, range};
use crate::errors::{ValidationError, ValidationResult};
use crate::format;
use crate::value::{TypeClass, Value};

/// Dimension value matching any size.
pub const WILDCARD: i64 = -1;

/// Shapes returned without any further validation.
const COMMON_SHAPES: [&[i64]; 7] = [&[], &[-1], &[1], &[3], &[2], &[1, 3], &[-1, 3]];

/// A shape as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeLike {
    /// A bare dimension, meaning the 1-tuple `(d,)`
    Int(i64),
    /// A tuple of dimensions
    Dims(Vec<i64>),
    /// Any other host value
    #[serde(skip)]
    Other(Value),
}

impl fmt::Display for ShapeLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeLike::Int(d) => write!(f, "{d}"),
            ShapeLike::Dims(dims) => f.write_str(&format::tuple_repr(dims)),
            ShapeLike::Other(value) => value.fmt(f),
        }
    }
}

impl From<i64> for ShapeLike {
    fn from(d: i64) -> Self {
        ShapeLike::Int(d)
    }
}

impl From<i32> for ShapeLike {
    fn from(d: i32) -> Self {
        ShapeLike::Int(d.into())
    }
}

impl From<()> for ShapeLike {
    fn from(_: ()) -> Self {
        ShapeLike::Dims(Vec::new())
    }
}

impl<const N: usize> From<[i64; N]> for ShapeLike {
    fn from(dims: [i64; N]) -> Self {
        ShapeLike::Dims(dims.to_vec())
    }
}

impl From<Vec<i64>> for ShapeLike {
    fn from(dims: Vec<i64>) -> Self {
        ShapeLike::Dims(dims)
    }
}

impl From<&[i64]> for ShapeLike {
    fn from(dims: &[i64]) -> Self {
        ShapeLike::Dims(dims.to_vec())
    }
}

impl From<Value> for ShapeLike {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(d) => ShapeLike::Int(d),
            Value::Tuple(items) if items.iter().all(|v| matches!(v, Value::Int(_))) => {
                ShapeLike::Dims(
                    items
                        .iter()
                        .filter_map(|v| match v {
                            Value::Int(d) => Some(*d),
                            _ => None,
                        })
                        .collect(),
                )
            }
            other => ShapeLike::Other(other),
        }
    }
}

/// Normalized shape tuple. Entries are non-negative sizes or [`WILDCARD`].
///
/// Serializes as a plain list of dimensions; deserializing rejects entries below `-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SmallVec<[i64; 4]>")]
pub struct ShapeSpec(SmallVec<[i64; 4]>);

impl ShapeSpec {
    pub fn dims(&self) -> &[i64] {
        &self.0
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::tuple_repr(&self.0))
    }
}

fn is_valid_dim(d: i64) -> bool {
    d >= WILDCARD
}

fn spec_of(dims: &[i64]) -> ShapeSpec {
    ShapeSpec(SmallVec::from_slice(dims))
}

/// Range check that reports the offending dimensions.
fn check_dims(dims: &[i64]) -> ValidationResult<ShapeSpec> {
    range::is_greater_than(&Array::from_vec(dims.to_vec()), WILDCARD, false, "Shape")?;
    Ok(spec_of(dims))
}

impl TryFrom<SmallVec<[i64; 4]>> for ShapeSpec {
    type Error = ValidationError;

    fn try_from(dims: SmallVec<[i64; 4]>) -> ValidationResult<Self> {
        if dims.iter().copied().all(is_valid_dim) {
            return Ok(ShapeSpec(dims));
        }
        check_dims(&dims)
    }
}

/// Validate a shape-like input and return its tuple form.
///
/// # Errors
/// - type mismatch for `None`, non-integer/non-tuple values and tuples holding
///   non-integers
/// - constraint violation for any dimension below `-1`
pub fn normalize_shape(shape: &ShapeLike) -> ValidationResult<ShapeSpec> {
    match shape {
        ShapeLike::Dims(dims) => {
            if COMMON_SHAPES.iter().any(|common| *common == dims.as_slice()) {
                log_trace!("common shape {:?}", dims);
                return Ok(spec_of(dims));
            }
            if dims.iter().copied().all(is_valid_dim) {
                return Ok(spec_of(dims));
            }
            check_dims(dims)
        }
        ShapeLike::Int(d) if is_valid_dim(*d) => Ok(spec_of(&[*d])),
        ShapeLike::Int(d) => check_dims(&[*d]),
        ShapeLike::Other(value) => normalize_value(value),
    }
}

fn normalize_value(value: &Value) -> ValidationResult<ShapeSpec> {
    if matches!(value, Value::None) {
        return Err(ValidationError::type_mismatch(
            "`None` is not a valid shape. Use `()` instead.",
        ));
    }
    instance::is_instance(value, [TypeClass::Int, TypeClass::Tuple], true, "Shape")?;
    let dims: Vec<i64> = match value {
        Value::Int(d) => vec![*d],
        Value::Tuple(items) => {
            instance::is_iterable_of_some_type(value, TypeClass::Int, true, "Shape")?;
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Int(d) => Some(*d),
                    _ => None,
                })
                .collect()
        }
        _ => Vec::new(),
    };
    check_dims(&dims)
}

/// True when `actual` has the same rank as `spec` and every dimension is equal or
/// matched by a wildcard.
pub fn matches(actual: &[usize], spec: &ShapeSpec) -> bool {
    actual.len() == spec.ndim()
        && actual
            .iter()
            .zip(spec.dims())
            .all(|(&a, &s)| s == WILDCARD || i64::try_from(a).map_or(false, |a| a == s))
}

impl From<ShapeLike> for OneOrMany<ShapeLike> {
    fn from(shape: ShapeLike) -> Self {
        OneOrMany::One(shape)
    }
}

impl From<i64> for OneOrMany<ShapeLike> {
    fn from(d: i64) -> Self {
        OneOrMany::One(d.into())
    }
}

impl From<i32> for OneOrMany<ShapeLike> {
    fn from(d: i32) -> Self {
        OneOrMany::One(d.into())
    }
}

impl From<()> for OneOrMany<ShapeLike> {
    fn from(_: ()) -> Self {
        OneOrMany::One(().into())
    }
}

impl<const N: usize> From<[i64; N]> for OneOrMany<ShapeLike> {
    fn from(dims: [i64; N]) -> Self {
        OneOrMany::One(dims.into())
    }
}

impl From<Vec<i64>> for OneOrMany<ShapeLike> {
    fn from(dims: Vec<i64>) -> Self {
        OneOrMany::One(dims.into())
    }
}

impl<const N: usize, const M: usize> From<[[i64; N]; M]> for OneOrMany<ShapeLike> {
    fn from(shapes: [[i64; N]; M]) -> Self {
        OneOrMany::Many(shapes.into_iter().map(ShapeLike::from).collect())
    }
}

/// A host list is a list of candidates; anything else is a single shape.
impl From<Value> for OneOrMany<ShapeLike> {
    fn from(value: Value) -> Self {
        match value {
            Value::List(items) => OneOrMany::Many(items.into_iter().map(ShapeLike::from).collect()),
            other => OneOrMany::One(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_spec_serializes_as_dimension_list() {
        let spec = normalize_shape(&[-1i64, 3].into()).unwrap();
        assert_eq!(serde_json::to_string(&spec).unwrap(), "[-1,3]");

        let parsed: ShapeSpec = serde_json::from_str("[4,-1,2,7,9]").unwrap();
        assert_eq!(parsed.dims(), &[4, -1, 2, 7, 9]);
        assert_eq!(parsed.to_string(), "(4, -1, 2, 7, 9)");

        let err = serde_json::from_str::<ShapeSpec>("[2,-3]").unwrap_err();
        assert!(err.to_string().contains("Shape values must all be greater than or equal to -1."));
    }

    #[test]
    fn normalizes_valid_inputs() {
        assert_eq!(normalize_shape(&3i64.into()).unwrap().dims(), &[3]);
        assert_eq!(normalize_shape(&().into()).unwrap().dims(), &[] as &[i64]);
        assert_eq!(normalize_shape(&[-1i64, 3].into()).unwrap().dims(), &[-1, 3]);
        assert_eq!(normalize_shape(&[4i64, 5, 6].into()).unwrap().dims(), &[4, 5, 6]);
        let tuple = ShapeLike::Other(Value::tuple([Value::Int(2), Value::Int(2)]));
        assert_eq!(normalize_shape(&tuple).unwrap().dims(), &[2, 2]);
    }

    #[test]
    fn rejects_none() {
        let err = normalize_shape(&ShapeLike::Other(Value::None)).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(err.message(), "`None` is not a valid shape. Use `()` instead.");
    }

    #[test]
    fn rejects_negative_dims() {
        let err = normalize_shape(&(-2i64).into()).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(err.message(), "Shape values must all be greater than or equal to -1.");

        let err = normalize_shape(&[2i64, -3].into()).unwrap_err();
        assert_eq!(err.message(), "Shape values must all be greater than or equal to -1.");
    }

    #[test]
    fn rejects_wrong_types() {
        let err = normalize_shape(&ShapeLike::Other(Value::Float(1.0))).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.message().starts_with("Shape must be an instance of any type"));

        let tuple = ShapeLike::Other(Value::tuple([Value::Int(1), Value::Float(2.0)]));
        let err = normalize_shape(&tuple).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.message().starts_with("All items of Shape"));
    }

    #[test]
    fn wildcard_matching() {
        let spec = normalize_shape(&[-1i64, 3].into()).unwrap();
        assert!(matches(&[10, 3], &spec));
        assert!(matches(&[0, 3], &spec));
        assert!(!matches(&[10, 4], &spec));
        assert!(!matches(&[3], &spec));

        let scalar = normalize_shape(&().into()).unwrap();
        assert!(matches(&[], &scalar));
        assert!(!matches(&[1], &scalar));
    }

    #[test]
    fn display_echoes_input() {
        assert_eq!(ShapeLike::from(-1i64).to_string(), "-1");
        assert_eq!(ShapeLike::from([3i64]).to_string(), "(3,)");
        assert_eq!(ShapeLike::from([3i64, 3]).to_string(), "(3, 3)");
        assert_eq!(ShapeLike::from(()).to_string(), "()");
    }

    #[test]
    fn deserializes_from_json() {
        let one: OneOrMany<ShapeLike> = serde_json::from_str("[-1, 3]").unwrap();
        // A flat integer list is a single tuple shape
        assert_eq!(one, OneOrMany::One(ShapeLike::Dims(vec![-1, 3])));
        let many: OneOrMany<ShapeLike> = serde_json::from_str("[[3, 3], [4, 4]]").unwrap();
        assert_eq!(many.len(), 2);
        let bare: OneOrMany<ShapeLike> = serde_json::from_str("3").unwrap();
        assert_eq!(bare, OneOrMany::One(ShapeLike::Int(3)));
    }
}
