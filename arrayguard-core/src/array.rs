//! N-dimensional array with a dtype and dynamic shape.
//!
//! [`Array`] is the materialized form every array check inspects. Elements are stored
//! in an [`ndarray::ArrayD`] of the widened storage kind (`i64` for all signed
//! integers, `f64` for both float widths, ...) while [`Array::dtype`] records the
//! declared element type. Checks only ever read arrays.
//!
//! [`coerce_to_array`] is the conversion collaborator: it turns any array-like
//! [`Value`] into an `Array`, promoting mixed element types the way the array
//! library does.

use std::borrow::Cow;

use ndarray::{Array1, ArrayD, CowArray, Dimension, IxDyn};
use num_complex::{Complex32, Complex64};

use crate::dtype::DType;
use crate::errors::{ValidationError, ValidationResult};
use crate::value::{ArrayScalar, ElementKind, ScalarValue, Value};

/// Element storage, one variant per storage kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(ArrayD<bool>),
    Int(ArrayD<i64>),
    UInt(ArrayD<u64>),
    Float(ArrayD<f64>),
    Complex(ArrayD<Complex64>),
    Str(ArrayD<String>),
    Object(ArrayD<Value>),
}

/// Apply the same expression to whichever buffer is stored.
macro_rules! with_data {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::Bool($a) => $body,
            ArrayData::Int($a) => $body,
            ArrayData::UInt($a) => $body,
            ArrayData::Float($a) => $body,
            ArrayData::Complex($a) => $body,
            ArrayData::Str($a) => $body,
            ArrayData::Object($a) => $body,
        }
    };
}

/// Rebuild storage of the same kind from a buffer-valued expression.
macro_rules! map_data {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::Bool($a) => ArrayData::Bool($body),
            ArrayData::Int($a) => ArrayData::Int($body),
            ArrayData::UInt($a) => ArrayData::UInt($body),
            ArrayData::Float($a) => ArrayData::Float($body),
            ArrayData::Complex($a) => ArrayData::Complex($body),
            ArrayData::Str($a) => ArrayData::Str($body),
            ArrayData::Object($a) => ArrayData::Object($body),
        }
    };
}

/// Native element types an [`Array`] can be built from.
pub trait Element: Clone + 'static {
    /// Dtype recorded for arrays of this element type
    const DTYPE: DType;

    /// Widen a buffer into its storage kind.
    fn into_data(data: ArrayD<Self>) -> ArrayData;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident, $variant:ident, |$a:ident| $widen:expr);* $(;)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                fn into_data($a: ArrayD<Self>) -> ArrayData {
                    ArrayData::$variant($widen)
                }
            }
        )*
    };
}

impl_element!(
    bool => Bool, Bool, |a| a;
    i8 => Int8, Int, |a| a.mapv(i64::from);
    i16 => Int16, Int, |a| a.mapv(i64::from);
    i32 => Int32, Int, |a| a.mapv(i64::from);
    i64 => Int64, Int, |a| a;
    u8 => UInt8, UInt, |a| a.mapv(u64::from);
    u16 => UInt16, UInt, |a| a.mapv(u64::from);
    u32 => UInt32, UInt, |a| a.mapv(u64::from);
    u64 => UInt64, UInt, |a| a;
    f32 => Float32, Float, |a| a.mapv(f64::from);
    f64 => Float64, Float, |a| a;
    Complex32 => Complex64, Complex, |a| a.mapv(|c| Complex64::new(c.re.into(), c.im.into()));
    Complex64 => Complex128, Complex, |a| a;
    String => Str, Str, |a| a;
    Value => Object, Object, |a| a;
);

/// An n-dimensional, homogeneously typed, rectangular buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dtype: DType,
    data: ArrayData,
}

impl Array {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Wrap an `ndarray` array of any dimensionality.
    pub fn from_ndarray<T: Element, D: Dimension>(array: ndarray::Array<T, D>) -> Self {
        Self {
            dtype: T::DTYPE,
            data: T::into_data(array.into_dyn()),
        }
    }

    /// One-dimensional array.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        Self::from_ndarray(Array1::from_vec(data))
    }

    /// Array of the given shape from row-major data.
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> ValidationResult<Self> {
        let len = data.len();
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(Self::from_ndarray)
            .map_err(|e| {
                ValidationError::constraint(format!(
                    "cannot reshape array of size {len} into shape {shape:?}: {e}"
                ))
            })
    }

    /// Zero-dimensional array holding `value`.
    pub fn scalar<T: Element>(value: T) -> Self {
        Self::from_ndarray(ndarray::arr0(value))
    }

    /// `n × n` float64 identity matrix.
    pub fn eye(n: usize) -> Self {
        Self::from_ndarray(ndarray::Array2::<f64>::eye(n))
    }

    /// Build an array of `dtype` from row-major leaf values.
    fn from_leaves(dtype: DType, shape: &[usize], leaves: Vec<Value>) -> ValidationResult<Self> {
        let cast = |v: &Value| {
            ScalarValue::from_value(v)
                .map(|s| s.cast(dtype))
                .unwrap_or(ScalarValue::Bool(false))
        };
        let dim = IxDyn(shape);
        let data = match dtype.kind() {
            ElementKind::Bool => ArrayD::from_shape_vec(dim, leaves.iter().map(|v| cast(v).to_bool()).collect())
                .map(ArrayData::Bool),
            ElementKind::Int => ArrayD::from_shape_vec(dim, leaves.iter().map(|v| cast(v).to_i64()).collect())
                .map(ArrayData::Int),
            ElementKind::UInt => ArrayD::from_shape_vec(dim, leaves.iter().map(|v| cast(v).to_u64()).collect())
                .map(ArrayData::UInt),
            ElementKind::Float => ArrayD::from_shape_vec(dim, leaves.iter().map(|v| cast(v).to_f64()).collect())
                .map(ArrayData::Float),
            ElementKind::Complex => {
                ArrayD::from_shape_vec(dim, leaves.iter().map(|v| cast(v).to_complex()).collect())
                    .map(ArrayData::Complex)
            }
            ElementKind::Str => ArrayD::from_shape_vec(
                dim,
                leaves
                    .iter()
                    .map(|v| match ScalarValue::from_value(v) {
                        Some(ScalarValue::Str(s)) => s,
                        Some(other) => other.to_string(),
                        None => v.to_string(),
                    })
                    .collect(),
            )
            .map(ArrayData::Str),
            ElementKind::Object => ArrayD::from_shape_vec(dim, leaves).map(ArrayData::Object),
        }
        .map_err(|e| ValidationError::constraint(format!("cannot build array of shape {shape:?}: {e}")))?;
        Ok(Self { dtype, data })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        with_data!(&self.data, a => a.shape())
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        with_data!(&self.data, a => a.len())
    }

    /// The `index`-th element in row-major order, as a host value.
    pub fn scalar_at(&self, index: usize) -> Option<Value> {
        let dtype = self.dtype;
        let scalar = |value: ScalarValue| Value::Scalar(ArrayScalar::new(dtype, value));
        match &self.data {
            ArrayData::Bool(a) => a.iter().nth(index).map(|b| scalar(ScalarValue::Bool(*b))),
            ArrayData::Int(a) => a.iter().nth(index).map(|i| scalar(ScalarValue::Int(*i))),
            ArrayData::UInt(a) => a.iter().nth(index).map(|u| scalar(ScalarValue::UInt(*u))),
            ArrayData::Float(a) => a.iter().nth(index).map(|x| scalar(ScalarValue::Float(*x))),
            ArrayData::Complex(a) => a.iter().nth(index).map(|c| scalar(ScalarValue::Complex(*c))),
            ArrayData::Str(a) => a.iter().nth(index).map(|s| scalar(ScalarValue::Str(s.clone()))),
            ArrayData::Object(a) => a.iter().nth(index).cloned(),
        }
    }

    /// Elements as `f64` for boolean, integer and floating arrays.
    ///
    /// Floating arrays are borrowed; the other kinds are converted.
    pub fn as_real(&self) -> Option<CowArray<'_, f64, IxDyn>> {
        match &self.data {
            ArrayData::Float(a) => Some(CowArray::from(a.view())),
            ArrayData::Int(a) => Some(CowArray::from(a.mapv(|i| i as f64))),
            ArrayData::UInt(a) => Some(CowArray::from(a.mapv(|u| u as f64))),
            ArrayData::Bool(a) => Some(CowArray::from(a.mapv(|b| f64::from(u8::from(b))))),
            _ => None,
        }
    }

    /// A one-dimensional copy with every element in row-major order.
    pub fn flatten(&self) -> Array {
        Array {
            dtype: self.dtype,
            data: map_data!(&self.data, a => Array1::from_iter(a.iter().cloned()).into_dyn()),
        }
    }

    /// Items along the first axis: scalars for 1-d arrays, sub-arrays otherwise.
    /// Zero-dimensional arrays have no items.
    pub fn outer_items(&self) -> Vec<Value> {
        match self.ndim() {
            0 => Vec::new(),
            1 => (0..self.size()).filter_map(|i| self.scalar_at(i)).collect(),
            _ => {
                let dtype = self.dtype;
                with_data!(&self.data, a => a
                    .outer_iter()
                    .map(|sub| {
                        let data = sub.to_owned();
                        Value::Array(Array { dtype, data: Element::into_data(data) })
                    })
                    .collect())
            }
        }
    }
}

impl<T: Element, D: Dimension> From<ndarray::Array<T, D>> for Array {
    fn from(array: ndarray::Array<T, D>) -> Self {
        Self::from_ndarray(array)
    }
}

/// Dtype a single leaf value is stored as.
fn leaf_dtype(value: &Value) -> DType {
    match value {
        Value::Bool(_) => DType::Bool,
        Value::Int(_) => DType::Int64,
        Value::Float(_) => DType::Float64,
        Value::Complex(_) => DType::Complex128,
        Value::Str(_) => DType::Str,
        Value::Scalar(scalar) => scalar.dtype(),
        Value::Array(array) => array.dtype(),
        _ => DType::Object,
    }
}

/// Nested items of a value that extends the array by one dimension.
fn nested_items(value: &Value) -> Option<Cow<'_, [Value]>> {
    match value {
        Value::List(items) | Value::Tuple(items) => Some(Cow::Borrowed(items.as_slice())),
        Value::Array(array) if array.ndim() > 0 => Some(Cow::Owned(array.outer_items())),
        _ => None,
    }
}

fn collect_leaves(
    value: &Value,
    depth: usize,
    shape: &[usize],
    leaves: &mut Vec<Value>,
) -> ValidationResult<()> {
    let inhomogeneous = || {
        ValidationError::constraint(format!(
            "setting an array element with a sequence. The requested array has an \
             inhomogeneous shape after {depth} dimensions."
        ))
    };
    match nested_items(value) {
        Some(items) => {
            if depth >= shape.len() || items.len() != shape[depth] {
                return Err(inhomogeneous());
            }
            for item in items.iter() {
                collect_leaves(item, depth + 1, shape, leaves)?;
            }
            Ok(())
        }
        None if depth == shape.len() => {
            let leaf = match value {
                Value::Array(array) => array.scalar_at(0).unwrap_or(Value::None),
                other => other.clone(),
            };
            leaves.push(leaf);
            Ok(())
        }
        None => Err(inhomogeneous()),
    }
}

/// Convert an array-like value into an [`Array`].
///
/// Arrays are returned as a copy, scalars become 0-dimensional arrays and nested
/// lists/tuples become rectangular arrays. Element dtypes are promoted
/// (`bool < int < float < complex`; strings stay strings; other mixes become
/// `object`). Ragged nesting is rejected.
pub fn coerce_to_array(value: &Value) -> ValidationResult<Array> {
    if let Value::Array(array) = value {
        return Ok(array.clone());
    }

    // Shape follows the first item at every level
    let mut shape = Vec::new();
    let mut cursor = value.clone();
    loop {
        let first = match nested_items(&cursor) {
            Some(items) => {
                shape.push(items.len());
                items.first().cloned()
            }
            None => None,
        };
        match first {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut leaves = Vec::with_capacity(shape.iter().product());
    collect_leaves(value, 0, &shape, &mut leaves)?;

    let dtype = if shape.is_empty() {
        leaf_dtype(value)
    } else {
        leaves
            .iter()
            .map(leaf_dtype)
            .reduce(DType::promote)
            .unwrap_or(DType::Float64)
    };
    Array::from_leaves(dtype, &shape, leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let a = Array::from_vec(vec![1.0f32, 2.0]);
        assert_eq!(a.dtype(), DType::Float32);
        assert_eq!(a.shape(), &[2]);

        let m = Array::from_shape_vec(&[2, 3], vec![0i32; 6]).unwrap();
        assert_eq!(m.dtype(), DType::Int32);
        assert_eq!(m.ndim(), 2);
        assert_eq!(m.size(), 6);

        assert!(Array::from_shape_vec(&[4], vec![0i32; 6]).is_err());

        let s = Array::scalar(3u8);
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.size(), 1);

        let eye = Array::eye(3);
        assert_eq!(eye.shape(), &[3, 3]);
        assert_eq!(eye.dtype(), DType::Float64);
    }

    #[test]
    fn coerce_promotes_mixed_lists() {
        let a = coerce_to_array(&Value::list([Value::from(0), Value::from(0.5), Value::from(1)])).unwrap();
        assert_eq!(a.dtype(), DType::Float64);
        assert_eq!(a.shape(), &[3]);

        let ints = coerce_to_array(&Value::from(vec![1, 2, 3])).unwrap();
        assert_eq!(ints.dtype(), DType::Int64);

        let bools = coerce_to_array(&Value::from(vec![true, false])).unwrap();
        assert_eq!(bools.dtype(), DType::Bool);

        let strings = coerce_to_array(&Value::from(vec!["a", "b"])).unwrap();
        assert_eq!(strings.dtype(), DType::Str);

        let mixed = coerce_to_array(&Value::list([Value::None, Value::from(1)])).unwrap();
        assert_eq!(mixed.dtype(), DType::Object);
    }

    #[test]
    fn coerce_nested_and_scalars() {
        let nested = Value::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let a = coerce_to_array(&nested).unwrap();
        assert_eq!(a.shape(), &[2, 2]);

        let zero_d = coerce_to_array(&Value::from(2.5)).unwrap();
        assert_eq!(zero_d.ndim(), 0);
        assert_eq!(zero_d.dtype(), DType::Float64);

        let empty = coerce_to_array(&Value::List(vec![])).unwrap();
        assert_eq!(empty.shape(), &[0]);
        assert_eq!(empty.dtype(), DType::Float64);

        let scalar = coerce_to_array(&Value::from(ArrayScalar::float32(1.5))).unwrap();
        assert_eq!(scalar.dtype(), DType::Float32);
    }

    #[test]
    fn coerce_rejects_ragged() {
        let ragged = Value::list([Value::from(vec![1, 2]), Value::from(vec![3])]);
        let err = coerce_to_array(&ragged).unwrap_err();
        assert!(err.is_constraint_violation());
        assert!(err.message().contains("inhomogeneous shape after 1 dimensions"));
    }

    #[test]
    fn flatten_and_items() {
        let m = Array::from_shape_vec(&[2, 2], vec![1i64, 2, 3, 4]).unwrap();
        let flat = m.flatten();
        assert_eq!(flat.shape(), &[4]);
        assert_eq!(flat.scalar_at(3), Some(Value::Scalar(ArrayScalar::int64(4))));

        let rows = m.outer_items();
        assert_eq!(rows.len(), 2);
        assert!(matches!(&rows[0], Value::Array(row) if row.shape() == [2]));
        assert!(Array::scalar(1i64).outer_items().is_empty());
    }

    #[test]
    fn real_view() {
        let bools = Array::from_vec(vec![true, false]);
        let real = bools.as_real().unwrap();
        assert_eq!(real.iter().copied().collect::<Vec<_>>(), vec![1.0, 0.0]);
        assert!(Array::from_vec(vec![String::from("a")]).as_real().is_none());
    }
}
