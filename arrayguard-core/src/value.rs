//! Host value model and its class hierarchy
//!
//! ## Overview
//!
//! Checks are written against dynamically typed inputs: a "number" may be a host
//! integer, a host float, an array-library scalar or a 0-dimensional array, and a
//! "length" may come from a list, a tuple, a string or an array. [`Value`] models
//! those inputs and [`TypeClass`] models the classes an instance check can ask about.
//!
//! ## Class Hierarchy
//!
//! ```text
//! object
//! ├── Number ─ Complex ─ Real ─ Integral          (abstract numeric tower)
//! │     complex ⊂ Complex, float ⊂ Real, int ⊂ Integral
//! ├── Iterable ─ Sized ─ Sequence                 (container capabilities)
//! │     str, list, tuple ⊂ Sequence
//! │     set, dict, ndarray ⊂ Iterable + Sized
//! ├── bool, NoneType
//! └── array-library scalars (one class per dtype)
//!       integer scalars  ⊂ Integral
//!       floating scalars ⊂ Real
//!       complex scalars  ⊂ Complex
//!       float64 ⊂ float, complex128 ⊂ complex, str_ ⊂ str
//! ```
//!
//! Two asymmetries are deliberate and relied on by the number checks:
//!
//! 1. `bool` is **not** part of the numeric tower, neither the host boolean nor the
//!    array-library `bool_`. A boolean is never accepted as a number.
//! 2. Only some array-library scalars subclass host builtins (`float64` is a
//!    `float`, `float32` is not), so the builtin definition of "number" accepts
//!    `float64` scalars but rejects `float32` ones.

use core::fmt;
use std::borrow::Cow;

use num_complex::Complex64;

use crate::array::Array;
use crate::dtype::{DType, DTypeFamily, DTypeSpec};
use crate::format;

/// Storage kind of an element, shared by scalars and array buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Bool,
    Int,
    UInt,
    Float,
    Complex,
    Str,
    Object,
}

impl DType {
    /// Storage kind used for elements of this dtype.
    pub fn kind(self) -> ElementKind {
        match self {
            DType::Bool => ElementKind::Bool,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => ElementKind::Int,
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => ElementKind::UInt,
            DType::Float32 | DType::Float64 => ElementKind::Float,
            DType::Complex64 | DType::Complex128 => ElementKind::Complex,
            DType::Str => ElementKind::Str,
            DType::Object => ElementKind::Object,
        }
    }
}

/// A single element, widened to its storage kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Complex(Complex64),
    Str(String),
}

impl ScalarValue {
    /// Extract the scalar content of a host value, if it has one.
    pub fn from_value(value: &Value) -> Option<ScalarValue> {
        match value {
            Value::Bool(b) => Some(ScalarValue::Bool(*b)),
            Value::Int(i) => Some(ScalarValue::Int(*i)),
            Value::Float(x) => Some(ScalarValue::Float(*x)),
            Value::Complex(c) => Some(ScalarValue::Complex(*c)),
            Value::Str(s) => Some(ScalarValue::Str(s.clone())),
            Value::Scalar(scalar) => Some(scalar.value.clone()),
            Value::Array(array) if array.ndim() == 0 => {
                array.scalar_at(0).and_then(|v| ScalarValue::from_value(&v))
            }
            _ => None,
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            ScalarValue::Bool(b) => *b,
            ScalarValue::Int(i) => *i != 0,
            ScalarValue::UInt(u) => *u != 0,
            ScalarValue::Float(x) => *x != 0.0,
            ScalarValue::Complex(c) => c.re != 0.0 || c.im != 0.0,
            ScalarValue::Str(s) => !s.is_empty(),
        }
    }

    pub fn to_i64(&self) -> i64 {
        match self {
            ScalarValue::Bool(b) => i64::from(*b),
            ScalarValue::Int(i) => *i,
            ScalarValue::UInt(u) => *u as i64,
            ScalarValue::Float(x) => *x as i64,
            ScalarValue::Complex(c) => c.re as i64,
            ScalarValue::Str(s) => s.parse().unwrap_or_default(),
        }
    }

    pub fn to_u64(&self) -> u64 {
        match self {
            ScalarValue::Bool(b) => u64::from(*b),
            ScalarValue::Int(i) => *i as u64,
            ScalarValue::UInt(u) => *u,
            ScalarValue::Float(x) => *x as u64,
            ScalarValue::Complex(c) => c.re as u64,
            ScalarValue::Str(s) => s.parse().unwrap_or_default(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            ScalarValue::Bool(b) => f64::from(u8::from(*b)),
            ScalarValue::Int(i) => *i as f64,
            ScalarValue::UInt(u) => *u as f64,
            ScalarValue::Float(x) => *x,
            ScalarValue::Complex(c) => c.re,
            ScalarValue::Str(s) => s.parse().unwrap_or(f64::NAN),
        }
    }

    pub fn to_complex(&self) -> Complex64 {
        match self {
            ScalarValue::Complex(c) => *c,
            other => Complex64::new(other.to_f64(), 0.0),
        }
    }

    /// Cast into the storage kind of `dtype`. Object dtypes keep the value as is.
    pub fn cast(self, dtype: DType) -> ScalarValue {
        match dtype.kind() {
            ElementKind::Bool => ScalarValue::Bool(self.to_bool()),
            ElementKind::Int => ScalarValue::Int(self.to_i64()),
            ElementKind::UInt => ScalarValue::UInt(self.to_u64()),
            ElementKind::Float => match self {
                ScalarValue::Float(x) => ScalarValue::Float(x),
                other => ScalarValue::Float(other.to_f64()),
            },
            ElementKind::Complex => ScalarValue::Complex(self.to_complex()),
            ElementKind::Str => match self {
                ScalarValue::Str(s) => ScalarValue::Str(s),
                other => ScalarValue::Str(other.to_plain_string()),
            },
            ElementKind::Object => self,
        }
    }

    /// Text without quotes, as `str()` would render it.
    fn to_plain_string(&self) -> String {
        match self {
            ScalarValue::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(true) => f.write_str("True"),
            ScalarValue::Bool(false) => f.write_str("False"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::UInt(u) => write!(f, "{u}"),
            ScalarValue::Float(x) => f.write_str(&format::float_repr(*x)),
            ScalarValue::Complex(c) => f.write_str(&format::complex_repr(*c)),
            ScalarValue::Str(s) => f.write_str(&format::str_repr(s)),
        }
    }
}

/// A scalar of the array library: an element tagged with its dtype.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayScalar {
    dtype: DType,
    value: ScalarValue,
}

impl ArrayScalar {
    /// Build a scalar of `dtype`, casting `value` into the dtype's storage kind.
    ///
    /// Object scalars do not exist in the array library; asking for one yields the
    /// value unchanged under the `object` dtype.
    pub fn new(dtype: DType, value: ScalarValue) -> Self {
        Self {
            dtype,
            value: value.cast(dtype),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::new(DType::Bool, ScalarValue::Bool(value))
    }

    pub fn int32(value: i32) -> Self {
        Self::new(DType::Int32, ScalarValue::Int(value.into()))
    }

    pub fn int64(value: i64) -> Self {
        Self::new(DType::Int64, ScalarValue::Int(value))
    }

    pub fn uint8(value: u8) -> Self {
        Self::new(DType::UInt8, ScalarValue::UInt(value.into()))
    }

    pub fn float32(value: f32) -> Self {
        Self::new(DType::Float32, ScalarValue::Float(value.into()))
    }

    pub fn float64(value: f64) -> Self {
        Self::new(DType::Float64, ScalarValue::Float(value))
    }

    pub fn complex128(value: Complex64) -> Self {
        Self::new(DType::Complex128, ScalarValue::Complex(value))
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }
}

impl fmt::Display for ArrayScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.dtype) {
            (ScalarValue::Float(x), DType::Float32) => f.write_str(&format::float32_repr(*x as f32)),
            (value, _) => value.fmt(f),
        }
    }
}

/// A dynamically typed input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    /// Array-library scalar
    Scalar(ArrayScalar),
    Array(Array),
}

impl Value {
    pub fn tuple<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn list<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// The concrete class of this value.
    pub fn type_class(&self) -> TypeClass {
        match self {
            Value::None => TypeClass::NoneType,
            Value::Bool(_) => TypeClass::Bool,
            Value::Int(_) => TypeClass::Int,
            Value::Float(_) => TypeClass::Float,
            Value::Complex(_) => TypeClass::Complex,
            Value::Str(_) => TypeClass::Str,
            Value::List(_) => TypeClass::List,
            Value::Tuple(_) => TypeClass::Tuple,
            Value::Set(_) => TypeClass::Set,
            Value::Dict(_) => TypeClass::Dict,
            Value::Scalar(scalar) => TypeClass::ArrayScalar(scalar.dtype()),
            Value::Array(_) => TypeClass::NdArray,
        }
    }

    /// Is-a test against `class`.
    pub fn is_instance_of(&self, class: TypeClass) -> bool {
        self.type_class().is_subclass_of(class)
    }

    /// Number of items for sized values; `None` for unsized ones, including
    /// 0-dimensional arrays.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::Dict(entries) => Some(entries.len()),
            Value::Array(array) => array.shape().first().copied(),
            _ => None,
        }
    }

    /// Iterate the items of an iterable value: elements of lists, tuples and sets,
    /// keys of dicts, characters of strings and outer items of arrays.
    pub fn items(&self) -> Option<Items<'_>> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Some(Items::Slice(items.iter()))
            }
            Value::Dict(entries) => Some(Items::Keys(entries.iter())),
            Value::Str(s) => Some(Items::Chars(s.chars())),
            Value::Array(array) => Some(Items::Owned(array.outer_items().into_iter())),
            _ => None,
        }
    }

    /// Real numeric content, for numbers and array-library scalars.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Scalar(scalar) if scalar.dtype().is_real() => Some(scalar.value().to_f64()),
            _ => None,
        }
    }

    /// Exact integer content, for integer host values and integer-dtype scalars.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::Scalar(scalar) if scalar.dtype().is_integer() => match scalar.value() {
                ScalarValue::Int(i) => Some(i128::from(*i)),
                ScalarValue::UInt(u) => Some(i128::from(*u)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Iterator over the items of an iterable [`Value`].
pub enum Items<'a> {
    Slice(std::slice::Iter<'a, Value>),
    Keys(std::slice::Iter<'a, (Value, Value)>),
    Chars(std::str::Chars<'a>),
    Owned(std::vec::IntoIter<Value>),
}

impl<'a> Iterator for Items<'a> {
    type Item = Cow<'a, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Items::Slice(iter) => iter.next().map(Cow::Borrowed),
            Items::Keys(iter) => iter.next().map(|(key, _)| Cow::Borrowed(key)),
            Items::Chars(iter) => iter.next().map(|c| Cow::Owned(Value::Str(c.to_string()))),
            Items::Owned(iter) => iter.next().map(Cow::Owned),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format::float_repr(*x)),
            Value::Complex(c) => f.write_str(&format::complex_repr(*c)),
            Value::Str(s) => f.write_str(&format::str_repr(s)),
            Value::List(items) => f.write_str(&format::list_repr(items)),
            Value::Tuple(items) => f.write_str(&format::tuple_repr(items)),
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                let body: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", body.join(", "))
            }
            Value::Dict(entries) => {
                let body: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", body.join(", "))
            }
            Value::Scalar(scalar) => scalar.fmt(f),
            Value::Array(array) => f.write_str(&format::format_array(array)),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )*
    };
}

impl_value_from!(
    bool => |v| Value::Bool(v),
    i32 => |v| Value::Int(v.into()),
    i64 => |v| Value::Int(v),
    u32 => |v| Value::Int(v.into()),
    usize => |v| Value::Int(v as i64),
    f32 => |v| Value::Float(v.into()),
    f64 => |v| Value::Float(v),
    Complex64 => |v| Value::Complex(v),
    &str => |v| Value::Str(v.to_string()),
    String => |v| Value::Str(v),
    ArrayScalar => |v| Value::Scalar(v),
    Array => |v| Value::Array(v),
);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// A class that instance checks can test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Root of every class
    Object,
    NoneType,
    Bool,
    Int,
    Float,
    /// Host builtin complex
    Complex,
    Str,
    List,
    Tuple,
    Set,
    Dict,
    NdArray,
    /// `numbers.Number`
    Number,
    /// `numbers.Complex`
    ComplexNumber,
    /// `numbers.Real`
    Real,
    /// `numbers.Integral`
    Integral,
    Iterable,
    Sized,
    Sequence,
    /// Abstract array-library scalar family, e.g. `numpy.floating`
    ArrayFamily(DTypeFamily),
    /// Concrete array-library scalar class, e.g. `numpy.float32`
    ArrayScalar(DType),
}

impl TypeClass {
    /// Whether every instance of `self` is an instance of `base`.
    pub fn is_subclass_of(self, base: TypeClass) -> bool {
        use TypeClass::*;
        if self == base || base == Object {
            return true;
        }
        match self {
            Int => matches!(base, Integral | Real | ComplexNumber | Number),
            Float => matches!(base, Real | ComplexNumber | Number),
            Complex => matches!(base, ComplexNumber | Number),
            Integral => matches!(base, Real | ComplexNumber | Number),
            Real => matches!(base, ComplexNumber | Number),
            ComplexNumber => base == Number,
            Str | List | Tuple | Sequence => matches!(base, Sequence | Iterable | Sized),
            Set | Dict | NdArray => matches!(base, Iterable | Sized),
            ArrayScalar(dtype) => match base {
                ArrayFamily(family) => dtype.is_subdtype(&DTypeSpec::Family(family)),
                Float => dtype == DType::Float64,
                Complex => dtype == DType::Complex128,
                Str | Sequence | Iterable | Sized => dtype == DType::Str,
                Integral => dtype.is_integer(),
                Real => dtype.is_real(),
                ComplexNumber | Number => dtype.is_numeric(),
                _ => false,
            },
            ArrayFamily(family) => match base {
                ArrayFamily(other) => family.is_subfamily_of(other),
                Integral => family.is_subfamily_of(DTypeFamily::Integer),
                Real => {
                    family.is_subfamily_of(DTypeFamily::Integer)
                        || family.is_subfamily_of(DTypeFamily::Floating)
                }
                ComplexNumber | Number => family.is_subfamily_of(DTypeFamily::Number),
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeClass::Object => "object",
            TypeClass::NoneType => "NoneType",
            TypeClass::Bool => "bool",
            TypeClass::Int => "int",
            TypeClass::Float => "float",
            TypeClass::Complex => "complex",
            TypeClass::Str => "str",
            TypeClass::List => "list",
            TypeClass::Tuple => "tuple",
            TypeClass::Set => "set",
            TypeClass::Dict => "dict",
            TypeClass::NdArray => "numpy.ndarray",
            TypeClass::Number => "numbers.Number",
            TypeClass::ComplexNumber => "numbers.Complex",
            TypeClass::Real => "numbers.Real",
            TypeClass::Integral => "numbers.Integral",
            TypeClass::Iterable => "collections.abc.Iterable",
            TypeClass::Sized => "collections.abc.Sized",
            TypeClass::Sequence => "collections.abc.Sequence",
            TypeClass::ArrayFamily(family) => return family.fmt(f),
            TypeClass::ArrayScalar(dtype) => {
                return write!(f, "<class 'numpy.{}'>", dtype.scalar_class_name())
            }
        };
        write!(f, "<class '{name}'>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tower() {
        assert!(TypeClass::Int.is_subclass_of(TypeClass::Real));
        assert!(TypeClass::Float.is_subclass_of(TypeClass::Number));
        assert!(!TypeClass::Complex.is_subclass_of(TypeClass::Real));
        assert!(!TypeClass::Bool.is_subclass_of(TypeClass::Int));
        assert!(!TypeClass::Bool.is_subclass_of(TypeClass::Number));
        assert!(TypeClass::Bool.is_subclass_of(TypeClass::Object));
    }

    #[test]
    fn array_scalars_subclass_some_builtins() {
        let f64_class = TypeClass::ArrayScalar(DType::Float64);
        let f32_class = TypeClass::ArrayScalar(DType::Float32);
        assert!(f64_class.is_subclass_of(TypeClass::Float));
        assert!(!f32_class.is_subclass_of(TypeClass::Float));
        assert!(f32_class.is_subclass_of(TypeClass::Real));
        assert!(f32_class.is_subclass_of(TypeClass::ArrayFamily(DTypeFamily::Floating)));
        assert!(!TypeClass::Float.is_subclass_of(TypeClass::ArrayFamily(DTypeFamily::Floating)));
        assert!(!TypeClass::ArrayScalar(DType::Bool).is_subclass_of(TypeClass::Number));
    }

    #[test]
    fn containers() {
        assert!(TypeClass::Str.is_subclass_of(TypeClass::Sequence));
        assert!(TypeClass::Tuple.is_subclass_of(TypeClass::Iterable));
        assert!(!TypeClass::Set.is_subclass_of(TypeClass::Sequence));
        assert!(TypeClass::NdArray.is_subclass_of(TypeClass::Iterable));
        assert!(!TypeClass::NdArray.is_subclass_of(TypeClass::Sequence));
    }

    #[test]
    fn reprs() {
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::tuple([3]).to_string(), "(3,)");
        assert_eq!(Value::from("a").to_string(), "'a'");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(TypeClass::Real.to_string(), "<class 'numbers.Real'>");
        assert_eq!(TypeClass::ArrayScalar(DType::Bool).to_string(), "<class 'numpy.bool_'>");
        assert_eq!(ArrayScalar::int64(1).to_string(), "1");
        assert_eq!(ArrayScalar::float32(0.1).to_string(), "0.1");
    }

    #[test]
    fn lengths_and_items() {
        assert_eq!(Value::from("héllo").len(), Some(5));
        assert_eq!(Value::from(vec![1, 2, 3]).len(), Some(3));
        assert_eq!(Value::from(1).len(), None);

        let items: Vec<Value> = Value::from("ab")
            .items()
            .into_iter()
            .flatten()
            .map(Cow::into_owned)
            .collect();
        assert_eq!(items, vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn scalar_casting() {
        let scalar = ArrayScalar::new(DType::Int32, ScalarValue::Float(2.7));
        assert_eq!(scalar.value(), &ScalarValue::Int(2));
        let scalar = ArrayScalar::new(DType::Float64, ScalarValue::Bool(true));
        assert_eq!(scalar.value(), &ScalarValue::Float(1.0));
    }
}
