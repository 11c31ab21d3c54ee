//! Element type hierarchy.
//!
//! Concrete dtypes belong to a fixed set of abstract families:
//! ```text
//! generic
//!   ├── bool
//!   ├── object
//!   ├── number
//!   │     ├── integer
//!   │     │     ├── signedinteger    (int8, int16, int32, int64)
//!   │     │     └── unsignedinteger  (uint8, uint16, uint32, uint64)
//!   │     └── inexact
//!   │           ├── floating         (float32, float64)
//!   │           └── complexfloating  (complex64, complex128)
//!   └── flexible
//!         └── character            (str)
//! ```
//!
//! A [`DTypeSpec`] names either one concrete dtype or one family. Subtyping is the
//! relation "is this dtype equal to, or a member of, the spec".

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Concrete element type of an [`Array`](crate::Array).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Str,
    Object,
}

/// Abstract dtype families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DTypeFamily {
    Generic,
    Number,
    Integer,
    SignedInteger,
    UnsignedInteger,
    Inexact,
    Floating,
    ComplexFloating,
    Flexible,
    Character,
}

use DTypeFamily as F;

const SIGNED: &[DTypeFamily] = &[F::Generic, F::Number, F::Integer, F::SignedInteger];
const UNSIGNED: &[DTypeFamily] = &[F::Generic, F::Number, F::Integer, F::UnsignedInteger];
const FLOATING: &[DTypeFamily] = &[F::Generic, F::Number, F::Inexact, F::Floating];
const COMPLEX: &[DTypeFamily] = &[F::Generic, F::Number, F::Inexact, F::ComplexFloating];
const CHARACTER: &[DTypeFamily] = &[F::Generic, F::Flexible, F::Character];
const GENERIC_ONLY: &[DTypeFamily] = &[F::Generic];

impl DType {
    /// Every concrete dtype, in promotion-friendly order.
    pub const ALL: [DType; 15] = [
        DType::Bool,
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Int64,
        DType::UInt8,
        DType::UInt16,
        DType::UInt32,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
        DType::Complex64,
        DType::Complex128,
        DType::Str,
        DType::Object,
    ];

    /// Canonical lowercase name, e.g. `"float64"`.
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
            DType::Str => "str",
            DType::Object => "object",
        }
    }

    /// Name of the array-library scalar class for this dtype (`bool_`, `str_`, ...).
    pub fn scalar_class_name(self) -> &'static str {
        match self {
            DType::Bool => "bool_",
            DType::Str => "str_",
            DType::Object => "object_",
            other => other.name(),
        }
    }

    /// Families this dtype belongs to, outermost first.
    pub fn families(self) -> &'static [DTypeFamily] {
        match self {
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => SIGNED,
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => UNSIGNED,
            DType::Float32 | DType::Float64 => FLOATING,
            DType::Complex64 | DType::Complex128 => COMPLEX,
            DType::Str => CHARACTER,
            DType::Bool | DType::Object => GENERIC_ONLY,
        }
    }

    /// Whether `self` is a subtype of `spec`.
    pub fn is_subdtype(self, spec: &DTypeSpec) -> bool {
        match spec {
            DTypeSpec::Exact(other) => self == *other,
            DTypeSpec::Family(family) => self.families().contains(family),
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self.families().contains(&F::Integer)
    }

    #[inline]
    pub fn is_floating(self) -> bool {
        self.families().contains(&F::Floating)
    }

    #[inline]
    pub fn is_complex(self) -> bool {
        self.families().contains(&F::ComplexFloating)
    }

    /// Member of the `number` family (bool is not).
    #[inline]
    pub fn is_numeric(self) -> bool {
        self.families().contains(&F::Number)
    }

    /// Integer or floating.
    #[inline]
    pub fn is_real(self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Size of one element in bytes (0 for variable-width kinds).
    pub fn itemsize(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
            DType::Str | DType::Object => 0,
        }
    }

    /// Smallest dtype both operands can be stored as without losing their kind.
    pub fn promote(self, other: DType) -> DType {
        use DType::*;
        if self == other {
            return self;
        }
        match (self, other) {
            (Object, _) | (_, Object) => Object,
            (Str, _) | (_, Str) => Str,
            (Bool, x) | (x, Bool) => x,
            (a, b) if a.is_complex() || b.is_complex() => {
                if a.itemsize().max(b.itemsize()) > 8 || a == Float64 || b == Float64 {
                    Complex128
                } else if a == Complex64 || b == Complex64 {
                    if a.is_integer() || b.is_integer() {
                        Complex128
                    } else {
                        Complex64
                    }
                } else {
                    Complex128
                }
            }
            (a, b) if a.is_floating() || b.is_floating() => {
                if a == Float32 && b == Float32 {
                    Float32
                } else if (a == Float32 && b.itemsize() <= 2) || (b == Float32 && a.itemsize() <= 2) {
                    Float32
                } else {
                    Float64
                }
            }
            (a, b) => promote_integers(a, b),
        }
    }
}

fn promote_integers(a: DType, b: DType) -> DType {
    use DType::*;
    let signed = |d: DType| d.families().contains(&F::SignedInteger);
    let width = |d: DType| d.itemsize();
    match (signed(a), signed(b)) {
        (true, true) | (false, false) => {
            if width(a) >= width(b) {
                a
            } else {
                b
            }
        }
        _ => {
            let (s, u) = if signed(a) { (a, b) } else { (b, a) };
            if width(s) > width(u) {
                s
            } else {
                match width(u) {
                    1 => Int16,
                    2 => Int32,
                    4 => Int64,
                    _ => Float64,
                }
            }
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dtype = match s {
            "bool" | "bool_" | "?" | "b1" => DType::Bool,
            "int8" | "i1" | "b" => DType::Int8,
            "int16" | "i2" | "h" => DType::Int16,
            "int32" | "i4" | "i" => DType::Int32,
            "int64" | "i8" | "l" | "q" | "int" | "int_" => DType::Int64,
            "uint8" | "u1" | "B" => DType::UInt8,
            "uint16" | "u2" | "H" => DType::UInt16,
            "uint32" | "u4" | "I" => DType::UInt32,
            "uint64" | "u8" | "L" | "Q" | "uint" => DType::UInt64,
            "float32" | "f4" | "f" | "single" => DType::Float32,
            "float64" | "f8" | "d" | "float" | "double" => DType::Float64,
            "complex64" | "c8" | "F" => DType::Complex64,
            "complex128" | "c16" | "D" | "complex" => DType::Complex128,
            "str" | "str_" | "U" | "unicode" => DType::Str,
            "object" | "O" => DType::Object,
            _ => {
                return Err(ValidationError::type_mismatch(format!(
                    "data type '{s}' not understood"
                )))
            }
        };
        Ok(dtype)
    }
}

impl DTypeFamily {
    pub fn name(self) -> &'static str {
        match self {
            F::Generic => "generic",
            F::Number => "number",
            F::Integer => "integer",
            F::SignedInteger => "signedinteger",
            F::UnsignedInteger => "unsignedinteger",
            F::Inexact => "inexact",
            F::Floating => "floating",
            F::ComplexFloating => "complexfloating",
            F::Flexible => "flexible",
            F::Character => "character",
        }
    }

    /// Whether every member of `self` is also a member of `other`.
    pub fn is_subfamily_of(self, other: DTypeFamily) -> bool {
        self == other
            || match self {
                F::Number | F::Flexible => other == F::Generic,
                F::Integer | F::Inexact => matches!(other, F::Generic | F::Number),
                F::SignedInteger | F::UnsignedInteger => {
                    matches!(other, F::Generic | F::Number | F::Integer)
                }
                F::Floating | F::ComplexFloating => {
                    matches!(other, F::Generic | F::Number | F::Inexact)
                }
                F::Character => matches!(other, F::Generic | F::Flexible),
                F::Generic => false,
            }
    }
}

impl fmt::Display for DTypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class 'numpy.{}'>", self.name())
    }
}

impl FromStr for DTypeFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("numpy.").or_else(|| s.strip_prefix("np.")).unwrap_or(s);
        [
            F::Generic,
            F::Number,
            F::Integer,
            F::SignedInteger,
            F::UnsignedInteger,
            F::Inexact,
            F::Floating,
            F::ComplexFloating,
            F::Flexible,
            F::Character,
        ]
        .into_iter()
        .find(|family| family.name() == name)
        .ok_or_else(|| ValidationError::type_mismatch(format!("dtype family '{s}' not understood")))
    }
}

/// An allowed dtype: one concrete dtype or a whole family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DTypeSpec {
    Exact(DType),
    Family(DTypeFamily),
}

impl From<DType> for DTypeSpec {
    fn from(dtype: DType) -> Self {
        DTypeSpec::Exact(dtype)
    }
}

impl From<DTypeFamily> for DTypeSpec {
    fn from(family: DTypeFamily) -> Self {
        DTypeSpec::Family(family)
    }
}

impl fmt::Display for DTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DTypeSpec::Exact(dtype) => write!(f, "<class 'numpy.{}'>", dtype.scalar_class_name()),
            DTypeSpec::Family(family) => family.fmt(f),
        }
    }
}

impl FromStr for DTypeSpec {
    type Err = ValidationError;

    /// Family names win over dtype names; both accept a `numpy.` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(family) = s.parse::<DTypeFamily>() {
            return Ok(DTypeSpec::Family(family));
        }
        let name = s.strip_prefix("numpy.").or_else(|| s.strip_prefix("np.")).unwrap_or(s);
        name.parse::<DType>().map(DTypeSpec::Exact)
    }
}

impl TryFrom<String> for DTypeSpec {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DTypeSpec> for String {
    fn from(spec: DTypeSpec) -> Self {
        match spec {
            DTypeSpec::Exact(dtype) => dtype.name().to_string(),
            DTypeSpec::Family(family) => family.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_membership() {
        assert!(DType::Int32.is_subdtype(&DTypeFamily::Integer.into()));
        assert!(DType::Int32.is_subdtype(&DTypeFamily::Number.into()));
        assert!(!DType::Int32.is_subdtype(&DTypeFamily::Floating.into()));
        assert!(DType::UInt8.is_subdtype(&DTypeFamily::UnsignedInteger.into()));
        assert!(DType::Complex64.is_subdtype(&DTypeFamily::Inexact.into()));
        assert!(DType::Str.is_subdtype(&DTypeFamily::Character.into()));
        assert!(DType::Object.is_subdtype(&DTypeFamily::Generic.into()));
    }

    #[test]
    fn bool_is_not_a_number() {
        assert!(!DType::Bool.is_numeric());
        assert!(!DType::Bool.is_subdtype(&DTypeFamily::Integer.into()));
        assert!(DType::Bool.is_subdtype(&DType::Bool.into()));
    }

    #[test]
    fn exact_specs_do_not_widen() {
        assert!(!DType::Float32.is_subdtype(&DType::Float64.into()));
        assert!(DType::Float64.is_subdtype(&DType::Float64.into()));
    }

    #[test]
    fn subfamilies() {
        assert!(DTypeFamily::SignedInteger.is_subfamily_of(DTypeFamily::Number));
        assert!(DTypeFamily::Floating.is_subfamily_of(DTypeFamily::Inexact));
        assert!(!DTypeFamily::Floating.is_subfamily_of(DTypeFamily::Integer));
        assert!(!DTypeFamily::Generic.is_subfamily_of(DTypeFamily::Number));
    }

    #[test]
    fn parse_names_and_codes() {
        assert_eq!("float64".parse::<DType>().unwrap(), DType::Float64);
        assert_eq!("f4".parse::<DType>().unwrap(), DType::Float32);
        assert_eq!("int".parse::<DType>().unwrap(), DType::Int64);
        assert_eq!("?".parse::<DType>().unwrap(), DType::Bool);
        assert!("float128".parse::<DType>().is_err());

        assert_eq!(
            "numpy.floating".parse::<DTypeSpec>().unwrap(),
            DTypeSpec::Family(DTypeFamily::Floating)
        );
        assert_eq!("int32".parse::<DTypeSpec>().unwrap(), DTypeSpec::Exact(DType::Int32));
    }

    #[test]
    fn promotion() {
        assert_eq!(DType::Bool.promote(DType::Int64), DType::Int64);
        assert_eq!(DType::Int64.promote(DType::Float64), DType::Float64);
        assert_eq!(DType::Int32.promote(DType::Int64), DType::Int64);
        assert_eq!(DType::UInt8.promote(DType::Int8), DType::Int16);
        assert_eq!(DType::UInt64.promote(DType::Int64), DType::Float64);
        assert_eq!(DType::Float32.promote(DType::Float32), DType::Float32);
        assert_eq!(DType::Float64.promote(DType::Complex64), DType::Complex128);
        assert_eq!(DType::Float32.promote(DType::Complex64), DType::Complex64);
        assert_eq!(DType::Str.promote(DType::Int64), DType::Str);
        assert_eq!(DType::Object.promote(DType::Str), DType::Object);
    }

    #[test]
    fn spec_display() {
        assert_eq!(DTypeSpec::Family(DTypeFamily::Number).to_string(), "<class 'numpy.number'>");
        assert_eq!(DTypeSpec::Exact(DType::Float64).to_string(), "<class 'numpy.float64'>");
        assert_eq!(DType::Float64.to_string(), "float64");
    }
}
