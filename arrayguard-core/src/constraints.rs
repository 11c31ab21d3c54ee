//! Declarative array constraints
//!
//! [`ArrayConstraints`] bundles the array checks into one value that can be built
//! in code or deserialized from configuration:
//!
//! ```
//! use arrayguard_core::{ArrayConstraints, Validator, Value};
//!
//! let points: ArrayConstraints = serde_json::from_str(r#"{
//!     "name": "Points",
//!     "dtype": "floating",
//!     "shape": [-1, 3],
//!     "finite": true
//! }"#).unwrap();
//!
//! let good = Value::from(vec![vec![0.0, 1.0, 2.0]]);
//! assert!(points.validate(&good).is_ok());
//!
//! let bad = Value::from(vec![vec![0.0, 1.0]]);
//! assert_eq!(
//!     points.validate(&bad).unwrap_err().to_string(),
//!     "Points has shape (1, 2) which is not allowed. Shape must be (-1, 3)."
//! );
//! ```
//!
//! Checks run in a fixed order: real, dtype, shape, length, finite, integer-like,
//! nonnegative, range, sorted. [`ArrayConstraints::validate`] stops at the first
//! failure; [`ArrayConstraints::report`] runs every configured check.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::array::Array;
use crate::candidates::OneOrMany;
use crate::checkers::{self, LengthOptions, RangeOptions, SortOptions, DEFAULT_ARRAY_NAME};
use crate::dtype::DTypeSpec;
use crate::errors::{ValidationError, ValidationResult};
use crate::shape::ShapeLike;
use crate::traits::{ArrayLike, Validator};
use crate::value::Value;

/// The individual checks an [`ArrayConstraints`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Real,
    DType,
    Shape,
    Length,
    Finite,
    IntegerLike,
    Nonnegative,
    Range,
    Sorted,
}

impl CheckKind {
    /// Execution order.
    pub const ORDER: [CheckKind; 9] = [
        CheckKind::Real,
        CheckKind::DType,
        CheckKind::Shape,
        CheckKind::Length,
        CheckKind::Finite,
        CheckKind::IntegerLike,
        CheckKind::Nonnegative,
        CheckKind::Range,
        CheckKind::Sorted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Real => "real",
            CheckKind::DType => "dtype",
            CheckKind::Shape => "shape",
            CheckKind::Length => "length",
            CheckKind::Finite => "finite",
            CheckKind::IntegerLike => "integer_like",
            CheckKind::Nonnegative => "nonnegative",
            CheckKind::Range => "range",
            CheckKind::Sorted => "sorted",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declarative set of array requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConstraints {
    /// Variable name used in every message
    pub name: String,
    /// Require real numbers
    pub real: bool,
    /// Allowed dtypes or dtype families
    pub dtype: Option<OneOrMany<DTypeSpec>>,
    /// Allowed shapes
    pub shape: Option<OneOrMany<ShapeLike>>,
    pub exact_length: Option<OneOrMany<usize>>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Reject infinite and NaN values
    pub finite: bool,
    /// Require integer-like values
    pub integer_like: bool,
    pub nonnegative: bool,
    /// Inclusive `[lower, upper]` bounds
    pub range: Option<Vec<f64>>,
    pub strict_lower: bool,
    pub strict_upper: bool,
    /// Sort requirement; its name is replaced by [`name`](Self::name)
    pub sorted: Option<SortOptions>,
}

impl Default for ArrayConstraints {
    fn default() -> Self {
        Self {
            name: DEFAULT_ARRAY_NAME.to_string(),
            real: false,
            dtype: None,
            shape: None,
            exact_length: None,
            min_length: None,
            max_length: None,
            finite: false,
            integer_like: false,
            nonnegative: false,
            range: None,
            strict_lower: false,
            strict_upper: false,
            sorted: None,
        }
    }
}

impl ArrayConstraints {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn real(mut self) -> Self {
        self.real = true;
        self
    }

    pub fn dtype(mut self, allowed: impl Into<OneOrMany<DTypeSpec>>) -> Self {
        self.dtype = Some(allowed.into());
        self
    }

    pub fn shape(mut self, allowed: impl Into<OneOrMany<ShapeLike>>) -> Self {
        self.shape = Some(allowed.into());
        self
    }

    pub fn exact_length(mut self, allowed: impl Into<OneOrMany<usize>>) -> Self {
        self.exact_length = Some(allowed.into());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn finite(mut self) -> Self {
        self.finite = true;
        self
    }

    pub fn integer_like(mut self) -> Self {
        self.integer_like = true;
        self
    }

    pub fn nonnegative(mut self) -> Self {
        self.nonnegative = true;
        self
    }

    pub fn range(mut self, lower: f64, upper: f64) -> Self {
        self.range = Some(vec![lower, upper]);
        self
    }

    pub fn sorted(mut self, options: SortOptions) -> Self {
        self.sorted = Some(options);
        self
    }

    fn has_length_requirement(&self) -> bool {
        self.exact_length.is_some() || self.min_length.is_some() || self.max_length.is_some()
    }

    fn is_configured(&self, check: CheckKind) -> bool {
        match check {
            CheckKind::Real => self.real,
            CheckKind::DType => self.dtype.is_some(),
            CheckKind::Shape => self.shape.is_some(),
            CheckKind::Length => self.has_length_requirement(),
            CheckKind::Finite => self.finite,
            CheckKind::IntegerLike => self.integer_like,
            CheckKind::Nonnegative => self.nonnegative,
            CheckKind::Range => self.range.is_some(),
            CheckKind::Sorted => self.sorted.is_some(),
        }
    }

    /// Run one configured check.
    fn run(&self, check: CheckKind, subject: &Value, array: &Array) -> ValidationResult<()> {
        let name = self.name.as_str();
        match check {
            CheckKind::Real => checkers::is_real(array, name),
            CheckKind::DType => match &self.dtype {
                Some(allowed) => checkers::is_subdtype(array, allowed.clone(), name),
                None => Ok(()),
            },
            CheckKind::Shape => match &self.shape {
                Some(allowed) => checkers::has_shape(array, allowed.clone(), name),
                None => Ok(()),
            },
            CheckKind::Length => {
                let options = LengthOptions {
                    exact_length: self.exact_length.clone(),
                    min_length: self.min_length,
                    max_length: self.max_length,
                    name: self.name.clone(),
                    ..LengthOptions::default()
                };
                checkers::has_length(subject, &options)
            }
            CheckKind::Finite => checkers::is_finite(array, name),
            CheckKind::IntegerLike => checkers::is_integerlike(array, false, name),
            CheckKind::Nonnegative => checkers::is_nonnegative(array, name),
            CheckKind::Range => match &self.range {
                Some(bounds) => {
                    let options = RangeOptions::default()
                        .with_strict_lower(self.strict_lower)
                        .with_strict_upper(self.strict_upper)
                        .with_name(name);
                    checkers::is_in_range(array, bounds, &options)
                }
                None => Ok(()),
            },
            CheckKind::Sorted => match &self.sorted {
                Some(options) => checkers::is_sorted(array, &options.clone().with_name(name)),
                None => Ok(()),
            },
        }
    }

    fn configured_checks(&self) -> impl Iterator<Item = CheckKind> + '_ {
        CheckKind::ORDER
            .into_iter()
            .filter(move |check| self.is_configured(*check))
    }

    /// Run every configured check and collect all failures.
    ///
    /// A subject that cannot be read as an array yields a single failure.
    pub fn report(&self, subject: &Value) -> ConstraintReport {
        let mut report = ConstraintReport::default();
        let array = match subject.to_array() {
            Ok(array) => array,
            Err(error) => {
                report.failures.push(CheckFailure {
                    check: None,
                    error,
                });
                return report;
            }
        };
        for check in self.configured_checks() {
            if let Err(error) = self.run(check, subject, &array) {
                report.failures.push(CheckFailure {
                    check: Some(check),
                    error,
                });
            }
        }
        log_debug!(
            "{} constraints: {} failure(s)",
            self.name,
            report.failures.len()
        );
        report
    }
}

impl Validator for ArrayConstraints {
    type Subject = Value;

    fn validate(&self, subject: &Value) -> ValidationResult<()> {
        let array = subject.to_array()?;
        for check in self.configured_checks() {
            self.run(check, subject, &array)?;
        }
        Ok(())
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFailure {
    /// The check that failed; `None` when the subject could not be read as an array
    pub check: Option<CheckKind>,
    pub error: ValidationError,
}

/// Result of [`ArrayConstraints::report`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintReport {
    pub failures: Vec<CheckFailure>,
}

impl ConstraintReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages in check order.
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.error.message()).collect()
    }

    /// The first failure, as [`Validator::validate`] would report it.
    pub fn into_result(self) -> ValidationResult<()> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DTypeFamily;

    #[test]
    fn empty_constraints_accept_anything_array_like() {
        let constraints = ArrayConstraints::default();
        assert!(constraints.validate(&Value::from(vec![1, 2])).is_ok());
        assert!(constraints.validate(&Value::from("text")).is_ok());
    }

    #[test]
    fn first_failure_wins() {
        let constraints = ArrayConstraints::new("Weights").finite().nonnegative();
        let subject = Value::from(vec![-1.0, f64::NAN]);
        let err = constraints.validate(&subject).unwrap_err();
        assert_eq!(err.message(), "Weights must have finite values.");
    }

    #[test]
    fn report_collects_everything() {
        let constraints = ArrayConstraints::new("Weights")
            .dtype(DTypeFamily::Integer)
            .finite()
            .nonnegative()
            .range(0.0, 1.0);
        let report = constraints.report(&Value::from(vec![-1.0, f64::INFINITY]));
        assert!(!report.is_valid());
        let checks: Vec<_> = report.failures.iter().filter_map(|f| f.check).collect();
        assert_eq!(
            checks,
            vec![CheckKind::DType, CheckKind::Finite, CheckKind::Nonnegative, CheckKind::Range]
        );
        assert_eq!(
            report.messages()[0],
            "Weights has incorrect dtype of 'float64'. The dtype must be a subtype of <class 'numpy.integer'>."
        );
        assert_eq!(report.clone().into_result().unwrap_err(), report.failures[0].error);
    }

    #[test]
    fn length_measures_the_subject_as_given() {
        let constraints = ArrayConstraints::new("Pair").exact_length(2usize);
        assert!(constraints.validate(&Value::tuple([1, 2])).is_ok());
        let err = constraints.validate(&Value::tuple([1, 2, 3])).unwrap_err();
        assert_eq!(err.message(), "Pair must have a length equal to any of: 2. Got length 3 instead.");
    }

    #[test]
    fn sorted_uses_constraint_name() {
        let constraints = ArrayConstraints::new("Times").sorted(SortOptions::default().with_strict(true));
        let err = constraints.validate(&Value::from(vec![1, 1])).unwrap_err();
        assert_eq!(err.message(), "Times [1 1] must be sorted in strict ascending order.");
    }

    #[test]
    fn unreadable_subject() {
        let ragged = Value::list([Value::from(vec![1, 2]), Value::from(vec![1])]);
        let report = ArrayConstraints::default().report(&ragged);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].check, None);
    }

    #[test]
    fn deserializes_with_defaults() {
        let constraints: ArrayConstraints = serde_json::from_str(
            r#"{"name": "Range", "dtype": ["integer", "float32"], "shape": 2, "sorted": {}}"#,
        )
        .unwrap();
        assert_eq!(constraints.name, "Range");
        assert_eq!(constraints.dtype.as_ref().map(OneOrMany::len), Some(2));
        assert_eq!(constraints.sorted, Some(SortOptions::default()));
        assert!(!constraints.finite);
        assert!(constraints.validate(&Value::from(vec![0, 1])).is_ok());
        assert!(constraints.validate(&Value::from(vec![1, 0])).is_err());
    }
}
