//! Shared helpers for the integration tests.

#![allow(dead_code)]

use arrayguard_core::{Array, ValidationResult, Value};

/// Assert a constraint violation with exactly `expected` as message.
pub fn assert_constraint(result: ValidationResult<()>, expected: &str) {
    match result {
        Err(err) => {
            assert!(err.is_constraint_violation(), "expected a constraint violation, got {err:?}");
            assert_eq!(err.message(), expected);
        }
        Ok(()) => panic!("expected failure: {expected}"),
    }
}

/// Assert a type mismatch with exactly `expected` as message.
pub fn assert_type_mismatch(result: ValidationResult<()>, expected: &str) {
    match result {
        Err(err) => {
            assert!(err.is_type_mismatch(), "expected a type mismatch, got {err:?}");
            assert_eq!(err.message(), expected);
        }
        Ok(()) => panic!("expected failure: {expected}"),
    }
}

/// Row-major float64 matrix.
pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Array {
    Array::from_shape_vec(&[rows, cols], data).expect("shape matches data")
}

/// Zero-filled float64 array of the given shape.
pub fn zeros(shape: &[usize]) -> Array {
    let size = shape.iter().product();
    Array::from_shape_vec(shape, vec![0.0; size]).expect("shape matches data")
}

/// Nested host list, e.g. `[[1, 2], [3, 4]]`.
pub fn nested(rows: &[&[i64]]) -> Value {
    Value::list(rows.iter().map(|row| Value::list(row.iter().copied())))
}
