//! Basic Checks Example
//!
//! Validates the inputs of a small interpolation routine the way a numerical
//! library would before doing any work.
//!
//! ## What You'll Learn
//!
//! - Running individual checks with a variable name for the messages
//! - Telling type mismatches apart from constraint violations
//! - Bundling requirements into `ArrayConstraints`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_checks
//! ```

use arrayguard_core::{
    checkers::{self, RangeOptions, SortOptions},
    Array, ArrayConstraints, ValidationError, ValidationResult, Validator, Value,
};

/// Check the arguments of `interpolate(x, xp, fp, method)`.
fn check_interpolation(x: &Value, xp: &Value, fp: &Value, method: &str) -> ValidationResult<()> {
    checkers::is_real(x, "x")?;
    checkers::has_shape(xp, -1, "xp")?;
    checkers::is_sorted(xp, &SortOptions::default().with_strict(true).with_name("xp"))?;
    checkers::is_finite(fp, "fp")?;
    checkers::is_string_in_iterable(
        &Value::from(method),
        &Value::list(["linear", "nearest"]),
        "Method",
    )
}

fn report(label: &str, result: ValidationResult<()>) {
    match result {
        Ok(()) => println!("  {label}: ok"),
        Err(err @ ValidationError::TypeMismatch { .. }) => println!("  {label}: type error: {err}"),
        Err(err) => println!("  {label}: value error: {err}"),
    }
}

fn main() {
    println!("ArrayGuard Basic Checks Example");
    println!("===============================\n");

    let x = Value::from(vec![0.5, 1.5]);
    let xp = Value::from(vec![0.0, 1.0, 2.0]);
    let fp = Value::from(vec![10.0, 20.0, 30.0]);

    println!("Interpolation inputs:");
    report("valid", check_interpolation(&x, &xp, &fp, "linear"));
    report(
        "unsorted xp",
        check_interpolation(&x, &Value::from(vec![0.0, 2.0, 1.0]), &fp, "linear"),
    );
    report(
        "complex x",
        check_interpolation(&Value::from(num_complex::Complex64::new(0.0, 1.0)), &xp, &fp, "linear"),
    );
    report(
        "NaN in fp",
        check_interpolation(&x, &xp, &Value::from(vec![1.0, f64::NAN, 3.0]), "linear"),
    );
    report("unknown method", check_interpolation(&x, &xp, &fp, "cubic"));

    println!("\nRanges:");
    let unit = RangeOptions::default().with_name("Weights");
    report("[0, 0.5, 1]", checkers::is_in_range(&[0.0, 0.5, 1.0], &[0, 1], &unit));
    report("[0, 0.5, 1.1]", checkers::is_in_range(&[0.0, 0.5, 1.1], &[0, 1], &unit));

    println!("\nShapes:");
    report("eye(3)", checkers::has_shape(&Array::eye(3), [[3i64, 3], [4, 4]], "Matrix"));
    report("eye(2)", checkers::has_shape(&Array::eye(2), [[3i64, 3], [4, 4]], "Matrix"));

    println!("\nConstraint bundle:");
    let rotation = ArrayConstraints::new("Rotation")
        .real()
        .shape([3i64, 3])
        .finite()
        .range(-1.0, 1.0);
    report("identity", rotation.validate(&Value::from(Array::eye(3))));

    let scaled = Value::from(vec![vec![2.0, 0.0, 0.0], vec![0.0, 2.0, 0.0], vec![0.0, 0.0, 2.0]]);
    let summary = rotation.report(&scaled);
    for failure in &summary.failures {
        let check = failure.check.map_or("input".to_string(), |c| c.to_string());
        println!("  scaled: {check} failed: {}", failure.error);
    }
}
