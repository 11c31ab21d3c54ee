//! Message formatting.
//!
//! Failure messages echo the offending values the way a user of the array library
//! would see them printed: host floats as `1.0`, tuples as `(3,)`, arrays as
//! `[0.  0.5 1. ]`.

use core::fmt;

use num_complex::Complex64;

use crate::array::{Array, ArrayData};
use crate::dtype::DType;

/// Host-style float repr: `1.0`, `0.5`, `1e+16`, `inf`, `nan`.
pub fn float_repr(x: f64) -> String {
    python_float(x)
}

/// Same as [`float_repr`] but with single precision shortest digits.
pub fn float32_repr(x: f32) -> String {
    python_float(x)
}

fn python_float<T>(x: T) -> String
where
    T: fmt::Display + fmt::LowerExp + Copy + Into<f64>,
{
    let v: f64 = x.into();
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{x:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    let plain = x.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// Host-style complex repr: `(1+2j)`, `2j`, `(1-0j)`.
pub fn complex_repr(c: Complex64) -> String {
    let trim = |x: f64| {
        let s = float_repr(x);
        s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
    };
    let imag = trim(c.im);
    if c.re == 0.0 && c.re.is_sign_positive() {
        return format!("{imag}j");
    }
    let sign = if imag.starts_with('-') { "" } else { "+" };
    format!("({}{sign}{imag}j)", trim(c.re))
}

/// Single-quoted string repr.
pub fn str_repr(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{s}\"")
    } else {
        format!("'{}'", s.replace('\'', "\\'"))
    }
}

/// `[a, b, c]`
pub fn list_repr<T: fmt::Display>(items: &[T]) -> String {
    let body: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", body.join(", "))
}

/// `()`, `(a,)`, `(a, b)`
pub fn tuple_repr<T: fmt::Display>(items: &[T]) -> String {
    match items {
        [] => "()".to_string(),
        [only] => format!("({only},)"),
        _ => {
            let body: Vec<String> = items.iter().map(ToString::to_string).collect();
            format!("({})", body.join(", "))
        }
    }
}

/// Array-library style rendering of an array.
///
/// Elements share a common width; float elements are aligned on the decimal point
/// and drop trailing zeros (`1.`, `0.5`). Nested axes are separated by newlines.
pub fn format_array(array: &Array) -> String {
    let shape = array.shape();
    if shape.is_empty() {
        return array.scalar_at(0).map(|v| v.to_string()).unwrap_or_default();
    }
    let cells = element_cells(array);
    if array.size() == 0 {
        return "[]".to_string();
    }
    let mut out = String::new();
    let mut cursor = 0;
    write_block(&mut out, &cells, shape, 0, &mut cursor);
    out
}

fn write_block(out: &mut String, cells: &[String], shape: &[usize], depth: usize, cursor: &mut usize) {
    out.push('[');
    let remaining = shape.len() - depth;
    for i in 0..shape[depth] {
        if i > 0 {
            if remaining == 1 {
                out.push(' ');
            } else {
                out.push_str(&"\n".repeat(remaining - 1));
                out.push_str(&" ".repeat(depth + 1));
            }
        }
        if remaining == 1 {
            out.push_str(&cells[*cursor]);
            *cursor += 1;
        } else {
            write_block(out, cells, shape, depth + 1, cursor);
        }
    }
    out.push(']');
}

/// Render every element in storage order, padded to a common width.
fn element_cells(array: &Array) -> Vec<String> {
    match array.data() {
        ArrayData::Float(values) => {
            let single = array.dtype() == DType::Float32;
            float_cells(values.iter().copied(), single)
        }
        ArrayData::Bool(values) => right_align(
            values
                .iter()
                .map(|b| if *b { "True" } else { "False" }.to_string())
                .collect(),
        ),
        ArrayData::Int(values) => right_align(values.iter().map(ToString::to_string).collect()),
        ArrayData::UInt(values) => right_align(values.iter().map(ToString::to_string).collect()),
        ArrayData::Complex(values) => right_align(
            values
                .iter()
                .map(|c| {
                    let repr = complex_repr(*c);
                    repr.trim_start_matches('(').trim_end_matches(')').to_string()
                })
                .collect(),
        ),
        ArrayData::Str(values) => values.iter().map(|s| str_repr(s)).collect(),
        ArrayData::Object(values) => values.iter().map(ToString::to_string).collect(),
    }
}

fn right_align(cells: Vec<String>) -> Vec<String> {
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    cells.into_iter().map(|c| format!("{c:>width$}")).collect()
}

fn float_cells(values: impl Iterator<Item = f64>, single: bool) -> Vec<String> {
    let reprs: Vec<(f64, String)> = values
        .map(|x| {
            let repr = if single {
                float32_repr(x as f32)
            } else {
                float_repr(x)
            };
            (x, repr)
        })
        .collect();

    // Scientific notation anywhere: fall back to plain right alignment
    if reprs.iter().any(|(_, r)| r.contains('e')) {
        return right_align(reprs.into_iter().map(|(_, r)| r).collect());
    }

    let split: Vec<Option<(String, String)>> = reprs
        .iter()
        .map(|(x, repr)| {
            if !x.is_finite() {
                return None;
            }
            let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
            let frac_part = if frac_part == "0" { "" } else { frac_part };
            Some((int_part.to_string(), frac_part.to_string()))
        })
        .collect();

    let int_width = split.iter().flatten().map(|(i, _)| i.len()).max().unwrap_or(0);
    let frac_width = split.iter().flatten().map(|(_, f)| f.len()).max().unwrap_or(0);
    let total = int_width + 1 + frac_width;

    reprs
        .iter()
        .zip(split)
        .map(|((_, repr), parts)| match parts {
            Some((int_part, frac_part)) => {
                format!("{int_part:>int_width$}.{frac_part:<frac_width$}")
            }
            None => format!("{repr:>total$}"),
        })
        .collect()
}
