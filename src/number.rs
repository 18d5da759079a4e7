//! Numeric coercion and promoting arithmetic.
//!
//! Tool arguments arrive from the model as JSON numbers or strings. An
//! [`Operand`] captures that union; [`Operand::coerce`] resolves it into
//! a canonical [`Number`], trying integer first, then float, then
//! complex for textual input. Arithmetic on `Number` follows standard
//! numeric promotion: int stays int, any float operand promotes to
//! float, any complex operand promotes to complex.

use crate::error::{RegnError, Result};
use num_complex::Complex64;
use serde::Deserialize;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// A canonical numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    Complex(Complex64),
}

/// A tool operand: one of the three numeric kinds, or text still to be
/// coerced. Deserializes untagged, so a JSON integer becomes `Int`, a
/// JSON float becomes `Float`, and a JSON string becomes `Text`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Text(String),
}

impl Operand {
    /// Resolve the operand into a canonical number.
    ///
    /// Already-numeric operands pass through unchanged. Text is tried
    /// as an integer literal, then a float literal (decimal point or
    /// exponent marker), then a complex literal (`3+4j`, `5j`). Any
    /// other text is a coercion error; whitespace and thousands
    /// separators are not tolerated.
    pub fn coerce(&self) -> Result<Number> {
        match self {
            Operand::Int(v) => Ok(Number::Int(*v)),
            Operand::Float(v) => Ok(Number::Float(*v)),
            Operand::Complex(v) => Ok(Number::Complex(*v)),
            Operand::Text(text) => parse_number(text),
        }
    }
}

/// Parse a numeric literal in priority order: integer, float, complex.
///
/// `i64::from_str` rejects any text with a decimal point or exponent
/// marker, so `"1e2"` and `"2.0"` land in the float branch even though
/// their values are whole.
fn parse_number(text: &str) -> Result<Number> {
    if let Ok(v) = text.parse::<i64>() {
        return Ok(Number::Int(v));
    }
    if let Ok(v) = text.parse::<f64>() {
        return Ok(Number::Float(v));
    }
    if let Some(v) = parse_complex(text) {
        return Ok(Number::Complex(v));
    }
    Err(RegnError::Coercion(text.to_string()))
}

/// Parse a complex literal, accepting the Python-style `j` suffix
/// alongside num-complex's `i`.
fn parse_complex(text: &str) -> Option<Complex64> {
    let normalized: String = text
        .chars()
        .map(|c| if c == 'j' || c == 'J' { 'i' } else { c })
        .collect();
    Complex64::from_str(&normalized).ok()
}

impl Number {
    /// Widen to a complex value.
    fn to_complex(self) -> Complex64 {
        match self {
            Number::Int(v) => Complex64::new(v as f64, 0.0),
            Number::Float(v) => Complex64::new(v, 0.0),
            Number::Complex(v) => v,
        }
    }

    /// Real-axis value. Only meaningful for `Int` and `Float`; the
    /// arithmetic impls match complex operands before calling this.
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
            Number::Complex(v) => v.re,
        }
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                // i64 overflow promotes to float instead of wrapping
                None => Number::Float(a as f64 + b as f64),
            },
            (Number::Complex(a), b) => Number::Complex(a + b.to_complex()),
            (a, Number::Complex(b)) => Number::Complex(a.to_complex() + b),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(diff) => Number::Int(diff),
                None => Number::Float(a as f64 - b as f64),
            },
            (Number::Complex(a), b) => Number::Complex(a - b.to_complex()),
            (a, Number::Complex(b)) => Number::Complex(a.to_complex() - b),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Int(v) => match v.checked_neg() {
                Some(n) => Number::Int(n),
                None => Number::Float(-(v as f64)),
            },
            Number::Float(v) => Number::Float(-v),
            Number::Complex(v) => Number::Complex(-v),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
            Number::Complex(v) => {
                if v.re == 0.0 && !v.re.is_sign_negative() {
                    write!(f, "{}j", v.im)
                } else if v.im.is_sign_negative() {
                    write!(f, "{}-{}j", v.re, -v.im)
                } else {
                    write!(f, "{}+{}j", v.re, v.im)
                }
            }
        }
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Float(v)
    }
}

impl From<Complex64> for Operand {
    fn from(v: Complex64) -> Self {
        Operand::Complex(v)
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Text(v.to_string())
    }
}
