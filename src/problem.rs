// We need to refer to this type in the documentation
#[allow(unused_imports)]
use crate::Fraction;

/// Problems when making, converting or doing arithmetic with a [`Fraction`]

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Problem {
    /// Tried to form a fraction with a zero denominator, whether by
    /// construction, division by zero or inverting zero
    DivisionByZero,
    /// The reduced result does not fit in the numerator or denominator
    OutOfRange,
    /// Tried to convert a floating point NaN, which has no equivalent
    NotANumber,
    /// Tried to convert a floating point Infinity which has no equivalent
    Infinity,
}

use std::fmt;

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Problem::DivisionByZero => "division by zero",
            Problem::OutOfRange => "fraction out of range",
            Problem::NotANumber => "not a number",
            Problem::Infinity => "infinite value",
        };
        f.write_str(text)
    }
}

impl std::error::Error for Problem {}
