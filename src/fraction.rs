use crate::Problem;
use num::Integer;
use std::cmp::Ordering;

pub(crate) mod convert;
mod test;

/// Ratio of two machine integers, always in lowest terms
///
/// The sign lives on the numerator and the denominator is always positive,
/// so two fractions for the same rational number have identical numerator
/// and denominator. Every constructor and every mutating operation reduces
/// before it returns.
///
/// Intermediate products are computed at double width, so arithmetic only
/// fails with [`Problem::OutOfRange`] when the *reduced* answer doesn't fit.
///
/// Equality is exact. Ordering (`<` and `>`) compares [`f64`] approximations
/// and may judge two distinct but extremely close fractions as unordered,
/// in which case both `<` and `>` are false. `<=` and `>=` check exact
/// equality first and only then fall back to the approximate ordering.
///
/// # Examples
///
/// Fractions are reduced on construction
/// ```
/// use fractional::Fraction;
/// let half = Fraction::new(2, 4).unwrap();
/// assert_eq!(half.numerator(), 1);
/// assert_eq!(half.denominator(), 2);
/// assert_eq!(half.to_string(), "1/2");
/// ```
///
/// Simple arithmetic
/// ```
/// use fractional::Fraction;
/// let half = Fraction::new(1, 2).unwrap();
/// let quarter = Fraction::new(1, 4).unwrap();
/// assert_eq!(half + quarter, Fraction::new(3, 4).unwrap());
/// assert_eq!(half * 3, Fraction::new(3, 2).unwrap());
/// ```
///
/// Division by zero is an error, not a panic, through the named methods
/// ```
/// use fractional::{Fraction, Problem};
/// let half = Fraction::new(1, 2).unwrap();
/// let zero = Fraction::new(0, 5).unwrap();
/// assert_eq!(half.try_div(zero), Err(Problem::DivisionByZero));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "convert::RawFraction")
)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

// Lowest terms for a widened pair, positive denominator
fn canonical(numerator: i128, denominator: i128) -> Result<(i64, i64), Problem> {
    if denominator == 0 {
        tracing::trace!(%numerator, "rejected zero denominator");
        return Err(Problem::DivisionByZero);
    }
    let divisor = Integer::gcd(&numerator.unsigned_abs(), &denominator.unsigned_abs());
    let negative = (numerator < 0) ^ (denominator < 0);
    let magnitude = numerator.unsigned_abs() / divisor;
    let reduced = denominator.unsigned_abs() / divisor;

    let top = i128::try_from(magnitude)
        .ok()
        .map(|n| if negative { -n } else { n })
        .and_then(|n| i64::try_from(n).ok());
    match (top, i64::try_from(reduced).ok()) {
        (Some(n), Some(d)) => Ok((n, d)),
        _ => {
            tracing::trace!(%numerator, %denominator, "reduced fraction out of range");
            Err(Problem::OutOfRange)
        }
    }
}

// Operators can't report a Problem, so they panic like integer arithmetic
fn settle(result: Result<Fraction, Problem>) -> Fraction {
    match result {
        Ok(answer) => answer,
        Err(problem) => panic!("fraction arithmetic failed: {problem}"),
    }
}

impl Fraction {
    /// Zero, the additive identity
    pub const fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// One, the multiplicative identity
    pub const fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    /// The fraction `numerator / denominator` in lowest terms
    ///
    /// # Example
    ///
    /// ```
    /// use fractional::{Fraction, Problem};
    /// let f = Fraction::new(2, -4).unwrap();
    /// assert_eq!((f.numerator(), f.denominator()), (-1, 2));
    /// assert_eq!(Fraction::new(1, 0), Err(Problem::DivisionByZero));
    /// ```
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, Problem> {
        Self::from_wide(numerator.into(), denominator.into())
    }

    /// The whole number `n`, which is `n/1`
    pub const fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    fn from_wide(numerator: i128, denominator: i128) -> Result<Self, Problem> {
        let (numerator, denominator) = canonical(numerator, denominator)?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Always positive
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Put this fraction in lowest terms with the sign on the numerator
    ///
    /// Returns true if it already was. Every `Fraction` is kept reduced,
    /// so for any value you can hold this is a no-op returning true and
    /// the rewriting path below is never taken.
    pub fn reduce(&mut self) -> bool {
        let divisor = Integer::gcd(
            &self.numerator.unsigned_abs(),
            &self.denominator.unsigned_abs(),
        );
        if divisor == 1 && self.denominator > 0 {
            return true;
        }
        if let Ok((numerator, denominator)) =
            canonical(self.numerator.into(), self.denominator.into())
        {
            self.numerator = numerator;
            self.denominator = denominator;
        }
        false
    }

    // Shared by addition and subtraction. Dividing by the gcd of the
    // denominators first keeps the products small.
    fn combine(self, other: Self, op: fn(i128, i128) -> i128) -> Result<Self, Problem> {
        let divisor = Integer::gcd(&self.denominator, &other.denominator);
        let left = i128::from(other.denominator / divisor) * i128::from(self.numerator);
        let right = i128::from(self.denominator / divisor) * i128::from(other.numerator);
        let denominator = i128::from(self.denominator / divisor) * i128::from(other.denominator);
        Self::from_wide(op(left, right), denominator)
    }

    /// The sum, or [`Problem::OutOfRange`] if it can't be represented
    pub fn try_add(self, other: Self) -> Result<Self, Problem> {
        self.combine(other, |a, b| a + b)
    }

    /// The difference, or [`Problem::OutOfRange`] if it can't be represented
    pub fn try_sub(self, other: Self) -> Result<Self, Problem> {
        self.combine(other, |a, b| a - b)
    }

    /// The product, or [`Problem::OutOfRange`] if it can't be represented
    pub fn try_mul(self, other: Self) -> Result<Self, Problem> {
        Self::from_wide(
            i128::from(self.numerator) * i128::from(other.numerator),
            i128::from(self.denominator) * i128::from(other.denominator),
        )
    }

    /// The quotient
    ///
    /// # Errors
    ///
    /// [`Problem::DivisionByZero`] if `other` is zero, [`Problem::OutOfRange`]
    /// if the answer can't be represented
    pub fn try_div(self, other: Self) -> Result<Self, Problem> {
        if other.numerator == 0 {
            tracing::trace!(dividend = %self, "rejected division by zero");
            return Err(Problem::DivisionByZero);
        }
        Self::from_wide(
            i128::from(self.numerator) * i128::from(other.denominator),
            i128::from(self.denominator) * i128::from(other.numerator),
        )
    }

    /// The reciprocal of this Fraction
    ///
    /// # Example
    ///
    /// ```
    /// use fractional::Fraction;
    /// let five = Fraction::from_integer(5);
    /// let a_fifth = Fraction::new(1, 5).unwrap();
    /// assert_eq!(five.inverse(), Ok(a_fifth));
    /// assert_eq!(a_fifth.inverse(), Ok(five));
    /// ```
    pub fn inverse(self) -> Result<Self, Problem> {
        if self.numerator == 0 {
            tracing::trace!("rejected inverting zero");
            return Err(Problem::DivisionByZero);
        }
        Self::from_wide(self.denominator.into(), self.numerator.into())
    }

    /// Replace this Fraction with its reciprocal, also returning the new value
    ///
    /// On error the Fraction is left unchanged.
    pub fn invert(&mut self) -> Result<Self, Problem> {
        let inverse = self.inverse()?;
        *self = inverse;
        Ok(inverse)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Checks if the value is an integer
    ///
    /// # Example
    ///
    /// ```
    /// use fractional::Fraction;
    /// assert!(Fraction::from_integer(5).is_integer());
    /// assert!(Fraction::new(16, 4).unwrap().is_integer());
    /// assert!(!Fraction::new(5, 4).unwrap().is_integer());
    /// ```
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// The integer part, truncated towards zero
    ///
    /// ```
    /// use fractional::Fraction;
    /// let approx_pi = Fraction::new(22, 7).unwrap();
    /// assert_eq!(approx_pi.trunc(), Fraction::from_integer(3));
    /// ```
    pub fn trunc(&self) -> Self {
        Self::from_integer(self.numerator / self.denominator)
    }

    /// The fractional part, with the same sign as this value
    ///
    /// ```
    /// use fractional::Fraction;
    /// let backward = Fraction::new(-53, 9).unwrap();
    /// assert_eq!(backward.fract(), Fraction::new(-8, 9).unwrap());
    /// ```
    pub fn fract(&self) -> Self {
        if self.is_integer() {
            return Self::zero();
        }
        // gcd(n % d, d) == gcd(n, d) so this is still reduced
        Self {
            numerator: self.numerator % self.denominator,
            denominator: self.denominator,
        }
    }

    /// # Panics
    ///
    /// If the numerator is [`i64::MIN`]
    pub fn abs(&self) -> Self {
        if self.numerator < 0 {
            -*self
        } else {
            *self
        }
    }

    /// -1, 0 or 1 according to the sign of this value
    pub fn signum(&self) -> Self {
        Self::from_integer(self.numerator.signum())
    }

    /// Integer exponentiation
    ///
    /// Any value to the power zero is one. A negative exponent raises the
    /// reciprocal, so zero to a negative power is [`Problem::DivisionByZero`].
    ///
    /// ```
    /// use fractional::Fraction;
    /// let two_thirds = Fraction::new(2, 3).unwrap();
    /// assert_eq!(two_thirds.powi(3), Fraction::new(8, 27));
    /// assert_eq!(two_thirds.powi(-2), Fraction::new(9, 4));
    /// ```
    pub fn powi(self, exp: i32) -> Result<Self, Problem> {
        let base = if exp < 0 { self.inverse()? } else { self };
        let exp = exp.unsigned_abs();
        let mut result = Self::one();
        for b in (0..(u32::BITS - exp.leading_zeros())).rev() {
            result = result.try_mul(result)?;
            if (exp >> b) & 1 == 1 {
                result = result.try_mul(base)?;
            }
        }
        Ok(result)
    }

    /// `numerator / denominator` computed in floating point, so possibly inexact
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// As [`Fraction::to_f64`] but in single precision
    pub fn to_f32(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

use core::fmt;

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.numerator.unsigned_abs();
        let text = if self.denominator == 1 {
            magnitude.to_string()
        } else {
            format!("{magnitude}/{}", self.denominator)
        };
        f.pad_integral(self.numerator >= 0, "", &text)
    }
}

use core::ops::*;

/// # Panics
///
/// If the numerator is [`i64::MIN`], whose negation doesn't fit. Use
/// `Fraction::zero().try_sub(f)` to get [`Problem::OutOfRange`] instead.
impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self {
        settle(Self::from_wide(
            -i128::from(self.numerator),
            self.denominator.into(),
        ))
    }
}

// Operator forms of the try_ methods, for Fraction and i64 operands alike.
// The whole answer is computed before the assignment forms store it.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $try:ident) => {
        impl $imp for Fraction {
            type Output = Self;

            fn $method(self, other: Self) -> Self {
                settle(self.$try(other))
            }
        }

        impl $imp<i64> for Fraction {
            type Output = Self;

            fn $method(self, other: i64) -> Self {
                settle(self.$try(Self::from_integer(other)))
            }
        }

        impl $assign_imp for Fraction {
            fn $assign_method(&mut self, other: Self) {
                *self = settle(self.$try(other));
            }
        }

        impl $assign_imp<i64> for Fraction {
            fn $assign_method(&mut self, other: i64) {
                *self = settle(self.$try(Self::from_integer(other)));
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, try_add);
forward_binop!(Sub, sub, SubAssign, sub_assign, try_sub);
forward_binop!(Mul, mul, MulAssign, mul_assign, try_mul);
forward_binop!(Div, div, DivAssign, div_assign, try_div);

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |total, f| total + f)
    }
}

impl std::iter::Product for Fraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |total, f| total * f)
    }
}

impl PartialOrd for Fraction {
    /// Exactly equal fractions are `Equal`. Otherwise the [`f64`]
    /// approximations decide, and if those can't tell the two apart
    /// there is no ordering.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.to_f64().partial_cmp(&other.to_f64()) {
            Some(Ordering::Equal) => None,
            ordering => ordering,
        }
    }
}

impl num::Zero for Fraction {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl num::One for Fraction {
    fn one() -> Self {
        Self::one()
    }
}

impl num::CheckedAdd for Fraction {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.try_add(*v).ok()
    }
}

impl num::CheckedSub for Fraction {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        self.try_sub(*v).ok()
    }
}

impl num::CheckedMul for Fraction {
    fn checked_mul(&self, v: &Self) -> Option<Self> {
        self.try_mul(*v).ok()
    }
}

impl num::CheckedDiv for Fraction {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        self.try_div(*v).ok()
    }
}
