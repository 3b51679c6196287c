use crate::{Fraction, Problem};
use num::ToPrimitive;

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(n: $t) -> Fraction {
                    Fraction::from_integer(n.into())
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> f64 {
        f.to_f64()
    }
}

impl From<Fraction> for f32 {
    fn from(f: Fraction) -> f32 {
        f.to_f32()
    }
}

/// True for any non-zero value
impl From<Fraction> for bool {
    fn from(f: Fraction) -> bool {
        !f.is_zero()
    }
}

impl ToPrimitive for Fraction {
    fn to_i64(&self) -> Option<i64> {
        self.is_integer().then_some(self.numerator)
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|n| n.to_u64())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fraction::to_f64(self))
    }
}

// mantissa times two to the power exponent
fn dyadic(negative: bool, mantissa: u64, exponent: i32) -> Result<Fraction, Problem> {
    if mantissa == 0 {
        return Ok(Fraction::zero());
    }
    let signed = |n: u64| {
        let n = i128::from(n);
        if negative {
            -n
        } else {
            n
        }
    };
    if exponent >= 0 {
        // mantissa is at least one, so this can't fit in an i64
        if exponent >= 64 {
            tracing::trace!(mantissa, exponent, "float too large for a fraction");
            return Err(Problem::OutOfRange);
        }
        return Fraction::from_wide(signed(mantissa) << exponent, 1);
    }
    let shift = exponent.unsigned_abs();
    let common = mantissa.trailing_zeros().min(shift);
    let shift = shift - common;
    if shift >= 64 {
        tracing::trace!(mantissa, exponent, "float too small for a fraction");
        return Err(Problem::OutOfRange);
    }
    Fraction::from_wide(signed(mantissa >> common), 1i128 << shift)
}

/// The exact value of a finite float
///
/// ```
/// use fractional::Fraction;
/// let quarter: Fraction = 0.25_f32.try_into().unwrap();
/// assert_eq!(quarter, Fraction::new(1, 4).unwrap());
/// ```
impl TryFrom<f32> for Fraction {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Fraction, Self::Error> {
        const NEG_BITS: u32 = 0x8000_0000;
        const EXP_BITS: u32 = 0x7f80_0000;
        const SIG_BITS: u32 = 0x007f_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u32::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = (bits & EXP_BITS) >> EXP_BITS.trailing_zeros();
        let sig = bits & SIG_BITS;
        match exp {
            0 => dyadic(neg, sig.into(), -149),
            1..=254 => dyadic(neg, (SIG_BITS + 1 + sig).into(), exp as i32 - 150),
            _ => {
                if sig == 0 {
                    Err(Problem::Infinity)
                } else {
                    Err(Problem::NotANumber)
                }
            }
        }
    }
}

/// The exact value of a finite float
///
/// Not every decimal you can type is a binary fraction, so
/// `0.1_f64` doesn't convert to one tenth.
///
/// ```
/// use fractional::Fraction;
/// let f: Fraction = 0.1_f64.try_into().unwrap();
/// assert!(f != Fraction::new(1, 10).unwrap());
/// ```
impl TryFrom<f64> for Fraction {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Fraction, Self::Error> {
        const NEG_BITS: u64 = 0x8000_0000_0000_0000;
        const EXP_BITS: u64 = 0x7ff0_0000_0000_0000;
        const SIG_BITS: u64 = 0x000f_ffff_ffff_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u64::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = (bits & EXP_BITS) >> EXP_BITS.trailing_zeros();
        let sig = bits & SIG_BITS;
        match exp {
            0 => dyadic(neg, sig, -1074),
            1..=2046 => dyadic(neg, SIG_BITS + 1 + sig, exp as i32 - 1075),
            _ => {
                if sig == 0 {
                    Err(Problem::Infinity)
                } else {
                    Err(Problem::NotANumber)
                }
            }
        }
    }
}

/// Wire shape of a [`Fraction`], reduced and checked on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub(crate) struct RawFraction {
    numerator: i64,
    denominator: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFraction> for Fraction {
    type Error = Problem;

    fn try_from(raw: RawFraction) -> Result<Fraction, Problem> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}
