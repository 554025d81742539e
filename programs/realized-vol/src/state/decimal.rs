use std::cmp::Ordering;
use std::fmt;

use anchor_lang::prelude::*;

use crate::{constants::MAX_DECIMAL_SCALE, errors::VolError};

/// Fixed-point decimal: `mantissa / 10^scale`.
///
/// Prices and confidence bands stay in this form end to end so that
/// comparisons and persisted values are exact. Only the log/sqrt steps of the
/// volatility formula leave fixed point, through [`Decimal::to_f64`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decimal {
    pub mantissa: i128,
    pub scale: u32,
}

impl Decimal {
    /// Serialized size: i128 mantissa + u32 scale.
    pub const SIZE: usize = 16 + 4;

    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa > 0
    }

    /// Rounds half away from zero to `scale` fractional digits.
    pub fn from_f64(value: f64, scale: u32) -> Result<Self> {
        require!(value.is_finite(), VolError::MathError);
        require!(scale <= MAX_DECIMAL_SCALE, VolError::MathError);

        let scaled = (value * 10f64.powi(scale as i32)).round();
        // i128 bounds are exact powers of two, so the f64 comparison is lossless
        require!(
            scaled >= i128::MIN as f64 && scaled < i128::MAX as f64,
            VolError::MathError
        );

        Ok(Self {
            mantissa: scaled as i128,
            scale,
        })
    }

    /// Lossy conversion used by the log-return and sqrt steps.
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 / 10f64.powi(self.scale as i32)
    }

    /// Numeric comparison across scales. Derived `PartialEq` is structural,
    /// so `0.10` and `0.1` are only equal under this ordering.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.mantissa.cmp(&other.mantissa),
            Ordering::Less => match self.rescale_up(other.scale) {
                Some(aligned) => aligned.mantissa.cmp(&other.mantissa),
                // |self| overflowed past any i128 mantissa, so its sign decides
                None => self.mantissa.signum().cmp(&0),
            },
            Ordering::Greater => other.cmp_value(self).reverse(),
        }
    }

    /// Re-expresses the value at a larger scale without loss.
    pub fn rescale_up(&self, scale: u32) -> Option<Self> {
        let diff = scale.checked_sub(self.scale)?;
        if self.mantissa == 0 {
            return Some(Self { mantissa: 0, scale });
        }
        let factor = 10i128.checked_pow(diff)?;
        Some(Self {
            mantissa: self.mantissa.checked_mul(factor)?,
            scale,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }

        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int, frac)
        } else {
            write!(f, "{}0.{:0>width$}", sign, digits, width = scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_aligns_scales() {
        let a = Decimal::new(5, 2); // 0.05
        let b = Decimal::new(1, 2); // 0.01
        let c = Decimal::new(10, 3); // 0.010

        assert_eq!(a.cmp_value(&b), Ordering::Greater);
        assert_eq!(b.cmp_value(&c), Ordering::Equal);
        assert_ne!(b, c);
        assert_eq!(
            Decimal::new(-1, 0).cmp_value(&Decimal::new(1, 28)),
            Ordering::Less
        );
    }

    #[test]
    fn ordering_survives_scale_overflow() {
        let huge = Decimal::new(i128::MAX, 0);
        let tiny = Decimal::new(1, MAX_DECIMAL_SCALE);
        assert_eq!(huge.cmp_value(&tiny), Ordering::Greater);
        assert_eq!(tiny.cmp_value(&huge), Ordering::Less);
        assert_eq!(
            Decimal::new(-i128::MAX, 0).cmp_value(&tiny),
            Ordering::Less
        );
    }

    #[test]
    fn from_f64_rounds_half_away_from_zero() {
        assert_eq!(Decimal::from_f64(0.125, 2).unwrap(), Decimal::new(13, 2));
        assert_eq!(Decimal::from_f64(-0.125, 2).unwrap(), Decimal::new(-13, 2));
        assert_eq!(Decimal::from_f64(0.0, 12).unwrap(), Decimal::new(0, 12));
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Decimal::from_f64(f64::NAN, 6).is_err());
        assert!(Decimal::from_f64(f64::INFINITY, 6).is_err());
        assert!(Decimal::from_f64(1e30, MAX_DECIMAL_SCALE).is_err());
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(Decimal::new(12345, 2).to_string(), "123.45");
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(42, 0).to_string(), "42");
    }

    #[test]
    fn to_f64_matches_value() {
        assert!((Decimal::new(10525, 2).to_f64() - 105.25).abs() < 1e-12);
    }
}
