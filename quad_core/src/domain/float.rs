//! # Floating-Point Domain
//!
//! IEEE-754 double precision values. Coefficients are read as plain numeric
//! literals (no algebraic parsing), and comparisons go through an explicit
//! tolerance instead of exact equality.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{Scalar, Sign};
use crate::errors::{SolveError, SolveResult};
use crate::settings::DomainKind;

/// Largest magnitude at which every integer is exactly representable
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Floating-point domain value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Float(pub f64);

impl Scalar for Float {
    const KIND: DomainKind = DomainKind::Float;
    const EXACT: bool = false;

    fn zero() -> Self {
        Float(0.0)
    }

    fn one() -> Self {
        Float(1.0)
    }

    fn from_integer(n: i64) -> Self {
        Float(n as f64)
    }

    fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.0 == 0.0 {
            None
        } else {
            Some(Float(self.0 / other.0))
        }
    }

    fn sign(&self) -> Sign {
        Sign::of_f64(self.0)
    }

    fn sqrt(&self) -> SolveResult<Self> {
        if self.0 < 0.0 || !self.0.is_finite() {
            return Err(SolveError::unrepresentable("square root", self.to_string()));
        }
        Ok(Float(self.0.sqrt()))
    }

    fn to_integer(&self) -> Option<i64> {
        if self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            Some(self.0 as i64)
        } else {
            None
        }
    }

    fn to_f64(&self) -> f64 {
        self.0
    }

    fn is_rational(&self) -> bool {
        true
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn normalize(raw: &str) -> SolveResult<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(Float(0.0));
        }
        let value: f64 = text
            .parse()
            .map_err(|_| SolveError::invalid_syntax("coefficient", raw, "expected a decimal number"))?;
        if !value.is_finite() {
            return Err(SolveError::invalid_syntax("coefficient", raw, "value must be finite"));
        }
        Ok(Float(value))
    }

    fn is_negligible(&self, tolerance: f64) -> bool {
        self.0.abs() <= tolerance
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Float(value)
    }
}

impl Add for Float {
    type Output = Float;

    fn add(self, rhs: Float) -> Float {
        Float(self.0 + rhs.0)
    }
}

impl Sub for Float {
    type Output = Float;

    fn sub(self, rhs: Float) -> Float {
        Float(self.0 - rhs.0)
    }
}

impl Mul for Float {
    type Output = Float;

    fn mul(self, rhs: Float) -> Float {
        Float(self.0 * rhs.0)
    }
}

impl Neg for Float {
    type Output = Float;

    fn neg(self) -> Float {
        Float(-self.0)
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shortest representation that parses back to the same double; no "-0"
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_literals() {
        assert_eq!(Float::normalize("2.5").unwrap(), Float(2.5));
        assert_eq!(Float::normalize("  -3 ").unwrap(), Float(-3.0));
        assert_eq!(Float::normalize("").unwrap(), Float(0.0));
        assert!(Float::normalize("sqrt(2)").is_err());
        assert!(Float::normalize("inf").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for value in [0.1, -2.0, 1.0 / 3.0, 1e-7, 12345.678] {
            let text = Float(value).to_string();
            assert_eq!(Float::normalize(&text).unwrap(), Float(value));
        }
        assert_eq!(Float(-0.0).to_string(), "0");
        assert_eq!(Float(2.0).to_string(), "2");
    }

    #[test]
    fn test_integer_view() {
        assert_eq!(Float(6.0).to_integer(), Some(6));
        assert_eq!(Float(6.5).to_integer(), None);
        assert_eq!(Float(f64::NAN).to_integer(), None);
    }

    #[test]
    fn test_tolerant_comparison() {
        let a = Float(0.1) + Float(0.2);
        assert_ne!(a, Float(0.3));
        assert!(a.same_value(&Float(0.3), 1e-12));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(Float(9.0).sqrt().unwrap(), Float(3.0));
        assert!(Float(-1.0).sqrt().is_err());
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Float(1.5)).unwrap();
        assert_eq!(json, "1.5");
    }
}
