//! # Numeric Domains
//!
//! Coefficients, discriminants and roots all live in a *numeric domain*. The
//! pipeline is written once against the [`Scalar`] trait and runs in either
//! of two implementations:
//!
//! - [`Surd`] - exact algebraic numbers: rational combinations of square
//!   roots of square-free integers (`3 - 2*sqrt(2)`, `5*sqrt(6)/3`)
//! - [`Float`] - IEEE-754 doubles with tolerance-based comparisons
//!
//! Complex roots are carried as a [`Complex`] pair of domain values.
//!
//! ## Example
//!
//! ```rust
//! use quad_core::domain::{Scalar, Surd};
//!
//! let two = Surd::normalize("2").unwrap();
//! let root = two.sqrt().unwrap();
//! assert_eq!(root.to_string(), "sqrt(2)");
//! assert_eq!(root.clone() * root, two);
//! ```

pub mod complex;
pub mod float;
pub mod surd;

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::SolveResult;
use crate::settings::DomainKind;

pub use complex::Complex;
pub use float::Float;
pub use surd::Surd;

/// Sign of a domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Sign of an `f64`, treating NaN as zero
    pub fn of_f64(value: f64) -> Sign {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// A value type the solver pipeline can compute with.
///
/// Implementations must keep values in a canonical form so that `==` is
/// value equality in exact domains. Inexact domains override
/// [`Scalar::is_negligible`] to compare against a tolerance.
pub trait Scalar:
    Clone
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Which domain this is (reported back to the caller)
    const KIND: DomainKind;

    /// Whether comparisons in this domain are exact
    const EXACT: bool;

    fn zero() -> Self;

    fn one() -> Self;

    fn from_integer(n: i64) -> Self;

    /// Division, `None` when dividing by zero
    fn checked_div(&self, other: &Self) -> Option<Self>;

    /// Sign of the value (exact in exact domains)
    fn sign(&self) -> Sign;

    /// Principal square root of a non-negative value.
    ///
    /// Fails with `Unrepresentable` when the result has no representation in
    /// the domain, or when the value is negative.
    fn sqrt(&self) -> SolveResult<Self>;

    /// The value as an integer, if it is one
    fn to_integer(&self) -> Option<i64>;

    /// Floating-point approximation
    fn to_f64(&self) -> f64;

    /// Whether the value contains no radicals
    fn is_rational(&self) -> bool;

    /// Whether the value renders as a single signed term (no inner `+`/`-`)
    fn is_atomic(&self) -> bool;

    /// Parse coefficient text into a value of this domain
    fn normalize(raw: &str) -> SolveResult<Self>;

    /// Whether the value should be treated as zero.
    ///
    /// `tolerance` is an absolute bound; exact domains ignore it.
    fn is_negligible(&self, tolerance: f64) -> bool;

    fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Value equality under the domain's comparison rules
    fn same_value(&self, other: &Self, tolerance: f64) -> bool {
        (self.clone() - other.clone()).is_negligible(tolerance)
    }

    fn abs(&self) -> Self {
        if self.sign() == Sign::Negative {
            -self.clone()
        } else {
            self.clone()
        }
    }
}
