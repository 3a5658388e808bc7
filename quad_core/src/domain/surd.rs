//! # Exact Surd Arithmetic
//!
//! A [`Surd`] is a finite sum `q₁·√s₁ + q₂·√s₂ + …` with rational `qᵢ` and
//! distinct square-free radicands `sᵢ` (radicand 1 holds the rational part).
//! Values are always kept in this canonical form, so structural equality is
//! value equality.
//!
//! The set is a field: products recombine radicands through their gcd, and
//! division rationalizes the denominator by multiplying with conjugates one
//! radical at a time. Signs are decided exactly by the same conjugate split,
//! never by a floating-point guess.
//!
//! Square roots are exact for rationals (`√(8/3) = 2·√6/3`) and for nested
//! forms that denest (`√(3 + 2·√2) = 1 + √2`). Anything else is reported as
//! unrepresentable.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{Scalar, Sign};
use crate::errors::{SolveError, SolveResult};
use crate::settings::DomainKind;

/// Exact algebraic number built from rationals and square roots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Surd {
    /// Radicand -> coefficient. Coefficients are never zero.
    terms: BTreeMap<BigUint, BigRational>,
}

impl Surd {
    /// A rational value
    pub fn from_rational(value: BigRational) -> Self {
        let mut surd = Surd::default();
        surd.insert_term(BigUint::one(), value);
        surd
    }

    /// `numer / denom` as an exact value, `None` when `denom` is zero
    pub fn from_ratio(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Surd::from_rational(BigRational::new(BigInt::from(numer), BigInt::from(denom))))
    }

    /// `coefficient · √radicand` for a square-free radicand
    fn radical(coefficient: BigRational, radicand: BigUint) -> Self {
        let mut surd = Surd::default();
        surd.insert_term(radicand, coefficient);
        surd
    }

    /// The rational value, if there are no radicals
    pub fn as_rational(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&BigUint::one()).cloned(),
            _ => None,
        }
    }

    /// Bit length of the largest numerator, denominator or radicand
    pub(crate) fn bit_size(&self) -> u64 {
        self.terms
            .iter()
            .map(|(radicand, coefficient)| {
                radicand
                    .bits()
                    .max(coefficient.numer().bits())
                    .max(coefficient.denom().bits())
            })
            .max()
            .unwrap_or(0)
    }

    fn insert_term(&mut self, radicand: BigUint, coefficient: BigRational) {
        if coefficient.is_zero() {
            return;
        }
        let entry = self.terms.entry(radicand.clone()).or_insert_with(BigRational::zero);
        *entry += coefficient;
        if entry.is_zero() {
            self.terms.remove(&radicand);
        }
    }

    fn scale(&self, factor: &BigRational) -> Self {
        let mut out = Surd::default();
        for (radicand, coefficient) in &self.terms {
            out.insert_term(radicand.clone(), coefficient * factor);
        }
        out
    }

    /// A radicand `g > 1` such that every radicand of `self` is either a
    /// multiple of `g` or coprime to it.
    ///
    /// Flipping the sign of `√g` is then a field automorphism, which is what
    /// the conjugate-based inverse, sign and square root rely on.
    fn generator(&self) -> Option<BigUint> {
        let mut g = self.terms.keys().find(|k| !k.is_one())?.clone();
        'refine: loop {
            for radicand in self.terms.keys() {
                let common = g.gcd(radicand);
                if !common.is_one() && common != g {
                    g = common;
                    continue 'refine;
                }
            }
            return Some(g);
        }
    }

    /// Split `self` as `u + v·√g` where neither `u` nor `v` involves `√g`.
    fn split_on(&self, g: &BigUint) -> (Surd, Surd) {
        let mut rest = Surd::default();
        let mut along = Surd::default();
        for (radicand, coefficient) in &self.terms {
            if (radicand % g).is_zero() {
                along.insert_term(radicand / g, coefficient.clone());
            } else {
                rest.insert_term(radicand.clone(), coefficient.clone());
            }
        }
        (rest, along)
    }

    /// `u² - g·v²` for the split `u + v·√g`
    fn norm_on(rest: &Surd, along: &Surd, g: &BigUint) -> Surd {
        let g_value = BigRational::from_integer(BigInt::from(g.clone()));
        rest.clone() * rest.clone() - (along.clone() * along.clone()).scale(&g_value)
    }

    /// Multiplicative inverse, `None` for zero
    pub fn inverse(&self) -> Option<Surd> {
        if let Some(q) = self.as_rational() {
            if q.is_zero() {
                return None;
            }
            return Some(Surd::from_rational(q.recip()));
        }
        let g = self.generator()?;
        let (rest, along) = self.split_on(&g);
        let conjugate = rest.clone() - along.clone() * Surd::radical(BigRational::one(), g.clone());
        let norm = Surd::norm_on(&rest, &along, &g);
        Some(conjugate * norm.inverse()?)
    }

    /// Integer power; negative exponents invert first
    pub fn pow_int(&self, exponent: i64) -> Option<Surd> {
        let mut square = if exponent < 0 { self.inverse()? } else { self.clone() };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Surd::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result * square.clone();
            }
            remaining >>= 1;
            if remaining > 0 {
                square = square.clone() * square;
            }
        }
        Some(result)
    }

    fn sqrt_rational(value: &BigRational) -> Option<Surd> {
        // √(n/d) = √(n·d) / d
        let product = (value.numer() * value.denom()).to_biguint()?;
        let (outside, inside) = square_part(product.to_u64()?);
        let coefficient = BigRational::new(BigInt::from(outside), value.denom().clone());
        Some(Surd::radical(coefficient, BigUint::from(inside)))
    }

    /// √(u + v·√g) = √((u + w)/2) ± √((u - w)/2) with w = √(u² - g·v²)
    fn denest(&self) -> Option<Surd> {
        let g = self.generator()?;
        let (rest, along) = self.split_on(&g);
        let w = Surd::norm_on(&rest, &along, &g).sqrt().ok()?;
        let half = BigRational::new(BigInt::one(), BigInt::from(2));
        let high = (rest.clone() + w.clone()).scale(&half).sqrt().ok()?;
        let low = (rest - w).scale(&half).sqrt().ok()?;
        let candidate = if along.sign() == Sign::Negative {
            high - low
        } else {
            high + low
        };
        if candidate.clone() * candidate.clone() == *self {
            Some(candidate)
        } else {
            None
        }
    }
}

/// Split `n` into `(outside, inside)` with `n = outside² · inside` and
/// `inside` square-free.
///
/// Trial division runs only up to the cube root: what remains afterwards is
/// 1, a prime, a product of two primes, or a prime square.
fn square_part(mut n: u64) -> (u64, u64) {
    if n == 0 {
        return (0, 1);
    }
    let mut outside = 1u64;
    let mut inside = 1u64;
    let mut p = 2u64;
    while u128::from(p).pow(3) <= u128::from(n) {
        if n % p == 0 {
            let mut exponent = 0u32;
            while n % p == 0 {
                n /= p;
                exponent += 1;
            }
            outside *= p.pow(exponent / 2);
            if exponent % 2 == 1 {
                inside *= p;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }
    let root = Roots::sqrt(&n);
    if root * root == n {
        outside *= root;
    } else {
        inside *= n;
    }
    (outside, inside)
}

fn rational_sign(value: &BigRational) -> Sign {
    if value.is_positive() {
        Sign::Positive
    } else if value.is_negative() {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

fn rational_to_f64(value: &BigRational) -> f64 {
    let numer = value.numer().to_f64().unwrap_or(f64::NAN);
    let denom = value.denom().to_f64().unwrap_or(f64::NAN);
    numer / denom
}

impl Scalar for Surd {
    const KIND: DomainKind = DomainKind::Exact;
    const EXACT: bool = true;

    fn zero() -> Self {
        Surd::default()
    }

    fn one() -> Self {
        Surd::from_integer(1)
    }

    fn from_integer(n: i64) -> Self {
        Surd::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    fn checked_div(&self, other: &Self) -> Option<Self> {
        Some(self.clone() * other.inverse()?)
    }

    fn sign(&self) -> Sign {
        if let Some(q) = self.as_rational() {
            return rational_sign(&q);
        }
        let Some(g) = self.generator() else {
            return Sign::Zero;
        };
        let (rest, along) = self.split_on(&g);
        let rest_sign = rest.sign();
        let along_sign = along.sign();
        if rest_sign == Sign::Zero || rest_sign == along_sign {
            return if rest_sign == Sign::Zero { along_sign } else { rest_sign };
        }
        // Opposite signs: the larger of u² and g·v² wins
        match Surd::norm_on(&rest, &along, &g).sign() {
            Sign::Positive => rest_sign,
            Sign::Negative => along_sign,
            Sign::Zero => Sign::Zero,
        }
    }

    fn sqrt(&self) -> SolveResult<Self> {
        let unrepresentable = || SolveError::unrepresentable("square root", self.to_string());
        match self.sign() {
            Sign::Zero => return Ok(Surd::zero()),
            Sign::Negative => return Err(unrepresentable()),
            Sign::Positive => {}
        }
        let root = match self.as_rational() {
            Some(q) => Surd::sqrt_rational(&q),
            None => self.denest(),
        };
        root.ok_or_else(unrepresentable)
    }

    fn to_integer(&self) -> Option<i64> {
        let q = self.as_rational()?;
        if q.is_integer() {
            q.numer().to_i64()
        } else {
            None
        }
    }

    fn to_f64(&self) -> f64 {
        self.terms
            .iter()
            .map(|(radicand, coefficient)| {
                rational_to_f64(coefficient) * radicand.to_f64().unwrap_or(f64::NAN).sqrt()
            })
            .sum()
    }

    fn is_rational(&self) -> bool {
        self.as_rational().is_some()
    }

    fn is_atomic(&self) -> bool {
        self.terms.len() <= 1
    }

    fn normalize(raw: &str) -> SolveResult<Self> {
        crate::normalize::normalize_exact(raw)
    }

    fn is_negligible(&self, _tolerance: f64) -> bool {
        self.terms.is_empty()
    }
}

impl Add for Surd {
    type Output = Surd;

    fn add(mut self, rhs: Surd) -> Surd {
        for (radicand, coefficient) in rhs.terms {
            self.insert_term(radicand, coefficient);
        }
        self
    }
}

impl Sub for Surd {
    type Output = Surd;

    fn sub(self, rhs: Surd) -> Surd {
        self + (-rhs)
    }
}

impl Neg for Surd {
    type Output = Surd;

    fn neg(self) -> Surd {
        Surd {
            terms: self.terms.into_iter().map(|(k, q)| (k, -q)).collect(),
        }
    }
}

impl Mul for Surd {
    type Output = Surd;

    fn mul(self, rhs: Surd) -> Surd {
        let mut out = Surd::default();
        for (s, p) in &self.terms {
            for (t, q) in &rhs.terms {
                // √s·√t = g·√((s/g)(t/g)), and (s/g)(t/g) stays square-free
                let g = s.gcd(t);
                let radicand = (s / &g) * (t / &g);
                let coefficient = p * q * BigRational::from_integer(BigInt::from(g));
                out.insert_term(radicand, coefficient);
            }
        }
        out
    }
}

impl From<i64> for Surd {
    fn from(n: i64) -> Self {
        Surd::from_integer(n)
    }
}

impl From<BigRational> for Surd {
    fn from(value: BigRational) -> Self {
        Surd::from_rational(value)
    }
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (radicand, coefficient)) in self.terms.iter().enumerate() {
            let text = term_text(radicand, &coefficient.abs());
            match (i, coefficient.is_negative()) {
                (0, true) => write!(f, "-{}", text)?,
                (0, false) => write!(f, "{}", text)?,
                (_, true) => write!(f, " - {}", text)?,
                (_, false) => write!(f, " + {}", text)?,
            }
        }
        Ok(())
    }
}

fn term_text(radicand: &BigUint, magnitude: &BigRational) -> String {
    let numer = magnitude.numer();
    let denom = magnitude.denom();
    if radicand.is_one() {
        return if denom.is_one() {
            numer.to_string()
        } else {
            format!("{}/{}", numer, denom)
        };
    }
    let root = format!("sqrt({})", radicand);
    let top = if numer.is_one() { root } else { format!("{}*{}", numer, root) };
    if denom.is_one() {
        top
    } else {
        format!("{}/{}", top, denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_of(n: i64) -> Surd {
        Surd::from_integer(n).sqrt().unwrap()
    }

    #[test]
    fn test_square_part() {
        assert_eq!(square_part(12), (2, 3));
        assert_eq!(square_part(49), (7, 1));
        assert_eq!(square_part(1), (1, 1));
        assert_eq!(square_part(2 * 3 * 5 * 5), (5, 6));
        // Large prime square survives the cube-root cutoff
        assert_eq!(square_part(1_000_003 * 1_000_003), (1_000_003, 1));
    }

    #[test]
    fn test_sqrt_of_rationals() {
        assert_eq!(sqrt_of(16), Surd::from_integer(4));
        assert_eq!(sqrt_of(8).to_string(), "2*sqrt(2)");
        let three_quarters = Surd::from_ratio(3, 4).unwrap().sqrt().unwrap();
        assert_eq!(three_quarters.to_string(), "sqrt(3)/2");
        let two_thirds = Surd::from_ratio(2, 3).unwrap().sqrt().unwrap();
        assert_eq!(two_thirds.to_string(), "sqrt(6)/3");
    }

    #[test]
    fn test_sqrt_of_negative_is_unrepresentable() {
        let err = Surd::from_integer(-4).sqrt().unwrap_err();
        assert_eq!(err.error_code(), "UNREPRESENTABLE");
    }

    #[test]
    fn test_products_recombine_radicands() {
        assert_eq!(sqrt_of(2) * sqrt_of(2), Surd::from_integer(2));
        assert_eq!(sqrt_of(2) * sqrt_of(3), sqrt_of(6));
        assert_eq!(sqrt_of(6) * sqrt_of(10), Surd::from_integer(2) * sqrt_of(15));
    }

    #[test]
    fn test_inverse_rationalizes() {
        let x = Surd::one() + sqrt_of(2);
        let inv = x.inverse().unwrap();
        assert_eq!(inv.to_string(), "-1 + sqrt(2)");
        assert_eq!(x * inv, Surd::one());

        let y = sqrt_of(2) + sqrt_of(3) + Surd::one();
        let inv_y = y.inverse().unwrap();
        assert_eq!(y * inv_y, Surd::one());

        assert!(Surd::zero().inverse().is_none());
    }

    #[test]
    fn test_exact_sign() {
        // 3 - 2√2 ≈ 0.17
        let small = Surd::from_integer(3) - Surd::from_integer(2) * sqrt_of(2);
        assert_eq!(small.sign(), Sign::Positive);
        // √2 + √3 - √10 ≈ -0.02
        let tight = sqrt_of(2) + sqrt_of(3) - sqrt_of(10);
        assert_eq!(tight.sign(), Sign::Negative);
        assert_eq!(Surd::zero().sign(), Sign::Zero);
    }

    #[test]
    fn test_denesting() {
        let nested = Surd::from_integer(3) + Surd::from_integer(2) * sqrt_of(2);
        assert_eq!(nested.sqrt().unwrap().to_string(), "1 + sqrt(2)");

        let nested = Surd::from_integer(5) - Surd::from_integer(2) * sqrt_of(6);
        assert_eq!(nested.sqrt().unwrap().to_string(), "-sqrt(2) + sqrt(3)");

        let stubborn = Surd::one() + sqrt_of(2);
        assert!(stubborn.sqrt().is_err());
    }

    #[test]
    fn test_pow_int() {
        let root = sqrt_of(2);
        assert_eq!(root.pow_int(2).unwrap(), Surd::from_integer(2));
        assert_eq!(root.pow_int(-2).unwrap(), Surd::from_ratio(1, 2).unwrap());
        assert_eq!(root.pow_int(0).unwrap(), Surd::one());
        assert!(Surd::zero().pow_int(-1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Surd::zero().to_string(), "0");
        assert_eq!(Surd::from_ratio(-1, 2).unwrap().to_string(), "-1/2");
        let value = Surd::from_ratio(-5, 2).unwrap() * sqrt_of(2);
        assert_eq!(value.to_string(), "-5*sqrt(2)/2");
        let mixed = Surd::from_integer(1) - sqrt_of(2);
        assert_eq!(mixed.to_string(), "1 - sqrt(2)");
    }

    #[test]
    fn test_integer_view_and_approximation() {
        assert_eq!(Surd::from_integer(-7).to_integer(), Some(-7));
        assert_eq!(Surd::from_ratio(7, 2).unwrap().to_integer(), None);
        assert!(Surd::from_ratio(1, 0).is_none());
        assert_eq!(sqrt_of(2).to_integer(), None);
        assert!((sqrt_of(2).to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_bit_size() {
        assert_eq!(Surd::zero().bit_size(), 0);
        assert_eq!(Surd::from_integer(255).bit_size(), 8);
        assert_eq!(Surd::from_ratio(1, 1024).unwrap().bit_size(), 11);
        assert_eq!((Surd::one() + sqrt_of(7)).bit_size(), 3);
    }
}
