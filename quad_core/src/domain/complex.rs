//! Complex values over a real domain, used for roots when the discriminant
//! is negative.

use std::fmt;
use std::ops::{Add, Mul};

use super::{Scalar, Sign};

/// `re + im·i` with both parts in the same domain
#[derive(Debug, Clone, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T: Scalar> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Complex { re, im }
    }

    /// A real value (zero imaginary part)
    pub fn real(re: T) -> Self {
        Complex { re, im: T::zero() }
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Multiply both parts by a real factor
    pub fn scale(&self, factor: &T) -> Self {
        Complex::new(self.re.clone() * factor.clone(), self.im.clone() * factor.clone())
    }

    pub fn square(&self) -> Self {
        self.clone() * self.clone()
    }

    /// Equality of both parts under the domain's comparison rules
    pub fn same_value(&self, other: &Self, tolerance: f64) -> bool {
        self.re.same_value(&other.re, tolerance) && self.im.same_value(&other.im, tolerance)
    }

    pub fn is_negligible(&self, tolerance: f64) -> bool {
        self.re.is_negligible(tolerance) && self.im.is_negligible(tolerance)
    }

    /// `|z|` as a float, for tolerance scaling and reporting
    pub fn modulus_f64(&self) -> f64 {
        self.re.to_f64().hypot(self.im.to_f64())
    }
}

impl<T: Scalar> Add for Complex<T> {
    type Output = Complex<T>;

    fn add(self, rhs: Complex<T>) -> Complex<T> {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Scalar> Mul for Complex<T> {
    type Output = Complex<T>;

    fn mul(self, rhs: Complex<T>) -> Complex<T> {
        let re = self.re.clone() * rhs.re.clone() - self.im.clone() * rhs.im.clone();
        let im = self.re * rhs.im + self.im * rhs.re;
        Complex::new(re, im)
    }
}

/// `i`, `2i`, `(sqrt(2)/2)i`, `(1 + sqrt(3))i`
fn imaginary_text<T: Scalar>(magnitude: &T) -> String {
    let text = magnitude.to_string();
    if *magnitude == T::one() {
        "i".to_string()
    } else if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        format!("{}i", text)
    } else {
        format!("({})i", text)
    }
}

impl<T: Scalar> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            return write!(f, "{}", self.re);
        }
        let (negative, magnitude) = if self.im.is_atomic() && self.im.sign() == Sign::Negative {
            (true, -self.im.clone())
        } else {
            (false, self.im.clone())
        };
        let imaginary = imaginary_text(&magnitude);
        match (self.re.is_zero(), negative) {
            (true, true) => write!(f, "-{}", imaginary),
            (true, false) => write!(f, "{}", imaginary),
            (false, true) => write!(f, "{} - {}", self.re, imaginary),
            (false, false) => write!(f, "{} + {}", self.re, imaginary),
        }
    }
}
