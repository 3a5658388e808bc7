//! The quadratic `a·x² + b·x + c = 0` over a numeric domain.

use std::fmt;

use crate::domain::{Complex, Scalar};
use crate::errors::{SolveError, SolveResult};
use crate::format::{signed_sum, wrapped};

/// Three coefficients with `a ≠ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T: Scalar> Equation<T> {
    /// Build an equation, rejecting a zero leading coefficient.
    pub fn new(a: T, b: T, c: T) -> SolveResult<Self> {
        if a.is_zero() {
            return Err(SolveError::degenerate(a.to_string()));
        }
        Ok(Equation { a, b, c })
    }

    /// Normalize three coefficient strings in this domain.
    pub fn parse(a: &str, b: &str, c: &str) -> SolveResult<Self> {
        let a = T::normalize(a).map_err(|e| e.in_field("a"))?;
        let b = T::normalize(b).map_err(|e| e.in_field("b"))?;
        let c = T::normalize(c).map_err(|e| e.in_field("c"))?;
        Equation::new(a, b, c)
    }

    /// `a·c`, the product target of the split
    pub fn product(&self) -> T {
        self.a.clone() * self.c.clone()
    }

    /// `b² − 4ac`
    pub fn discriminant(&self) -> T {
        self.b.clone() * self.b.clone() - T::from_integer(4) * self.product()
    }

    /// Whether all three coefficients are integers
    pub fn integer_coefficients(&self) -> Option<(i64, i64, i64)> {
        Some((self.a.to_integer()?, self.b.to_integer()?, self.c.to_integer()?))
    }

    /// Left-hand side, e.g. `x^2 - 5x + 6`
    pub fn lhs(&self) -> String {
        signed_sum(&[
            (self.a.clone(), "x^2"),
            (self.b.clone(), "x"),
            (self.c.clone(), ""),
        ])
    }

    /// The equation with each coefficient written out, e.g.
    /// `1x^2 + (-5)x + 6 = 0`
    pub fn literal(&self) -> String {
        format!(
            "{}x^2 + {}x + {} = 0",
            wrapped(&self.a),
            wrapped(&self.b),
            wrapped(&self.c)
        )
    }

    /// The three terms `a·x²`, `b·x` and `c` evaluated at `x`
    pub fn terms_at(&self, x: &Complex<T>) -> [Complex<T>; 3] {
        [
            x.square().scale(&self.a),
            x.scale(&self.b),
            Complex::real(self.c.clone()),
        ]
    }

    /// `a·x² + b·x + c` at `x`
    pub fn evaluate(&self, x: &Complex<T>) -> Complex<T> {
        let [quadratic, linear, constant] = self.terms_at(x);
        quadratic + linear + constant
    }
}

impl<T: Scalar> fmt::Display for Equation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = 0", self.lhs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Float, Surd};

    fn eq(a: &str, b: &str, c: &str) -> Equation<Surd> {
        Equation::parse(a, b, c).unwrap()
    }

    #[test]
    fn test_degenerate() {
        let err = Equation::<Surd>::parse("0", "2", "1").unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_EQUATION");
        let err = Equation::<Float>::parse("0.0", "2", "1").unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_EQUATION");
    }

    #[test]
    fn test_field_labels() {
        let err = Equation::<Surd>::parse("1", "2x", "1").unwrap_err();
        assert!(matches!(err, SolveError::InvalidSyntax { ref field, .. } if field == "b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(eq("1", "-5", "6").to_string(), "x^2 - 5x + 6 = 0");
        assert_eq!(eq("2", "0", "-8").to_string(), "2x^2 - 8 = 0");
        assert_eq!(eq("sqrt2", "7", "5sqrt2").to_string(), "sqrt(2)x^2 + 7x + 5*sqrt(2) = 0");
        assert_eq!(eq("1", "-5", "6").literal(), "1x^2 + (-5)x + 6 = 0");
    }

    #[test]
    fn test_discriminant() {
        assert_eq!(eq("1", "-5", "6").discriminant(), Surd::from_integer(1));
        assert_eq!(eq("1", "2", "5").discriminant(), Surd::from_integer(-16));
        assert_eq!(eq("sqrt2", "7", "5sqrt2").discriminant(), Surd::from_integer(9));
    }

    #[test]
    fn test_evaluate() {
        let equation = eq("1", "-5", "6");
        let root = Complex::real(Surd::from_integer(2));
        assert!(equation.evaluate(&root).is_negligible(0.0));
        let off = Complex::real(Surd::from_integer(1));
        assert_eq!(equation.evaluate(&off), Complex::real(Surd::from_integer(2)));
    }

    #[test]
    fn test_integer_coefficients() {
        assert_eq!(eq("2", "7", "3").integer_coefficients(), Some((2, 7, 3)));
        assert_eq!(eq("1/2", "7", "3").integer_coefficients(), None);
    }
}
