//! # Verifier
//!
//! Substitutes each root back into `a·x² + b·x + c` and checks that the
//! result is zero: exactly in the exact domain, within
//! `ε·max(1, |a·r²|, |b·r|, |c|)` in the float domain.

use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::{Complex, Scalar};
use crate::equation::Equation;
use crate::errors::SolveError;
use crate::format::{paren, wrapped};

/// Outcome of substituting one root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The root that was substituted
    pub root: String,
    /// `a(r)^2 + (b)(r) + c` before any simplification
    pub substitution: String,
    /// The three evaluated terms, not yet added
    pub partial: String,
    /// Final value of the left-hand side
    pub value: String,
    pub passed: bool,
}

fn term<T: Scalar>(value: &Complex<T>) -> String {
    if value.is_real() {
        wrapped(&value.re)
    } else {
        paren(value)
    }
}

/// Substitute a single root.
pub fn verify_root<T: Scalar>(equation: &Equation<T>, root: &Complex<T>, epsilon: f64) -> VerificationResult {
    let root_text = root.to_string();
    let substitution = format!(
        "{}({})^2 + {}({}) + {}",
        wrapped(&equation.a),
        root_text,
        paren(&equation.b),
        root_text,
        wrapped(&equation.c)
    );

    let terms = equation.terms_at(root);
    let partial = format!("{} + {} + {}", terms[0], term(&terms[1]), term(&terms[2]));
    let scale = terms
        .iter()
        .map(Complex::modulus_f64)
        .fold(1.0_f64, f64::max);
    let [quadratic, linear, constant] = terms;
    let value = quadratic + linear + constant;

    VerificationResult {
        root: root_text,
        substitution,
        partial,
        value: value.to_string(),
        passed: value.is_negligible(epsilon * scale),
    }
}

/// Verify every root, returning the results and an issue per failure.
pub fn verify_roots<T: Scalar>(
    equation: &Equation<T>,
    roots: &[Complex<T>],
    epsilon: f64,
) -> (Vec<VerificationResult>, Vec<SolveError>) {
    let results: Vec<VerificationResult> = roots
        .iter()
        .map(|root| verify_root(equation, root, epsilon))
        .collect();

    let issues = results
        .iter()
        .filter(|result| !result.passed)
        .map(|result| {
            error!(
                "verification failed for x = {} in {}: residual {}",
                result.root, equation, result.value
            );
            SolveError::verification_mismatch(result.root.clone(), result.value.clone())
        })
        .collect();

    (results, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Float, Surd};

    fn surd_eq(a: &str, b: &str, c: &str) -> Equation<Surd> {
        Equation::parse(a, b, c).unwrap()
    }

    #[test]
    fn test_integer_root() {
        let result = verify_root(&surd_eq("1", "-5", "6"), &Complex::real(Surd::from_integer(3)), 1e-9);
        assert_eq!(result.substitution, "1(3)^2 + (-5)(3) + 6");
        assert_eq!(result.partial, "9 + (-15) + 6");
        assert_eq!(result.value, "0");
        assert!(result.passed);
    }

    #[test]
    fn test_complex_root() {
        let root = Complex::new(Surd::from_integer(-1), Surd::from_integer(2));
        let result = verify_root(&surd_eq("1", "2", "5"), &root, 1e-9);
        assert_eq!(result.substitution, "1(-1 + 2i)^2 + (2)(-1 + 2i) + 5");
        assert_eq!(result.partial, "-3 - 4i + (-2 + 4i) + 5");
        assert!(result.passed);
    }

    #[test]
    fn test_radical_root() {
        let root = Complex::real(Surd::normalize("-5sqrt2/2").unwrap());
        let result = verify_root(&surd_eq("sqrt2", "7", "5sqrt2"), &root, 1e-9);
        assert!(result.passed);
    }

    #[test]
    fn test_wrong_root_is_reported() {
        let equation = surd_eq("1", "-5", "6");
        let roots = [Complex::real(Surd::from_integer(2)), Complex::real(Surd::from_integer(1))];
        let (results, issues) = verify_roots(&equation, &roots, 1e-9);
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert_eq!(issues, vec![SolveError::verification_mismatch("1", "2")]);
    }

    #[test]
    fn test_float_tolerance() {
        let equation = Equation::new(Float(1.0), Float(-0.2), Float(0.01)).unwrap();
        let result = verify_root(&equation, &Complex::real(Float(0.1)), 1e-9);
        assert!(result.passed);
        let result = verify_root(&equation, &Complex::real(Float(0.2)), 1e-9);
        assert!(!result.passed);
    }
}
