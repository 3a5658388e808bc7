//! # Equation Analyzer
//!
//! Discriminant, root nature and the root pair of an [`Equation`].
//!
//! Roots follow the quadratic formula, `r1 = (-b + sqrt(Δ)) / (2a)` and
//! `r2 = (-b - sqrt(Δ)) / (2a)`. For `Δ < 0` they are the conjugate pair
//! `-b/(2a) ± (sqrt(-Δ)/(2a))i`.
//!
//! In the exact domain the sign of `Δ` is decided exactly. In the float
//! domain `Δ` counts as zero when `|Δ| ≤ ε·max(b², |4ac|, 1)`, and real
//! roots are computed as `s/a` and `c/s` with `s = -(b + sign(b)·sqrt(Δ))/2`
//! so the smaller root does not cancel.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{Complex, Scalar, Sign};
use crate::equation::Equation;
use crate::errors::{SolveError, SolveResult};
use crate::settings::SolverSettings;

/// How the two roots relate, decided by the sign of the discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootNature {
    TwoDistinctReal,
    RepeatedReal,
    ComplexPair,
}

impl RootNature {
    pub fn of_sign(sign: Sign) -> RootNature {
        match sign {
            Sign::Positive => RootNature::TwoDistinctReal,
            Sign::Zero => RootNature::RepeatedReal,
            Sign::Negative => RootNature::ComplexPair,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RootNature::TwoDistinctReal => "two distinct real roots",
            RootNature::RepeatedReal => "one repeated real root",
            RootNature::ComplexPair => "a pair of complex conjugate roots",
        }
    }
}

/// Result of analyzing an equation
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<T> {
    /// `b² − 4ac` (zero when the float test treats it as zero)
    pub discriminant: T,
    pub sign: Sign,
    pub nature: RootNature,
    /// `sqrt(|Δ|)`
    pub root_discriminant: T,
    /// `(r1, r2)` in formula order
    pub roots: (Complex<T>, Complex<T>),
    /// Absolute tolerance used for the zero test (0 in exact domains)
    pub tolerance: f64,
}

impl<T: Scalar> Analysis<T> {
    /// Roots without duplicates: one root when repeated
    pub fn unique_roots(&self) -> Vec<Complex<T>> {
        if self.nature == RootNature::RepeatedReal || self.roots.0.same_value(&self.roots.1, self.tolerance) {
            vec![self.roots.0.clone()]
        } else {
            vec![self.roots.0.clone(), self.roots.1.clone()]
        }
    }

    pub fn is_real(&self) -> bool {
        self.nature != RootNature::ComplexPair
    }
}

/// Absolute zero-test bound for the discriminant of `equation`
pub fn discriminant_tolerance<T: Scalar>(equation: &Equation<T>, epsilon: f64) -> f64 {
    if T::EXACT {
        return 0.0;
    }
    let b_squared = equation.b.to_f64().powi(2);
    let four_ac = (4.0 * equation.product().to_f64()).abs();
    epsilon * b_squared.max(four_ac).max(1.0)
}

fn divide<T: Scalar>(numerator: T, denominator: &T) -> SolveResult<T> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| SolveError::degenerate(denominator.to_string()))
}

/// Real roots without cancellation between `-b` and `sqrt(Δ)`.
///
/// With `s = -(b + sign(b)·sqrt(Δ))/2` the larger root is `s/a` and the
/// smaller is `c/s`; the pair comes back in formula order.
fn stable_real_roots<T: Scalar>(equation: &Equation<T>, root_disc: &T) -> SolveResult<(T, T)> {
    let two = T::from_integer(2);
    let b_negative = equation.b.sign() == Sign::Negative;
    // 2s, never zero since |b| + sqrt(Δ) > 0
    let twice_s = if b_negative {
        root_disc.clone() - equation.b.clone()
    } else {
        -(equation.b.clone() + root_disc.clone())
    };
    let large = divide(twice_s.clone(), &(two.clone() * equation.a.clone()))?;
    let small = divide(two * equation.c.clone(), &twice_s)?;
    // r1 takes +sqrt(Δ), the larger root when b < 0
    Ok(if b_negative { (large, small) } else { (small, large) })
}

/// Compute the discriminant, its sign and both roots.
///
/// # Errors
///
/// `NoRealRoots` for `Δ < 0` when complex roots are disabled, and
/// `Unrepresentable` when `sqrt(|Δ|)` has no exact form.
pub fn analyze<T: Scalar>(equation: &Equation<T>, settings: &SolverSettings) -> SolveResult<Analysis<T>> {
    let tolerance = discriminant_tolerance(equation, settings.epsilon);
    let mut discriminant = equation.discriminant();
    if discriminant.is_negligible(tolerance) {
        discriminant = T::zero();
    }
    let sign = discriminant.sign();
    let nature = RootNature::of_sign(sign);
    debug!("discriminant {} ({:?})", discriminant, nature);

    let two_a = T::from_integer(2) * equation.a.clone();
    let minus_b = -equation.b.clone();

    let (root_discriminant, roots) = match sign {
        Sign::Zero => {
            let root = Complex::real(divide(minus_b, &two_a)?);
            (T::zero(), (root.clone(), root))
        }
        Sign::Positive => {
            let root_disc = discriminant.sqrt()?;
            let (r1, r2) = if T::EXACT {
                (
                    divide(minus_b.clone() + root_disc.clone(), &two_a)?,
                    divide(minus_b - root_disc.clone(), &two_a)?,
                )
            } else {
                stable_real_roots(equation, &root_disc)?
            };
            (root_disc, (Complex::real(r1), Complex::real(r2)))
        }
        Sign::Negative => {
            if !settings.allow_complex {
                return Err(SolveError::no_real_roots(discriminant.to_string()));
            }
            let root_disc = (-discriminant.clone()).sqrt()?;
            let re = divide(minus_b, &two_a)?;
            let im = divide(root_disc.clone(), &two_a)?;
            let r1 = Complex::new(re.clone(), im.clone());
            let r2 = Complex::new(re, -im);
            (root_disc, (r1, r2))
        }
    };

    debug!("roots {} and {}", roots.0, roots.1);
    Ok(Analysis {
        discriminant,
        sign,
        nature,
        root_discriminant,
        roots,
        tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Float, Surd};

    fn exact(a: &str, b: &str, c: &str) -> Analysis<Surd> {
        analyze(&Equation::parse(a, b, c).unwrap(), &SolverSettings::default()).unwrap()
    }

    #[test]
    fn test_two_distinct_roots() {
        let analysis = exact("1", "-5", "6");
        assert_eq!(analysis.nature, RootNature::TwoDistinctReal);
        assert_eq!(analysis.roots.0.to_string(), "3");
        assert_eq!(analysis.roots.1.to_string(), "2");
        assert_eq!(analysis.unique_roots().len(), 2);
    }

    #[test]
    fn test_repeated_root() {
        let analysis = exact("1", "-4", "4");
        assert_eq!(analysis.sign, Sign::Zero);
        assert_eq!(analysis.unique_roots(), vec![Complex::real(Surd::from_integer(2))]);
    }

    #[test]
    fn test_complex_pair() {
        let analysis = exact("1", "2", "5");
        assert_eq!(analysis.discriminant, Surd::from_integer(-16));
        assert_eq!(analysis.roots.0.to_string(), "-1 + 2i");
        assert_eq!(analysis.roots.1.to_string(), "-1 - 2i");
        assert!(!analysis.is_real());
    }

    #[test]
    fn test_real_only_mode() {
        let settings = SolverSettings {
            allow_complex: false,
            ..SolverSettings::default()
        };
        let equation: Equation<Surd> = Equation::parse("1", "2", "5").unwrap();
        let err = analyze(&equation, &settings).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_ROOTS");
    }

    #[test]
    fn test_radical_coefficients() {
        let analysis = exact("sqrt2", "7", "5sqrt2");
        assert_eq!(analysis.roots.0.to_string(), "-sqrt(2)");
        assert_eq!(analysis.roots.1.to_string(), "-5*sqrt(2)/2");
    }

    #[test]
    fn test_irrational_roots() {
        let analysis = exact("1", "-2", "-1");
        assert_eq!(analysis.roots.0.to_string(), "1 + sqrt(2)");
        assert_eq!(analysis.roots.1.to_string(), "1 - sqrt(2)");
    }

    #[test]
    fn test_unrepresentable_discriminant_root() {
        let equation: Equation<Surd> = Equation::parse("1", "1", "sqrt2").unwrap();
        let err = analyze(&equation, &SolverSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNREPRESENTABLE");
    }

    #[test]
    fn test_float_near_zero_discriminant_is_repeated() {
        // (x - 0.1)^2 = x^2 - 0.2x + 0.01, with rounding in the literals
        let equation = Equation::new(Float(1.0), Float(-0.2), Float(0.010000000000000002)).unwrap();
        let analysis = analyze(&equation, &SolverSettings::default()).unwrap();
        assert_eq!(analysis.nature, RootNature::RepeatedReal);
        assert_eq!(analysis.unique_roots().len(), 1);
        assert!((analysis.roots.0.re.0 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_float_small_root_keeps_precision() {
        let settings = SolverSettings::default();
        let equation = Equation::new(Float(1.0), Float(10000.0), Float(1.0)).unwrap();
        let analysis = analyze(&equation, &settings).unwrap();
        let small = analysis.roots.0.re.0;
        let large = analysis.roots.1.re.0;
        assert!((small + 1.000_000_010_000_000_2e-4).abs() < 1e-18);
        assert!((large + 9999.9999).abs() < 1e-9);

        let flipped = Equation::new(Float(1.0), Float(-10000.0), Float(1.0)).unwrap();
        let analysis = analyze(&flipped, &settings).unwrap();
        assert!((analysis.roots.0.re.0 - 9999.9999).abs() < 1e-9);
        assert!((analysis.roots.1.re.0 - 1.000_000_010_000_000_2e-4).abs() < 1e-18);
    }

    #[test]
    fn test_float_distinct_roots() {
        let equation = Equation::new(Float(2.0), Float(7.0), Float(3.0)).unwrap();
        let analysis = analyze(&equation, &SolverSettings::default()).unwrap();
        assert_eq!(analysis.roots.0.re, Float(-0.5));
        assert_eq!(analysis.roots.1.re, Float(-3.0));
    }
}
