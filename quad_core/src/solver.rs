//! # Solver
//!
//! Runs the full pipeline for one equation:
//!
//! ```text
//! SolveInput -> Equation -> analyze -> { factorization, formula } -> verify -> SolveReport
//! ```
//!
//! Entry points follow the `*Input` / `*Report` pattern used across the
//! crate:
//!
//! - [`solve`] - one domain, chosen by type parameter
//! - [`solve_with_settings`] - domain chosen by settings, with the numeric
//!   fallback for values the exact domain cannot hold
//! - [`solve_outcome`] - never fails; classifies every error for display
//!
//! ## Example
//!
//! ```rust
//! use quad_core::solver::{solve_with_settings, SolveInput, SolveStatus};
//! use quad_core::settings::SolverSettings;
//!
//! let input = SolveInput::new("2", "7", "3");
//! let report = solve_with_settings(&input, &SolverSettings::default()).unwrap();
//!
//! assert_eq!(report.status, SolveStatus::Solved);
//! assert_eq!(report.root_texts(), vec!["-1/2", "-3"]);
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze, RootNature};
use crate::domain::{Complex, Float, Scalar, Sign, Surd};
use crate::equation::Equation;
use crate::errors::{SolveError, SolveResult};
use crate::normalize::approximate;
use crate::settings::{DomainKind, SolverSettings};
use crate::steps::factorization::{derive_factorization, SplitMethod};
use crate::steps::formula::derive_formula;
use crate::steps::StepSequence;
use crate::verify::{verify_roots, VerificationResult};

// ============================================================================
// Input
// ============================================================================

/// Raw coefficient text for `a·x² + b·x + c = 0`.
///
/// Accepts integers, decimals, fractions and radicals (`sqrt2`, `√3`,
/// `2sqrt(3)/3`). Blank text means zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveInput {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl SolveInput {
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        SolveInput {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }
}

impl Default for SolveInput {
    /// `x^2 - 5x + 6 = 0`
    fn default() -> Self {
        SolveInput::new("1", "-5", "6")
    }
}

// ============================================================================
// Report
// ============================================================================

/// A domain value as text plus its float approximation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueView {
    pub text: String,
    pub approx: f64,
}

impl ValueView {
    fn of<T: Scalar>(value: &T) -> Self {
        ValueView {
            text: value.to_string(),
            approx: value.to_f64(),
        }
    }
}

/// A root as text plus real and imaginary approximations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootView {
    pub text: String,
    pub re: f64,
    pub im: f64,
}

impl RootView {
    fn of<T: Scalar>(root: &Complex<T>) -> Self {
        RootView {
            text: root.to_string(),
            re: root.re.to_f64(),
            im: root.im.to_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientsView {
    pub a: ValueView,
    pub b: ValueView,
    pub c: ValueView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitView {
    pub p: ValueView,
    pub q: ValueView,
    pub method: SplitMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Every root verified
    Solved,
    /// At least one root failed verification; see `issues`
    VerificationFailed,
}

/// Everything a presentation layer needs to show a solution.
///
/// ## JSON Example
///
/// ```json
/// {
///   "domain": "Exact",
///   "used_float_fallback": false,
///   "status": "Solved",
///   "equation": "x^2 - 5x + 6 = 0",
///   "discriminant": { "text": "1", "approx": 1.0 },
///   "discriminant_sign": "Positive",
///   "nature": "TwoDistinctReal",
///   "unique_roots": [
///     { "text": "3", "re": 3.0, "im": 0.0 },
///     { "text": "2", "re": 2.0, "im": 0.0 }
///   ],
///   "split": { "p": { "text": "-2", "approx": -2.0 }, "q": { "text": "-3", "approx": -3.0 }, "method": "IntegerSearch" },
///   "issues": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    // === Context ===
    /// Domain the pipeline ran in
    pub domain: DomainKind,

    /// The exact domain could not hold a value, so the float domain was used
    pub used_float_fallback: bool,

    pub status: SolveStatus,

    // === Equation ===
    pub coefficients: CoefficientsView,

    /// Standard form, e.g. `x^2 - 5x + 6 = 0`
    pub equation: String,

    // === Analysis ===
    pub discriminant: ValueView,

    pub discriminant_sign: Sign,

    pub nature: RootNature,

    /// `(r1, r2)` in formula order, `r1` taking `+sqrt(Δ)`
    pub roots: Vec<RootView>,

    /// Roots without the repeated duplicate
    pub unique_roots: Vec<RootView>,

    // === Methods ===
    /// Split of the middle term; absent when factorization is not available
    pub split: Option<SplitView>,

    pub factorization: Option<StepSequence>,

    pub formula: StepSequence,

    // === Verification ===
    pub verification: Vec<VerificationResult>,

    /// Non-fatal problems (missing factorization, verification mismatch)
    pub issues: Vec<SolveError>,
}

impl SolveReport {
    /// Whether every root verified
    pub fn passes(&self) -> bool {
        self.status == SolveStatus::Solved
    }

    pub fn root_texts(&self) -> Vec<&str> {
        self.unique_roots.iter().map(|root| root.text.as_str()).collect()
    }

    /// One-line answer, e.g. `x = 3 or x = 2`
    pub fn answer(&self) -> String {
        match self.nature {
            RootNature::RepeatedReal => format!("x = {} (repeated)", self.root_texts().join("")),
            _ => self
                .root_texts()
                .iter()
                .map(|text| format!("x = {}", text))
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

// ============================================================================
// Solving
// ============================================================================

/// Run the pipeline on an already-built equation.
pub fn solve_equation<T: Scalar>(equation: &Equation<T>, settings: &SolverSettings) -> SolveResult<SolveReport> {
    debug!("solving {} in the {} domain", equation, T::KIND.display_name());
    let analysis = analyze(equation, settings)?;
    let mut issues = Vec::new();

    let (split, factorization) = match derive_factorization(equation, &analysis, settings) {
        Ok((split, steps)) => (
            Some(SplitView {
                p: ValueView::of(&split.p),
                q: ValueView::of(&split.q),
                method: split.method,
            }),
            Some(steps),
        ),
        Err(e) if !e.is_fatal() => {
            warn!("{}: {}", equation, e);
            issues.push(e);
            (None, None)
        }
        Err(e) => return Err(e),
    };

    let formula = derive_formula(equation, &analysis);

    let unique = analysis.unique_roots();
    let (verification, mismatches) = verify_roots(equation, &unique, settings.epsilon);
    let status = if mismatches.is_empty() {
        SolveStatus::Solved
    } else {
        SolveStatus::VerificationFailed
    };
    issues.extend(mismatches);

    let report = SolveReport {
        domain: T::KIND,
        used_float_fallback: false,
        status,
        coefficients: CoefficientsView {
            a: ValueView::of(&equation.a),
            b: ValueView::of(&equation.b),
            c: ValueView::of(&equation.c),
        },
        equation: equation.to_string(),
        discriminant: ValueView::of(&analysis.discriminant),
        discriminant_sign: analysis.sign,
        nature: analysis.nature,
        roots: vec![RootView::of(&analysis.roots.0), RootView::of(&analysis.roots.1)],
        unique_roots: unique.iter().map(RootView::of).collect(),
        split,
        factorization,
        formula,
        verification,
        issues,
    };
    info!("{}: {} ({:?})", report.equation, report.answer(), report.status);
    Ok(report)
}

/// Parse and solve in the domain `T`.
///
/// # Errors
///
/// `Config` for invalid settings, `InvalidSyntax`, `DegenerateEquation`,
/// `NoRealRoots` and `Unrepresentable` as raised by the stages.
pub fn solve<T: Scalar>(input: &SolveInput, settings: &SolverSettings) -> SolveResult<SolveReport> {
    settings.validate()?;
    let equation: Equation<T> = Equation::parse(&input.a, &input.b, &input.c)?;
    solve_equation(&equation, settings)
}

/// Solve from plain doubles in the float domain.
pub fn solve_numeric(a: f64, b: f64, c: f64, settings: &SolverSettings) -> SolveResult<SolveReport> {
    settings.validate()?;
    for (name, value) in [("a", a), ("b", b), ("c", c)] {
        if !value.is_finite() {
            return Err(SolveError::invalid_syntax(name, value.to_string(), "value must be finite"));
        }
    }
    let equation = Equation::new(Float::from(a), Float::from(b), Float::from(c))?;
    solve_equation(&equation, settings)
}

/// Evaluate the input in floating point, for the numeric fallback
fn approximate_equation(input: &SolveInput) -> SolveResult<Equation<Float>> {
    let a = approximate(&input.a).map_err(|e| e.in_field("a"))?;
    let b = approximate(&input.b).map_err(|e| e.in_field("b"))?;
    let c = approximate(&input.c).map_err(|e| e.in_field("c"))?;
    Equation::new(Float(a), Float(b), Float(c))
}

/// Solve in the configured domain.
///
/// In the exact domain an `Unrepresentable` value (a nested radical that
/// does not denest, a square root of a huge radicand) re-runs the pipeline
/// in the float domain when `float_fallback` is on, and the report says so.
pub fn solve_with_settings(input: &SolveInput, settings: &SolverSettings) -> SolveResult<SolveReport> {
    settings.validate()?;
    match settings.domain {
        DomainKind::Float => solve::<Float>(input, settings),
        DomainKind::Exact => match solve::<Surd>(input, settings) {
            Err(SolveError::Unrepresentable { operation, value }) if settings.float_fallback => {
                warn!(
                    "cannot represent {} of {} exactly, falling back to floating point",
                    operation, value
                );
                let equation = approximate_equation(input)?;
                let mut report = solve_equation(&equation, &settings.with_domain(DomainKind::Float))?;
                report.used_float_fallback = true;
                Ok(report)
            }
            other => other,
        },
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Classified result for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// A report was produced
    pub success: bool,

    /// Human-readable summary or error message
    pub message: String,

    /// Short code of the fatal error, e.g. `DEGENERATE_EQUATION`
    pub error_code: Option<String>,

    pub error: Option<SolveError>,

    pub report: Option<SolveReport>,
}

/// Solve and classify. Never fails and never panics on user input.
///
/// ```rust
/// use quad_core::solver::{solve_outcome, SolveInput};
/// use quad_core::settings::SolverSettings;
///
/// let outcome = solve_outcome(&SolveInput::new("0", "2", "1"), &SolverSettings::default());
/// assert!(!outcome.success);
/// assert_eq!(outcome.error_code.as_deref(), Some("DEGENERATE_EQUATION"));
/// ```
pub fn solve_outcome(input: &SolveInput, settings: &SolverSettings) -> SolveOutcome {
    match solve_with_settings(input, settings) {
        Ok(report) => {
            let message = match report.status {
                SolveStatus::Solved => format!("{}: {}", report.equation, report.answer()),
                SolveStatus::VerificationFailed => format!(
                    "{}: {} (verification failed)",
                    report.equation,
                    report.answer()
                ),
            };
            SolveOutcome {
                success: true,
                message,
                error_code: None,
                error: None,
                report: Some(report),
            }
        }
        Err(e) => {
            warn!("solve failed: {}", e);
            SolveOutcome {
                success: false,
                message: e.to_string(),
                error_code: Some(e.error_code().to_string()),
                error: Some(e),
                report: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(a: &str, b: &str, c: &str) -> SolveReport {
        solve_with_settings(&SolveInput::new(a, b, c), &SolverSettings::default()).unwrap()
    }

    #[test]
    fn test_default_input() {
        let report = solve_with_settings(&SolveInput::default(), &SolverSettings::default()).unwrap();
        assert_eq!(report.equation, "x^2 - 5x + 6 = 0");
        assert_eq!(report.answer(), "x = 3 or x = 2");
        assert!(report.passes());
    }

    #[test]
    fn test_complex_roots_report_issue() {
        let report = exact("1", "2", "5");
        assert_eq!(report.nature, RootNature::ComplexPair);
        assert!(report.factorization.is_none());
        assert!(report.split.is_none());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].error_code(), "FACTORIZATION_NOT_FOUND");
        assert_eq!(report.roots[0].im, 2.0);
        assert!(report.passes());
    }

    #[test]
    fn test_repeated_root_answer() {
        let report = exact("1", "-4", "4");
        assert_eq!(report.answer(), "x = 2 (repeated)");
        assert_eq!(report.roots.len(), 2);
        assert_eq!(report.unique_roots.len(), 1);
        assert_eq!(report.verification.len(), 1);
    }

    #[test]
    fn test_float_fallback() {
        let report = exact("1", "1", "sqrt2");
        assert!(report.used_float_fallback);
        assert_eq!(report.domain, DomainKind::Float);
        assert!(report.passes());
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let settings = SolverSettings {
            float_fallback: false,
            ..SolverSettings::default()
        };
        let err = solve_with_settings(&SolveInput::new("1", "1", "sqrt2"), &settings).unwrap_err();
        assert_eq!(err.error_code(), "UNREPRESENTABLE");
    }

    #[test]
    fn test_float_domain() {
        let settings = SolverSettings::default().with_domain(DomainKind::Float);
        let report = solve_with_settings(&SolveInput::new("2", "7", "3"), &settings).unwrap();
        assert_eq!(report.domain, DomainKind::Float);
        assert!(!report.used_float_fallback);
        assert_eq!(report.root_texts(), vec!["-0.5", "-3"]);
    }

    #[test]
    fn test_numeric_entry() {
        let report = solve_numeric(1.0, -3.0, 2.0, &SolverSettings::default()).unwrap();
        assert_eq!(report.root_texts(), vec!["2", "1"]);
        let err = solve_numeric(1.0, f64::NAN, 2.0, &SolverSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SYNTAX");
    }

    #[test]
    fn test_invalid_settings() {
        let settings = SolverSettings {
            epsilon: -1.0,
            ..SolverSettings::default()
        };
        let err = solve_with_settings(&SolveInput::default(), &settings).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_outcome_classification() {
        let settings = SolverSettings::default();
        let outcome = solve_outcome(&SolveInput::new("1", "2x", "1"), &settings);
        assert!(!outcome.success);
        assert_eq!(outcome.error_code.as_deref(), Some("INVALID_SYNTAX"));
        assert!(outcome.message.contains("'b'"));

        let outcome = solve_outcome(&SolveInput::default(), &settings);
        assert!(outcome.success);
        assert_eq!(outcome.message, "x^2 - 5x + 6 = 0: x = 3 or x = 2");
    }

    #[test]
    fn test_report_serialization() {
        let report = exact("1", "-5", "6");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"method\":\"IntegerSearch\""));
        assert!(json.contains("\"nature\":\"TwoDistinctReal\""));
        let roundtrip: SolveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, report);
    }
}
