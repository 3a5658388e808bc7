//! # Quadratic Formula Steps
//!
//! `x = (-b ± sqrt(b^2 - 4ac)) / (2a)`, shown as a substitution chain:
//! coefficients, discriminant (literal, expanded, simplified), the formula
//! with `Δ` substituted, then one branch per discriminant sign.

use super::{Method, StepKind, StepSequence};
use crate::analysis::{Analysis, RootNature};
use crate::domain::{Complex, Scalar};
use crate::equation::Equation;
use crate::format::{fraction, paren, wrapped};

pub const FORMULA: &str = "x = (-b ± sqrt(b^2 - 4ac)) / (2a)";

/// Build the formula sequence. Always succeeds once the equation has been
/// analyzed.
pub fn derive_formula<T: Scalar>(equation: &Equation<T>, analysis: &Analysis<T>) -> StepSequence {
    let (a, b, c) = (&equation.a, &equation.b, &equation.c);
    let mut sequence = StepSequence::new(Method::QuadraticFormula);

    sequence.push(
        StepKind::RestateEquation,
        "Start from the equation in standard form.",
        [equation.to_string()],
    );

    sequence.push(
        StepKind::StateFormula,
        "The roots of a·x^2 + b·x + c = 0 are given by the quadratic formula.",
        [FORMULA],
    );

    sequence.push(
        StepKind::IdentifyCoefficients,
        "Read off the coefficients.",
        [format!("a = {}, b = {}, c = {}", a, b, c)],
    );

    let b_squared = b.clone() * b.clone();
    let four_ac = T::from_integer(4) * equation.product();
    let raw = b_squared.clone() - four_ac.clone();
    let discriminant = &analysis.discriminant;
    let mut lines = vec![
        "Δ = b^2 - 4ac".to_string(),
        format!("Δ = {}^2 - 4{}{}", paren(b), paren(a), paren(c)),
        format!("Δ = {} - {}", wrapped(&b_squared), wrapped(&four_ac)),
    ];
    if raw == *discriminant {
        lines.push(format!("Δ = {}", discriminant));
    } else {
        // float rounding treated as zero
        lines.push(format!("Δ = {} ≈ {}", raw, discriminant));
    }
    let comparison = match analysis.nature {
        RootNature::TwoDistinctReal => "Δ > 0",
        RootNature::RepeatedReal => "Δ = 0",
        RootNature::ComplexPair => "Δ < 0",
    };
    sequence.push(
        StepKind::Discriminant,
        format!("{}, so the equation has {}.", comparison, analysis.nature.description()),
        lines,
    );

    let minus_b = -b.clone();
    let two_a = T::from_integer(2) * a.clone();
    sequence.push(
        StepKind::SubstituteFormula,
        "Substitute the coefficients and the discriminant into the formula.",
        [
            format!("x = (-{} ± sqrt({})) / (2{})", paren(b), discriminant, paren(a)),
            format!("x = ({} ± sqrt({})) / {}", minus_b, discriminant, wrapped(&two_a)),
        ],
    );

    let (r1, r2) = &analysis.roots;
    let root_disc = &analysis.root_discriminant;
    match analysis.nature {
        RootNature::RepeatedReal => {
            sequence.push(
                StepKind::ComputeRoots,
                "With Δ = 0 the ± term vanishes, leaving x = -b/(2a).",
                [
                    format!("x = {}", fraction(&minus_b, &two_a)),
                    format!("x = {}", r1),
                ],
            );
            sequence.push(
                StepKind::FinalAnswer,
                "The equation has one repeated root.",
                [format!("x = {} (repeated)", r1)],
            );
        }
        RootNature::TwoDistinctReal => {
            sequence.push(
                StepKind::ComputeRoots,
                "Take the square root of the discriminant and evaluate both signs.",
                [
                    format!("sqrt({}) = {}", discriminant, root_disc),
                    format!("x1 = ({} + {}) / {} = {}", minus_b, wrapped(root_disc), wrapped(&two_a), r1),
                    format!("x2 = ({} - {}) / {} = {}", minus_b, wrapped(root_disc), wrapped(&two_a), r2),
                ],
            );
            sequence.push(
                StepKind::FinalAnswer,
                "The equation has two distinct real roots.",
                [format!("x1 = {}", r1), format!("x2 = {}", r2)],
            );
        }
        RootNature::ComplexPair => {
            let imaginary = Complex::new(T::zero(), root_disc.clone());
            sequence.push(
                StepKind::ComputeRoots,
                "The square root of a negative number is imaginary: sqrt(-d) = sqrt(d)·i.",
                [
                    format!("sqrt({}) = sqrt({})i = {}", discriminant, -discriminant.clone(), imaginary),
                    format!("x1 = ({} + {}) / {} = {}", minus_b, imaginary, wrapped(&two_a), r1),
                    format!("x2 = ({} - {}) / {} = {}", minus_b, imaginary, wrapped(&two_a), r2),
                ],
            );
            sequence.push(
                StepKind::FinalAnswer,
                "The equation has a pair of complex conjugate roots.",
                [format!("x1 = {}", r1), format!("x2 = {}", r2)],
            );
        }
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::domain::{Float, Surd};
    use crate::settings::SolverSettings;

    fn formula(a: &str, b: &str, c: &str) -> StepSequence {
        let equation: Equation<Surd> = Equation::parse(a, b, c).unwrap();
        let analysis = analyze(&equation, &SolverSettings::default()).unwrap();
        derive_formula(&equation, &analysis)
    }

    fn expressions(sequence: &StepSequence, kind: StepKind) -> Vec<String> {
        sequence.find(kind).unwrap().expressions.clone()
    }

    #[test]
    fn test_discriminant_chain() {
        let steps = formula("1", "-5", "6");
        assert_eq!(
            expressions(&steps, StepKind::Discriminant),
            vec!["Δ = b^2 - 4ac", "Δ = (-5)^2 - 4(1)(6)", "Δ = 25 - 24", "Δ = 1"]
        );
        assert_eq!(expressions(&steps, StepKind::IdentifyCoefficients), vec!["a = 1, b = -5, c = 6"]);
    }

    #[test]
    fn test_two_real_roots() {
        let steps = formula("1", "-5", "6");
        assert_eq!(
            expressions(&steps, StepKind::SubstituteFormula),
            vec!["x = (-(-5) ± sqrt(1)) / (2(1))", "x = (5 ± sqrt(1)) / 2"]
        );
        assert_eq!(
            expressions(&steps, StepKind::ComputeRoots),
            vec!["sqrt(1) = 1", "x1 = (5 + 1) / 2 = 3", "x2 = (5 - 1) / 2 = 2"]
        );
        assert_eq!(expressions(&steps, StepKind::FinalAnswer), vec!["x1 = 3", "x2 = 2"]);
    }

    #[test]
    fn test_repeated_root_branch() {
        let steps = formula("1", "-4", "4");
        assert!(steps.find(StepKind::Discriminant).unwrap().narrative.starts_with("Δ = 0"));
        assert_eq!(expressions(&steps, StepKind::ComputeRoots), vec!["x = 4/2", "x = 2"]);
        assert_eq!(expressions(&steps, StepKind::FinalAnswer), vec!["x = 2 (repeated)"]);
    }

    #[test]
    fn test_complex_branch() {
        let steps = formula("1", "2", "5");
        assert_eq!(
            expressions(&steps, StepKind::Discriminant),
            vec!["Δ = b^2 - 4ac", "Δ = (2)^2 - 4(1)(5)", "Δ = 4 - 20", "Δ = -16"]
        );
        assert_eq!(
            expressions(&steps, StepKind::ComputeRoots),
            vec![
                "sqrt(-16) = sqrt(16)i = 4i",
                "x1 = (-2 + 4i) / 2 = -1 + 2i",
                "x2 = (-2 - 4i) / 2 = -1 - 2i",
            ]
        );
    }

    #[test]
    fn test_step_order() {
        let steps = formula("2", "7", "3");
        assert_eq!(
            steps.kinds(),
            vec![
                StepKind::RestateEquation,
                StepKind::StateFormula,
                StepKind::IdentifyCoefficients,
                StepKind::Discriminant,
                StepKind::SubstituteFormula,
                StepKind::ComputeRoots,
                StepKind::FinalAnswer,
            ]
        );
    }

    #[test]
    fn test_float_rounding_note() {
        let equation = Equation::new(Float(1.0), Float(-0.2), Float(0.010000000000000002)).unwrap();
        let analysis = analyze(&equation, &SolverSettings::default()).unwrap();
        let steps = derive_formula(&equation, &analysis);
        let last = expressions(&steps, StepKind::Discriminant).pop().unwrap();
        assert!(last.starts_with("Δ = "));
        assert!(last.ends_with('0'));
        assert_eq!(expressions(&steps, StepKind::FinalAnswer).len(), 1);
    }
}
