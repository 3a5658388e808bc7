//! # Step Sequences
//!
//! Typed derivation steps produced by the two solution methods. A step has a
//! kind (what transformation it shows), a narrative sentence and zero or more
//! plain-text expressions, e.g.
//!
//! ```text
//! SplitMiddleTerm  "Rewrite the middle term using the pair."
//!                  ["x^2 - 2x - 3x + 6 = 0"]
//! ```
//!
//! Sequences are pure data. The same equation and settings always produce the
//! same sequence.
//!
//! ## Usage
//!
//! ```rust
//! use quad_core::domain::Surd;
//! use quad_core::equation::Equation;
//! use quad_core::analysis::analyze;
//! use quad_core::settings::SolverSettings;
//! use quad_core::steps::{formula::derive_formula, StepKind};
//!
//! let settings = SolverSettings::default();
//! let equation: Equation<Surd> = Equation::parse("1", "-5", "6").unwrap();
//! let analysis = analyze(&equation, &settings).unwrap();
//! let steps = derive_formula(&equation, &analysis);
//! assert_eq!(steps.steps[0].kind, StepKind::RestateEquation);
//! ```

pub mod factorization;
pub mod formula;

use serde::{Deserialize, Serialize};

// ============================================================================
// Step Kinds
// ============================================================================

/// The transformation a step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    // Shared
    RestateEquation,

    // Splitting the middle term
    ProductSumTarget,
    SplitPair,
    SplitMiddleTerm,
    GroupTerms,
    FactorGroups,
    FactorCommonBinomial,
    ZeroProduct,
    SolveLinear,
    Rationalize,

    // Quadratic formula
    StateFormula,
    IdentifyCoefficients,
    Discriminant,
    SubstituteFormula,
    ComputeRoots,

    FinalAnswer,
}

impl StepKind {
    /// Short heading for the step
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::RestateEquation => "Write the equation in standard form",
            StepKind::ProductSumTarget => "Find the product and sum targets",
            StepKind::SplitPair => "Find two numbers",
            StepKind::SplitMiddleTerm => "Split the middle term",
            StepKind::GroupTerms => "Group the terms",
            StepKind::FactorGroups => "Factor each group",
            StepKind::FactorCommonBinomial => "Factor out the common binomial",
            StepKind::ZeroProduct => "Apply the zero-product property",
            StepKind::SolveLinear => "Solve for x",
            StepKind::Rationalize => "Rationalize the denominator",
            StepKind::StateFormula => "State the quadratic formula",
            StepKind::IdentifyCoefficients => "Identify the coefficients",
            StepKind::Discriminant => "Compute the discriminant",
            StepKind::SubstituteFormula => "Substitute into the formula",
            StepKind::ComputeRoots => "Compute the roots",
            StepKind::FinalAnswer => "Answer",
        }
    }
}

// ============================================================================
// Steps and Sequences
// ============================================================================

/// A single derivation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub narrative: String,
    pub expressions: Vec<String>,
}

/// Solution method a sequence belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Factorization,
    QuadraticFormula,
}

impl Method {
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::Factorization => "Splitting the middle term",
            Method::QuadraticFormula => "Quadratic formula",
        }
    }
}

/// Ordered steps of one method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSequence {
    pub method: Method,
    pub steps: Vec<Step>,
}

impl StepSequence {
    pub fn new(method: Method) -> Self {
        StepSequence {
            method,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn push<I, S>(&mut self, kind: StepKind, narrative: impl Into<String>, expressions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(Step {
            kind,
            narrative: narrative.into(),
            expressions: expressions.into_iter().map(Into::into).collect(),
        });
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|step| step.kind).collect()
    }

    /// First step of a kind, if present
    pub fn find(&self, kind: StepKind) -> Option<&Step> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_find() {
        let mut sequence = StepSequence::new(Method::QuadraticFormula);
        sequence.push(StepKind::RestateEquation, "Start", ["x^2 = 0"]);
        sequence.push(StepKind::FinalAnswer, "Done", Vec::<String>::new());
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.kinds(), vec![StepKind::RestateEquation, StepKind::FinalAnswer]);
        assert_eq!(sequence.find(StepKind::RestateEquation).unwrap().expressions, vec!["x^2 = 0"]);
        assert!(sequence.find(StepKind::Discriminant).is_none());
    }

    #[test]
    fn test_sequence_serialization() {
        let mut sequence = StepSequence::new(Method::Factorization);
        sequence.push(StepKind::SplitPair, "Two numbers", ["-2", "-3"]);
        let json = serde_json::to_string(&sequence).unwrap();
        assert!(json.contains("\"method\":\"Factorization\""));
        assert!(json.contains("\"kind\":\"SplitPair\""));
        let roundtrip: StepSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, sequence);
    }

    #[test]
    fn test_titles_are_distinct() {
        let kinds = [
            StepKind::RestateEquation,
            StepKind::ProductSumTarget,
            StepKind::SplitPair,
            StepKind::SplitMiddleTerm,
            StepKind::GroupTerms,
            StepKind::FactorGroups,
            StepKind::FactorCommonBinomial,
            StepKind::ZeroProduct,
            StepKind::SolveLinear,
            StepKind::Rationalize,
            StepKind::StateFormula,
            StepKind::IdentifyCoefficients,
            StepKind::Discriminant,
            StepKind::SubstituteFormula,
            StepKind::ComputeRoots,
            StepKind::FinalAnswer,
        ];
        let mut titles: Vec<_> = kinds.iter().map(|k| k.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), kinds.len());
    }
}
