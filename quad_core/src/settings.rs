//! # Solver Settings
//!
//! Configuration for a solve. Every field has a default, so a settings file
//! (or JSON object) only needs to mention what it changes.
//!
//! ## Example
//!
//! ```rust
//! use quad_core::settings::{DomainKind, SolverSettings};
//!
//! let settings: SolverSettings = serde_json::from_str(r#"{ "domain": "Float" }"#).unwrap();
//! assert_eq!(settings.domain, DomainKind::Float);
//! assert_eq!(settings.search_bound, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SolveError, SolveResult};

/// Default magnitude bound for the integer split search
pub const DEFAULT_SEARCH_BOUND: u64 = 10_000;

/// Hard ceiling on the search bound; the divisor loop runs at most twice this
pub const MAX_SEARCH_BOUND: u64 = 10_000_000;

/// Default relative tolerance for the float domain
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Numeric domain used for coefficients and roots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DomainKind {
    /// Exact rationals and square roots
    #[default]
    Exact,
    /// IEEE-754 doubles with tolerance comparisons
    Float,
}

impl DomainKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DomainKind::Exact => "exact",
            DomainKind::Float => "floating-point",
        }
    }
}

/// Settings consumed by the solver pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Domain to solve in
    pub domain: DomainKind,

    /// Largest divisor magnitude tried by the integer split search
    pub search_bound: u64,

    /// Relative tolerance for float comparisons (discriminant, roots,
    /// verification). Ignored by the exact domain.
    pub epsilon: f64,

    /// Report complex roots for a negative discriminant; when false the solve
    /// fails with `NoRealRoots`
    pub allow_complex: bool,

    /// Append the optional denominator-rationalization steps
    pub rationalize: bool,

    /// Re-run in the float domain when an exact value is unrepresentable
    pub float_fallback: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            domain: DomainKind::Exact,
            search_bound: DEFAULT_SEARCH_BOUND,
            epsilon: DEFAULT_EPSILON,
            allow_complex: true,
            rationalize: true,
            float_fallback: true,
        }
    }
}

impl SolverSettings {
    /// Validate settings values.
    pub fn validate(&self) -> SolveResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SolveError::config(format!(
                "epsilon must be a positive finite number (got {})",
                self.epsilon
            )));
        }
        if self.epsilon >= 1.0 {
            return Err(SolveError::config(format!(
                "epsilon must be smaller than 1 (got {})",
                self.epsilon
            )));
        }
        if self.search_bound > MAX_SEARCH_BOUND {
            return Err(SolveError::config(format!(
                "search_bound must be at most {} (got {})",
                MAX_SEARCH_BOUND, self.search_bound
            )));
        }
        Ok(())
    }

    /// Same settings in another domain
    pub fn with_domain(&self, domain: DomainKind) -> Self {
        SolverSettings {
            domain,
            ..self.clone()
        }
    }
}
