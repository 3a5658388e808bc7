//! # Error Types
//!
//! Structured error types for quad_core. Every failure a solve can hit is
//! classified here so the presentation layer can show a single descriptive
//! message without ever seeing a panic.
//!
//! Some variants are fatal (the solve stops), others are reported as issues
//! on an otherwise successful [`SolveReport`](crate::solver::SolveReport).
//!
//! ## Example
//!
//! ```rust
//! use quad_core::errors::{SolveError, SolveResult};
//!
//! fn check_leading(a_is_zero: bool) -> SolveResult<()> {
//!     if a_is_zero {
//!         return Err(SolveError::degenerate("0"));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_leading(true).unwrap_err();
//! assert_eq!(err.error_code(), "DEGENERATE_EQUATION");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quad_core operations
pub type SolveResult<T> = Result<T, SolveError>;

/// Structured error type for solve operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SolveError {
    /// Coefficient text could not be parsed into a value
    #[error("Invalid syntax in '{field}': \"{input}\" - {reason}")]
    InvalidSyntax {
        field: String,
        input: String,
        reason: String,
    },

    /// Leading coefficient is zero, so the equation is not quadratic
    #[error("Coefficient 'a' cannot be zero for a quadratic equation (got {a})")]
    DegenerateEquation { a: String },

    /// Negative discriminant while complex roots are disabled
    #[error("No real roots: discriminant {discriminant} is negative")]
    NoRealRoots { discriminant: String },

    /// Splitting the middle term is not available for this equation
    #[error("Factorization not found: {reason}")]
    FactorizationNotFound { reason: String },

    /// A computed root does not satisfy the equation
    #[error("Verification mismatch: x = {root} leaves residual {residual}")]
    VerificationMismatch { root: String, residual: String },

    /// The exact domain cannot hold the result of an operation
    #[error("Cannot represent {operation} of {value} exactly")]
    Unrepresentable { operation: String, value: String },

    /// Solver settings are invalid
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl SolveError {
    /// Create an InvalidSyntax error
    pub fn invalid_syntax(field: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        SolveError::InvalidSyntax {
            field: field.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateEquation error
    pub fn degenerate(a: impl Into<String>) -> Self {
        SolveError::DegenerateEquation { a: a.into() }
    }

    /// Create a NoRealRoots error
    pub fn no_real_roots(discriminant: impl Into<String>) -> Self {
        SolveError::NoRealRoots {
            discriminant: discriminant.into(),
        }
    }

    /// Create a FactorizationNotFound error
    pub fn factorization_not_found(reason: impl Into<String>) -> Self {
        SolveError::FactorizationNotFound { reason: reason.into() }
    }

    /// Create a VerificationMismatch error
    pub fn verification_mismatch(root: impl Into<String>, residual: impl Into<String>) -> Self {
        SolveError::VerificationMismatch {
            root: root.into(),
            residual: residual.into(),
        }
    }

    /// Create an Unrepresentable error
    pub fn unrepresentable(operation: impl Into<String>, value: impl Into<String>) -> Self {
        SolveError::Unrepresentable {
            operation: operation.into(),
            value: value.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        SolveError::Config { reason: reason.into() }
    }

    /// Whether this error stops the solve.
    ///
    /// `FactorizationNotFound` and `VerificationMismatch` are attached to a
    /// report instead of aborting it.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SolveError::FactorizationNotFound { .. } | SolveError::VerificationMismatch { .. }
        )
    }

    /// Attach the coefficient name to a syntax error raised while parsing.
    pub fn in_field(self, name: &str) -> Self {
        match self {
            SolveError::InvalidSyntax { input, reason, .. } => SolveError::InvalidSyntax {
                field: name.to_string(),
                input,
                reason,
            },
            other => other,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SolveError::InvalidSyntax { .. } => "INVALID_SYNTAX",
            SolveError::DegenerateEquation { .. } => "DEGENERATE_EQUATION",
            SolveError::NoRealRoots { .. } => "NO_REAL_ROOTS",
            SolveError::FactorizationNotFound { .. } => "FACTORIZATION_NOT_FOUND",
            SolveError::VerificationMismatch { .. } => "VERIFICATION_MISMATCH",
            SolveError::Unrepresentable { .. } => "UNREPRESENTABLE",
            SolveError::Config { .. } => "CONFIG_ERROR",
        }
    }
}
