//! # quad_core - Step-by-Step Quadratic Equation Engine
//!
//! `quad_core` solves `a·x² + b·x + c = 0` and explains the solution. Given
//! three coefficients it computes the roots and derives two step sequences
//! (splitting the middle term, and the quadratic formula) plus a verification
//! pass. All outputs are plain-text algebra in JSON-serializable types; turning
//! them into a page is left to the caller.
//!
//! ## Design Philosophy
//!
//! - **Exact first**: coefficients like `sqrt2` or `2/3` stay exact; floating
//!   point is used only when asked for or when a value has no exact form
//! - **Stateless**: pure functions from input to report
//! - **JSON-First**: all public result types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quad_core::{solve_with_settings, SolveInput, SolverSettings};
//!
//! let input = SolveInput::new("1", "-5", "6");
//! let report = solve_with_settings(&input, &SolverSettings::default()).unwrap();
//!
//! assert_eq!(report.root_texts(), vec!["3", "2"]);
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("x^2 - 5x + 6 = 0"));
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] - coefficient text to exact values
//! - [`domain`] - exact ([`domain::Surd`]) and float ([`domain::Float`]) numbers
//! - [`equation`] - the equation and its rendering
//! - [`analysis`] - discriminant, root nature and roots
//! - [`steps`] - factorization and quadratic-formula step sequences
//! - [`verify`] - substitution of the roots back into the equation
//! - [`solver`] - the pipeline and its report
//! - [`settings`] - solver configuration
//! - [`errors`] - structured error types

pub mod analysis;
pub mod domain;
pub mod equation;
pub mod errors;
pub mod format;
pub mod normalize;
pub mod settings;
pub mod solver;
pub mod steps;
pub mod verify;

// Re-export commonly used types at crate root for convenience
pub use errors::{SolveError, SolveResult};
pub use settings::{DomainKind, SolverSettings};
pub use solver::{solve, solve_numeric, solve_outcome, solve_with_settings, SolveInput, SolveOutcome, SolveReport};
