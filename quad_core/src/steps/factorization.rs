//! # Splitting the Middle Term
//!
//! Finds `p`, `q` with `p + q = b` and `p·q = a·c`, then rewrites
//! `a·x² + b·x + c` as `a·x² + p·x + q·x + c`, groups, factors and solves.
//!
//! The pair comes from one of three sources:
//!
//! - **Integer search**: all coefficients are integers, so try divisors `i`
//!   of `a·c` up to the search bound until `i + a·c/i = b`
//! - **Root identity**: `a·x² + b·x + c = a(x - r1)(x - r2)`, so
//!   `p = -a·r1` and `q = -a·r2`
//! - **Half split**: a repeated root means `p = q = b/2`
//!
//! A negative discriminant has no real split.

use log::debug;
use num_integer::Integer;
use serde::{Deserialize, Serialize};

use super::{Method, StepKind, StepSequence};
use crate::analysis::{Analysis, RootNature};
use crate::domain::{Scalar, Sign};
use crate::equation::Equation;
use crate::errors::{SolveError, SolveResult};
use crate::format::{fraction, linear, linear_factor, paren, signed_sum, wrapped};
use crate::settings::SolverSettings;

/// Where a split pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitMethod {
    IntegerSearch,
    RootIdentity,
    HalfSplit,
}

/// The pair `(p, q)`, larger term first
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTerms<T> {
    pub p: T,
    pub q: T,
    pub method: SplitMethod,
}

impl<T: Scalar> SplitTerms<T> {
    fn ordered(first: T, second: T, method: SplitMethod) -> Self {
        if (second.clone() - first.clone()).sign() == Sign::Positive {
            SplitTerms { p: second, q: first, method }
        } else {
            SplitTerms { p: first, q: second, method }
        }
    }
}

// ============================================================================
// Finding the pair
// ============================================================================

/// Divisor search for `i + a·c/i = b` with `|i| ≤ bound`.
///
/// Returns the pair larger first; `a·c = 0` gives `(b, 0)` directly.
pub fn search_integer_split(a: i64, b: i64, c: i64, bound: u64) -> Option<(i64, i64)> {
    let product = i128::from(a) * i128::from(c);
    let target = i128::from(b);
    let order = |x: i128, y: i128| -> Option<(i64, i64)> {
        let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
        Some((i64::try_from(hi).ok()?, i64::try_from(lo).ok()?))
    };

    if product == 0 {
        return order(target, 0);
    }

    // Divisors never exceed |a·c|
    let limit = i128::from(bound).min(product.abs());
    for i in 1..=limit {
        for divisor in [i, -i] {
            if product % divisor == 0 && divisor + product / divisor == target {
                return order(divisor, product / divisor);
            }
        }
    }
    None
}

/// Find the split pair for an analyzed equation.
///
/// # Errors
///
/// `FactorizationNotFound` when the roots are complex or no pair satisfies
/// both conditions.
pub fn derive_split<T: Scalar>(
    equation: &Equation<T>,
    analysis: &Analysis<T>,
    settings: &SolverSettings,
) -> SolveResult<SplitTerms<T>> {
    match analysis.nature {
        RootNature::ComplexPair => {
            return Err(SolveError::factorization_not_found(
                "the discriminant is negative, so no real pair splits the middle term",
            ))
        }
        RootNature::RepeatedReal => {
            let half = equation
                .b
                .checked_div(&T::from_integer(2))
                .ok_or_else(|| SolveError::factorization_not_found("cannot halve b"))?;
            return Ok(SplitTerms {
                p: half.clone(),
                q: half,
                method: SplitMethod::HalfSplit,
            });
        }
        RootNature::TwoDistinctReal => {}
    }

    if let Some((a, b, c)) = equation.integer_coefficients() {
        match search_integer_split(a, b, c, settings.search_bound) {
            Some((p, q)) => {
                return Ok(SplitTerms {
                    p: T::from_integer(p),
                    q: T::from_integer(q),
                    method: SplitMethod::IntegerSearch,
                })
            }
            None => debug!(
                "no integer split of {} within bound {}, trying the root identity",
                a as i128 * c as i128,
                settings.search_bound
            ),
        }
    }

    let minus_a = -equation.a.clone();
    let p = minus_a.clone() * analysis.roots.0.re.clone();
    let q = minus_a * analysis.roots.1.re.clone();

    let product = equation.product();
    let sum_tolerance = settings.epsilon * equation.b.to_f64().abs().max(1.0);
    let product_tolerance = settings.epsilon * product.to_f64().abs().max(1.0);
    let sum_holds = (p.clone() + q.clone()).same_value(&equation.b, sum_tolerance);
    let product_holds = (p.clone() * q.clone()).same_value(&product, product_tolerance);
    if !(sum_holds && product_holds) {
        return Err(SolveError::factorization_not_found(format!(
            "the root identity gives {} and {}, which do not split {}",
            p, q, equation.b
        )));
    }

    Ok(SplitTerms::ordered(p, q, SplitMethod::RootIdentity))
}

// ============================================================================
// Factoring the grouped form
// ============================================================================

/// `(outer.0·x + outer.1)(common.0·x + common.1)`, where the grouped form
/// reads `outer.0·x(common) + outer.1(common)`
#[derive(Debug, Clone, PartialEq)]
struct Factored<T> {
    outer: (T, T),
    common: (T, T),
}

/// Factor `a·x² + first·x + second·x + c` by grouping.
///
/// Integer values use the gcd of `a` and `first`; anything else pulls out
/// `a` itself, leaving `(x + first/a)`.
fn factor_groups<T: Scalar>(a: &T, first: &T, second: &T) -> Option<Factored<T>> {
    let integers = (a.to_integer(), first.to_integer(), second.to_integer());
    if let (Some(ai), Some(pi), Some(qi)) = integers {
        if ai != i64::MIN && pi != i64::MIN {
            let g1 = ai.gcd(&pi) * ai.signum();
            let k = ai / g1;
            if qi % k == 0 {
                return Some(Factored {
                    outer: (T::from_integer(g1), T::from_integer(qi / k)),
                    common: (T::from_integer(k), T::from_integer(pi / g1)),
                });
            }
        }
    }

    Some(Factored {
        outer: (a.clone(), second.clone()),
        common: (T::one(), first.checked_div(a)?),
    })
}

/// Root of `k·x + m = 0` with its working lines
fn solve_linear<T: Scalar>(k: &T, m: &T) -> Option<(T, Vec<String>)> {
    let root = (-m.clone()).checked_div(k)?;
    let mut lines = vec![format!("{} = 0", linear(k, m))];
    if !m.is_zero() {
        lines.push(format!("{} = {}", linear(k, &T::zero()), -m.clone()));
    }
    if *k != T::one() {
        lines.push(format!("x = {}", root));
    }
    Some((root, lines))
}

fn not_factorable(equation: &impl std::fmt::Display) -> SolveError {
    SolveError::factorization_not_found(format!("could not factor {} by grouping", equation))
}

fn push_split_steps<T: Scalar>(
    sequence: &mut StepSequence,
    equation: &Equation<T>,
    split: &SplitTerms<T>,
) {
    let (a, b, c) = (&equation.a, &equation.b, &equation.c);
    let product = equation.product();

    sequence.push(
        StepKind::RestateEquation,
        "Start from the equation in standard form.",
        [equation.to_string()],
    );

    sequence.push(
        StepKind::ProductSumTarget,
        format!(
            "Find two numbers whose product is a·c = {} and whose sum is b = {}.",
            product, b
        ),
        [
            format!("a·c = {}{} = {}", paren(a), paren(c), product),
            format!("b = {}", b),
        ],
    );

    let narrative = match split.method {
        SplitMethod::IntegerSearch => format!(
            "The numbers {} and {} multiply to {} and add to {}.",
            split.p, split.q, product, b
        ),
        SplitMethod::RootIdentity => format!(
            "Using the roots r1, r2 of the equation, p = -a·r1 = {} and q = -a·r2 = {}.",
            split.p, split.q
        ),
        SplitMethod::HalfSplit => format!("Both numbers are b/2 = {}.", split.p),
    };
    sequence.push(
        StepKind::SplitPair,
        narrative,
        [
            format!("p = {}, q = {}", split.p, split.q),
            format!("p·q = {}{} = {}", paren(&split.p), paren(&split.q), split.p.clone() * split.q.clone()),
            format!("p + q = {} + {} = {}", split.p, wrapped(&split.q), split.p.clone() + split.q.clone()),
        ],
    );

    let split_text = signed_sum(&[
        (a.clone(), "x^2"),
        (split.p.clone(), "x"),
        (split.q.clone(), "x"),
        (c.clone(), ""),
    ]);
    sequence.push(
        StepKind::SplitMiddleTerm,
        format!("Rewrite the middle term {} as the sum of the pair.", linear(b, &T::zero())),
        [format!("{} = 0", split_text)],
    );
}

/// Derive the split and the full factorization step sequence.
///
/// # Errors
///
/// `FactorizationNotFound` when no split exists; the caller records it as a
/// non-fatal issue.
pub fn derive_factorization<T: Scalar>(
    equation: &Equation<T>,
    analysis: &Analysis<T>,
    settings: &SolverSettings,
) -> SolveResult<(SplitTerms<T>, StepSequence)> {
    let split = derive_split(equation, analysis, settings)?;
    debug!("split {} into {} and {} ({:?})", equation.b, split.p, split.q, split.method);

    let mut sequence = StepSequence::new(Method::Factorization);
    push_split_steps(&mut sequence, equation, &split);

    if let Some(radicals) = perfect_square_radicals(equation, &split) {
        push_radical_square_steps(&mut sequence, equation, &split, &radicals, settings)
            .ok_or_else(|| not_factorable(equation))?;
    } else {
        push_grouping_steps(&mut sequence, equation, &split, settings)
            .ok_or_else(|| not_factorable(equation))?;
    }

    Ok((split, sequence))
}

fn push_grouping_steps<T: Scalar>(
    sequence: &mut StepSequence,
    equation: &Equation<T>,
    split: &SplitTerms<T>,
    settings: &SolverSettings,
) -> Option<()> {
    let (a, c) = (&equation.a, &equation.c);
    // A zero p would leave nothing to factor from the first group
    let (first, second) = if split.p.is_zero() {
        (&split.q, &split.p)
    } else {
        (&split.p, &split.q)
    };

    sequence.push(
        StepKind::GroupTerms,
        "Group the first two terms and the last two terms.",
        [format!(
            "({}) + ({}) = 0",
            signed_sum(&[(a.clone(), "x^2"), (first.clone(), "x")]),
            signed_sum(&[(second.clone(), "x"), (c.clone(), "")]),
        )],
    );

    let factored = factor_groups(a, first, second)?;
    let (g1, g2) = &factored.outer;
    let (k, m) = &factored.common;
    let common = format!("({})", linear(k, m));
    let first_suffix = format!("x{}", common);
    sequence.push(
        StepKind::FactorGroups,
        format!("Factor each group; both share the binomial {}.", common),
        [format!(
            "{} = 0",
            signed_sum(&[(g1.clone(), first_suffix.as_str()), (g2.clone(), common.as_str())])
        )],
    );

    let common_factor = linear_factor(k, m);
    let outer_factor = linear_factor(g1, g2);
    let is_square = factored.outer == factored.common;
    let product_text = if is_square {
        format!("{}^2", common_factor)
    } else if outer_factor == "x" {
        format!("{}{}", outer_factor, common_factor)
    } else {
        format!("{}{}", common_factor, outer_factor)
    };
    sequence.push(
        StepKind::FactorCommonBinomial,
        format!("Factor out the common binomial {}.", common),
        [format!("{} = 0", product_text)],
    );

    let (common_root, common_lines) = solve_linear(k, m)?;
    if is_square {
        sequence.push(
            StepKind::ZeroProduct,
            "Take the square root of both sides.",
            [format!("{} = 0", linear(k, m))],
        );
        sequence.push(
            StepKind::SolveLinear,
            "Solve the linear equation; the root is repeated.",
            common_lines,
        );
        sequence.push(
            StepKind::FinalAnswer,
            "The equation has one repeated root.",
            [format!("x = {} (repeated)", common_root)],
        );
        return Some(());
    }

    sequence.push(
        StepKind::ZeroProduct,
        "A product is zero only when one of its factors is zero.",
        [
            format!("{} = 0", linear(k, m)),
            format!("{} = 0", linear(g1, g2)),
        ],
    );

    let (outer_root, outer_lines) = solve_linear(g1, g2)?;
    sequence.push(StepKind::SolveLinear, "Solve the first factor for x.", common_lines);
    sequence.push(StepKind::SolveLinear, "Solve the second factor for x.", outer_lines);

    let tolerance = settings.epsilon * common_root.to_f64().abs().max(1.0);
    if common_root.same_value(&outer_root, tolerance) {
        sequence.push(
            StepKind::FinalAnswer,
            "Both factors give the same value, so the root is repeated.",
            [format!("x = {} (repeated)", common_root)],
        );
    } else {
        sequence.push(
            StepKind::FinalAnswer,
            "The equation has two roots.",
            [format!("x = {}", common_root), format!("x = {}", outer_root)],
        );
    }
    Some(())
}

// ============================================================================
// Perfect squares with radical coefficients
// ============================================================================

/// `sqrt(a)`, `sqrt(c)` and the sign of `b` for `(sqrt(a)x ± sqrt(c))^2`
struct SquareRadicals<T> {
    root_a: T,
    root_c: T,
    sign_b: T,
}

/// The radical narrative applies to exact repeated roots with `a ≠ 1`,
/// `a > 0`, `c > 0` and exact square roots of both.
fn perfect_square_radicals<T: Scalar>(equation: &Equation<T>, split: &SplitTerms<T>) -> Option<SquareRadicals<T>> {
    let (a, b, c) = (&equation.a, &equation.b, &equation.c);
    if !T::EXACT
        || split.method != SplitMethod::HalfSplit
        || *a == T::one()
        || a.sign() != Sign::Positive
        || c.sign() != Sign::Positive
    {
        return None;
    }
    let sign_b = match b.sign() {
        Sign::Positive => T::one(),
        Sign::Negative => -T::one(),
        Sign::Zero => return None,
    };
    Some(SquareRadicals {
        root_a: a.sqrt().ok()?,
        root_c: c.sqrt().ok()?,
        sign_b,
    })
}

fn push_radical_square_steps<T: Scalar>(
    sequence: &mut StepSequence,
    equation: &Equation<T>,
    split: &SplitTerms<T>,
    radicals: &SquareRadicals<T>,
    settings: &SolverSettings,
) -> Option<()> {
    let (a, c) = (&equation.a, &equation.c);
    let SquareRadicals { root_a, root_c, sign_b } = radicals;
    let signed_root_c = sign_b.clone() * root_c.clone();

    sequence.push(
        StepKind::GroupTerms,
        "Group the first two terms and the last two terms.",
        [format!(
            "({}) + ({}) = 0",
            signed_sum(&[(a.clone(), "x^2"), (split.p.clone(), "x")]),
            signed_sum(&[(split.q.clone(), "x"), (c.clone(), "")]),
        )],
    );

    let common = format!("({})", linear(root_a, &signed_root_c));
    let first_suffix = format!("x{}", common);
    sequence.push(
        StepKind::FactorGroups,
        format!(
            "Write a = {} as ({})^2 and c = {} as ({})^2; both groups share {}.",
            a, root_a, c, root_c, common
        ),
        [
            format!("{} = ({})^2, {} = ({})^2", a, root_a, c, root_c),
            format!(
                "{} = 0",
                signed_sum(&[
                    (root_a.clone(), first_suffix.as_str()),
                    (signed_root_c.clone(), common.as_str()),
                ])
            ),
        ],
    );

    sequence.push(
        StepKind::FactorCommonBinomial,
        format!("Factor out the common binomial {}.", common),
        [
            format!("{}{} = 0", common, common),
            format!("{}^2 = 0", common),
        ],
    );

    sequence.push(
        StepKind::ZeroProduct,
        "Take the square root of both sides.",
        [format!("{} = 0", linear(root_a, &signed_root_c))],
    );

    let root = (-signed_root_c.clone()).checked_div(root_a)?;
    let minus = if *sign_b == T::one() { "-" } else { "" };
    let unsimplified = format!("x = {}{}", minus, fraction(root_c, root_a));
    sequence.push(
        StepKind::SolveLinear,
        "Solve the linear equation; the root is repeated.",
        [
            format!("{} = {}", linear(root_a, &T::zero()), -signed_root_c),
            unsimplified.clone(),
        ],
    );

    if settings.rationalize && !root_a.is_rational() {
        sequence.push(
            StepKind::Rationalize,
            format!("Multiply the numerator and denominator by {}.", root_a),
            [
                format!("{} · {}/{}", unsimplified, root_a, root_a),
                format!("x = {}{}", minus, fraction(&(root_c.clone() * root_a.clone()), a)),
                format!("x = {}", root),
            ],
        );
    }

    sequence.push(
        StepKind::FinalAnswer,
        "The equation has one repeated root.",
        [format!("x = {} (repeated)", root)],
    );
    Some(())
}
