//! # Input Normalizer
//!
//! Turns coefficient text into exact values. The pipeline is:
//!
//! 1. canonicalize shorthand radicals (`sqrt2` → `sqrt(2)`, `√3` → `sqrt(3)`)
//! 2. lex, mapping `^` and `**` to exponentiation
//! 3. insert implicit multiplication (`2sqrt(3)` → `2*sqrt(3)`, `)5` → `)*5`)
//! 4. Pratt-parse and evaluate in the exact [`Surd`] domain
//!
//! Empty input normalizes to zero. Decimal literals are read exactly
//! (`0.1` is `1/10`, `2.5e-3` is `1/400`).
//!
//! ## Example
//!
//! ```rust
//! use quad_core::normalize::normalize_exact;
//!
//! let value = normalize_exact("2sqrt8 - 1/2").unwrap();
//! assert_eq!(value.to_string(), "-1/2 + 4*sqrt(2)");
//! ```

mod implicit_mul;
mod lexer;
mod pratt;

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use crate::domain::{Scalar, Sign, Surd};
use crate::errors::{SolveError, SolveResult};
use pratt::{Ast, BinaryOp};

/// Largest exponent magnitude accepted in coefficient text
const MAX_EXPONENT: i64 = 64;

/// Largest power of ten accepted in scientific notation
const MAX_DECIMAL_EXPONENT: i64 = 308;

/// Largest estimated size of a power, in bits of any numerator,
/// denominator or radicand
const MAX_POWER_BITS: u64 = 4096;

fn syntax_error(source: &str, reason: impl Into<String>) -> SolveError {
    SolveError::invalid_syntax("coefficient", source, reason)
}

/// Parse coefficient text into an AST; `None` for blank input.
fn parse(raw: &str) -> SolveResult<Option<Ast>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let canonical = lexer::canonicalize_shorthand(raw);
    let tokens = lexer::lex(&canonical, raw)?;
    let tokens = implicit_mul::insert_implicit_multiplication(tokens);
    let ast = pratt::parse_expression(&tokens, raw)?;
    debug!("parsed coefficient {:?} as {:?}", raw, ast);
    Ok(Some(ast))
}

/// Normalize coefficient text into an exact value.
///
/// # Errors
///
/// `InvalidSyntax` for malformed text, the variable `x`, unknown names,
/// division by zero or square roots of negative numbers. `Unrepresentable`
/// when a nested radical does not simplify into the exact domain.
pub fn normalize_exact(raw: &str) -> SolveResult<Surd> {
    match parse(raw)? {
        Some(ast) => evaluate_exact(&ast, raw),
        None => Ok(Surd::zero()),
    }
}

/// Evaluate coefficient text in floating point.
///
/// Accepts the same notation as [`normalize_exact`]; used when an exact
/// solve has to fall back to the float domain.
pub fn approximate(raw: &str) -> SolveResult<f64> {
    let value = match parse(raw)? {
        Some(ast) => evaluate_f64(&ast, raw)?,
        None => 0.0,
    };
    if !value.is_finite() {
        return Err(syntax_error(raw, "value is not finite"));
    }
    Ok(value)
}

/// Read a decimal literal (`12`, `2.5`, `.5`, `3.`, `1e-3`) as an exact
/// rational
fn parse_decimal(text: &str, source: &str) -> SolveResult<BigRational> {
    let malformed = || syntax_error(source, format!("malformed number '{}'", text));
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().map_err(|_| malformed())?),
        None => (text, 0),
    };
    if exponent.abs() > MAX_DECIMAL_EXPONENT {
        return Err(syntax_error(source, format!("exponent {} is too large", exponent)));
    }

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(malformed());
    }
    let digits = format!("{}{}", whole, fraction);
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(malformed)?;
    // Both shifts are bounded by MAX_DECIMAL_EXPONENT plus the literal's length
    let shift = exponent - fraction.len() as i64;
    let scale = num_traits::pow(BigInt::from(10), shift.unsigned_abs() as usize);
    Ok(if shift >= 0 {
        BigRational::from_integer(numer * scale)
    } else {
        BigRational::new(numer, scale)
    })
}

fn check_symbol(name: &str, source: &str) -> SolveError {
    if name.eq_ignore_ascii_case("x") {
        syntax_error(source, "coefficients must not contain the variable x")
    } else {
        syntax_error(source, format!("unknown symbol '{}'", name))
    }
}

fn check_call<'a>(name: &str, args: &'a [Ast], source: &str) -> SolveResult<&'a Ast> {
    if name != "sqrt" {
        return Err(syntax_error(source, format!("unknown function '{}'", name)));
    }
    match args {
        [arg] => Ok(arg),
        _ => Err(syntax_error(source, "sqrt takes exactly one argument")),
    }
}

fn evaluate_exact(ast: &Ast, source: &str) -> SolveResult<Surd> {
    match ast {
        Ast::Number(text) => parse_decimal(text, source).map(Surd::from_rational),
        Ast::Symbol(name) => Err(check_symbol(name, source)),
        Ast::Negate(inner) => Ok(-evaluate_exact(inner, source)?),
        Ast::Binary { op, lhs, rhs } => {
            let left = evaluate_exact(lhs, source)?;
            let right = evaluate_exact(rhs, source)?;
            match op {
                BinaryOp::Add => Ok(left + right),
                BinaryOp::Sub => Ok(left - right),
                BinaryOp::Mul => Ok(left * right),
                BinaryOp::Div => left
                    .checked_div(&right)
                    .ok_or_else(|| syntax_error(source, "division by zero")),
                BinaryOp::Pow => exact_power(&left, &right, source),
            }
        }
        Ast::Call { name, args } => {
            let arg = check_call(name, args, source)?;
            let value = evaluate_exact(arg, source)?;
            if value.sign() == Sign::Negative {
                return Err(syntax_error(source, "square root of a negative number"));
            }
            value.sqrt()
        }
    }
}

/// Integer and half-integer exponents only
fn exact_power(base: &Surd, exponent: &Surd, source: &str) -> SolveResult<Surd> {
    let q = exponent
        .as_rational()
        .ok_or_else(|| syntax_error(source, "exponent must be rational"))?;
    let numer = q
        .numer()
        .to_i64()
        .filter(|n| n.abs() <= MAX_EXPONENT)
        .ok_or_else(|| syntax_error(source, format!("exponent {} is too large", q)))?;

    let (radix, power) = match q.denom().to_i64() {
        Some(1) => (base.clone(), numer),
        Some(2) => {
            if base.sign() == Sign::Negative {
                return Err(syntax_error(source, "square root of a negative number"));
            }
            (base.sqrt()?, numer)
        }
        _ => {
            return Err(syntax_error(
                source,
                "only integer and half-integer exponents are supported",
            ))
        }
    };

    let estimate = radix.bit_size().saturating_mul(power.unsigned_abs());
    if estimate > MAX_POWER_BITS {
        return Err(syntax_error(
            source,
            format!("power is too large (about {} bits)", estimate),
        ));
    }

    radix
        .pow_int(power)
        .ok_or_else(|| syntax_error(source, "division by zero"))
}

fn evaluate_f64(ast: &Ast, source: &str) -> SolveResult<f64> {
    match ast {
        Ast::Number(text) => text
            .parse::<f64>()
            .map_err(|_| syntax_error(source, format!("malformed number '{}'", text))),
        Ast::Symbol(name) => Err(check_symbol(name, source)),
        Ast::Negate(inner) => Ok(-evaluate_f64(inner, source)?),
        Ast::Binary { op, lhs, rhs } => {
            let left = evaluate_f64(lhs, source)?;
            let right = evaluate_f64(rhs, source)?;
            match op {
                BinaryOp::Add => Ok(left + right),
                BinaryOp::Sub => Ok(left - right),
                BinaryOp::Mul => Ok(left * right),
                BinaryOp::Div if right.is_zero() => Err(syntax_error(source, "division by zero")),
                BinaryOp::Div => Ok(left / right),
                BinaryOp::Pow => Ok(left.powf(right)),
            }
        }
        Ast::Call { name, args } => {
            let value = evaluate_f64(check_call(name, args, source)?, source)?;
            if value < 0.0 {
                return Err(syntax_error(source, "square root of a negative number"));
            }
            Ok(value.sqrt())
        }
    }
}
