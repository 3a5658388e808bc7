//! Plain-text rendering helpers shared by the step derivers.
//!
//! Output is ordinary algebra (`x^2 - 5x + 6`, `sqrt(2)x`, `(x - 2)^2`);
//! turning it into markup is left to the presentation layer.

use crate::domain::{Scalar, Sign};

/// One coefficient with its suffix, e.g. `(-5, "x")` or `(2, "(x + 3)")`
fn term_body<T: Scalar>(magnitude: &T, suffix: &str) -> String {
    let text = magnitude.to_string();
    if !magnitude.is_atomic() {
        return format!("({}){}", text, suffix);
    }
    if suffix.is_empty() {
        return text;
    }
    // 1x reads as x, but 1(x + 3) keeps its factor visible
    if *magnitude == T::one() && !suffix.starts_with('(') {
        return suffix.to_string();
    }
    if text.contains('/') {
        format!("({}){}", text, suffix)
    } else {
        format!("{}{}", text, suffix)
    }
}

/// Join signed terms into a sum, dropping zero coefficients.
///
/// ```rust
/// use quad_core::domain::{Scalar, Surd};
/// use quad_core::format::signed_sum;
///
/// let text = signed_sum(&[
///     (Surd::from_integer(1), "x^2"),
///     (Surd::from_integer(-5), "x"),
///     (Surd::from_integer(6), ""),
/// ]);
/// assert_eq!(text, "x^2 - 5x + 6");
/// ```
pub fn signed_sum<T: Scalar>(terms: &[(T, &str)]) -> String {
    let mut out = String::new();
    for (coefficient, suffix) in terms {
        if coefficient.is_zero() {
            continue;
        }
        let negative = coefficient.is_atomic() && coefficient.sign() == Sign::Negative;
        let magnitude = if negative { -coefficient.clone() } else { coefficient.clone() };
        let body = term_body(&magnitude, suffix);
        match (out.is_empty(), negative) {
            (true, true) => {
                out.push('-');
                out.push_str(&body);
            }
            (true, false) => out.push_str(&body),
            (false, true) => {
                out.push_str(" - ");
                out.push_str(&body);
            }
            (false, false) => {
                out.push_str(" + ");
                out.push_str(&body);
            }
        }
    }
    if out.is_empty() {
        "0".to_string()
    } else {
        out
    }
}

/// `k·x + m` as text, e.g. `2x + 1`
pub fn linear<T: Scalar>(k: &T, m: &T) -> String {
    signed_sum(&[(k.clone(), "x"), (m.clone(), "")])
}

/// `(k·x + m)`; a bare `x` needs no parentheses
pub fn linear_factor<T: Scalar>(k: &T, m: &T) -> String {
    if m.is_zero() && *k == T::one() {
        "x".to_string()
    } else {
        format!("({})", linear(k, m))
    }
}

/// Value wrapped in parentheses unless it is a single non-negative term
pub fn wrapped<T: Scalar>(value: &T) -> String {
    if value.is_atomic() && value.sign() != Sign::Negative {
        value.to_string()
    } else {
        format!("({})", value)
    }
}

/// `num/den` left unsimplified, parenthesizing compound or fractional parts
pub fn fraction<T: Scalar>(num: &T, den: &T) -> String {
    let part = |v: &T| {
        let text = v.to_string();
        if v.is_atomic() && !text.contains('/') {
            text
        } else {
            paren(&text)
        }
    };
    format!("{}/{}", part(num), part(den))
}

/// Any displayable value, always parenthesized
pub fn paren(value: &impl std::fmt::Display) -> String {
    format!("({})", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Float, Surd};

    fn s(n: i64) -> Surd {
        Surd::from_integer(n)
    }

    #[test]
    fn test_signed_sum_basic() {
        assert_eq!(signed_sum(&[(s(1), "x^2"), (s(-5), "x"), (s(6), "")]), "x^2 - 5x + 6");
        assert_eq!(signed_sum(&[(s(-1), "x^2"), (s(0), "x"), (s(-6), "")]), "-x^2 - 6");
        assert_eq!(signed_sum::<Surd>(&[(s(0), "x"), (s(0), "")]), "0");
    }

    #[test]
    fn test_signed_sum_radicals_and_fractions() {
        let root_two = s(2).sqrt().unwrap();
        let half = Surd::from_ratio(1, 2).unwrap();
        assert_eq!(
            signed_sum(&[(root_two.clone(), "x^2"), (half, "x"), (s(1) - root_two, "")]),
            "sqrt(2)x^2 + (1/2)x + (1 - sqrt(2))"
        );
    }

    #[test]
    fn test_group_factor_keeps_unit_coefficient() {
        assert_eq!(signed_sum(&[(s(2), "x(x + 3)"), (s(1), "(x + 3)")]), "2x(x + 3) + 1(x + 3)");
    }

    #[test]
    fn test_linear_factor() {
        assert_eq!(linear_factor(&s(1), &s(-2)), "(x - 2)");
        assert_eq!(linear_factor(&s(2), &s(1)), "(2x + 1)");
        assert_eq!(linear_factor(&s(1), &s(0)), "x");
    }

    #[test]
    fn test_fraction() {
        let root_three = s(3).sqrt().unwrap();
        assert_eq!(fraction(&s(2), &root_three), "2/sqrt(3)");
        assert_eq!(fraction(&(s(1) + root_three), &Surd::from_ratio(1, 2).unwrap()), "(1 + sqrt(3))/(1/2)");
    }

    #[test]
    fn test_wrapped() {
        assert_eq!(wrapped(&s(6)), "6");
        assert_eq!(wrapped(&s(-6)), "(-6)");
        assert_eq!(wrapped(&Float(1.5)), "1.5");
    }
}
