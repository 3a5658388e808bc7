//! Shorthand canonicalization and tokenization of coefficient text.

use std::fmt;

use crate::errors::{SolveError, SolveResult};

/// Lexical token of a coefficient expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Decimal literal, kept as written so it can be read exactly
    Number(String),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// Exponentiation, written `^` or `**`
    Caret,
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) | Token::Identifier(text) => write!(f, "{}", text),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

fn starts_with_sqrt(chars: &[char], at: usize) -> bool {
    chars.len() >= at + 4 && chars[at..at + 4] == ['s', 'q', 'r', 't']
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Length of a scientific-notation suffix (`e5`, `E-3`, `e+12`) at the
/// start of `rest`, or 0 if there is none
fn exponent_suffix_len(rest: &[char]) -> usize {
    if !matches!(rest.first(), Some('e' | 'E')) {
        return 0;
    }
    let sign = usize::from(matches!(rest.get(1), Some('+' | '-')));
    let digits = rest[1 + sign..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

/// Rewrite shorthand radicals into call form.
///
/// `sqrt2` → `sqrt(2)`, `sqrt 2.5` → `sqrt(2.5)`, `√3` → `sqrt(3)`,
/// `√(x)` → `sqrt(x)`. Everything else is copied unchanged.
pub(crate) fn canonicalize_shorthand(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let after = if chars[i] == '√' {
            i + 1
        } else if starts_with_sqrt(&chars, i) && (i == 0 || !chars[i - 1].is_alphabetic()) {
            i + 4
        } else {
            out.push(chars[i]);
            i += 1;
            continue;
        };

        let mut j = after;
        while j < chars.len() && chars[j] == ' ' {
            j += 1;
        }
        if j < chars.len() && is_number_char(chars[j]) {
            let start = j;
            while j < chars.len() && is_number_char(chars[j]) {
                j += 1;
            }
            out.push_str("sqrt(");
            out.extend(&chars[start..j]);
            out.push(')');
            i = j;
        } else {
            out.push_str("sqrt");
            i = after;
        }
    }

    out
}

/// Split canonical text into tokens. `source` is the original input, used
/// for error messages.
pub(crate) fn lex(input: &str, source: &str) -> SolveResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => {
                i += 1;
            }
            _ if is_number_char(c) => {
                let start = i;
                while i < chars.len() && is_number_char(chars[i]) {
                    i += 1;
                }
                let mantissa: String = chars[start..i].iter().collect();
                if mantissa == "." || mantissa.matches('.').count() > 1 {
                    return Err(SolveError::invalid_syntax(
                        "coefficient",
                        source,
                        format!("malformed number '{}'", mantissa),
                    ));
                }
                i += exponent_suffix_len(&chars[i..]);
                tokens.push(Token::Number(chars[start..i].iter().collect()));
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphabetic() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Identifier(chars[start..i].iter().collect()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Caret);
                i += 2;
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' | '−' => Token::Minus,
                    '*' | '×' | '·' => Token::Star,
                    '/' | '÷' => Token::Slash,
                    '^' => Token::Caret,
                    '(' | '[' => Token::LeftParen,
                    ')' | ']' => Token::RightParen,
                    other => {
                        return Err(SolveError::invalid_syntax(
                            "coefficient",
                            source,
                            format!("unexpected character '{}'", other),
                        ))
                    }
                };
                tokens.push(token);
                i += 1;
            }
        }
    }

    Ok(tokens)
}
