//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` between tokens where multiplication is implied, e.g.
//! `2sqrt(3)` → `2 * sqrt(3)` and `(1)(2)` → `(1) * (2)`.

use super::lexer::Token;

/// Names that take a parenthesized argument instead of multiplying it
const FUNCTIONS: &[&str] = &["sqrt"];

fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token, next: &Token) -> bool {
    match (current, next) {
        // sqrt( is a call, any other identifier before ( multiplies
        (Token::Identifier(name), Token::LeftParen) => !is_function(name),

        // Number * Identifier: 2sqrt(3), 2x
        // Identifier * Identifier: a b
        // ) * Identifier: (1)sqrt(2)
        // Number * (: 2(3)
        // ) * (: (1)(2)
        // Identifier * Number: x2
        // ) * Number: )5
        (Token::Number(_) | Token::Identifier(_) | Token::RightParen, Token::Identifier(_))
        | (Token::Number(_) | Token::RightParen, Token::LeftParen)
        | (Token::Identifier(_) | Token::RightParen, Token::Number(_)) => true,

        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let needs_insertion = tokens.windows(2).any(|w| should_insert_mul(&w[0], &w[1]));
    if !needs_insertion {
        return tokens;
    }

    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let needs_mul = it.peek().is_some_and(|next| should_insert_mul(&current, next));

        result.push(current);
        if needs_mul {
            result.push(Token::Star);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_function() {
        let tokens = vec![
            Token::Number("2".into()),
            Token::Identifier("sqrt".into()),
            Token::LeftParen,
            Token::Number("3".into()),
            Token::RightParen,
        ];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result.len(), 6);
        assert_eq!(result[1], Token::Star);
        // No multiplication between sqrt and its argument
        assert_eq!(result[3], Token::LeftParen);
    }

    #[test]
    fn test_paren_number() {
        let tokens = vec![Token::RightParen, Token::Number("5".into())];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result, vec![Token::RightParen, Token::Star, Token::Number("5".into())]);
    }

    #[test]
    fn test_adjacent_groups() {
        let tokens = vec![Token::RightParen, Token::LeftParen];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result.len(), 3);
        assert_eq!(result[1], Token::Star);
    }

    #[test]
    fn test_identifier_call_is_multiplication() {
        let tokens = vec![Token::Identifier("x".into()), Token::LeftParen];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result[1], Token::Star);
    }

    #[test]
    fn test_no_insertion_needed() {
        let tokens = vec![Token::Number("1".into()), Token::Plus, Token::Number("2".into())];
        let result = insert_implicit_multiplication(tokens.clone());
        assert_eq!(result, tokens);
    }
}
