use super::lexer::Token;
use crate::errors::{SolveError, SolveResult};

/// Parsed coefficient expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Ast {
    Number(String),
    Symbol(String),
    Negate(Box<Ast>),
    Binary {
        op: BinaryOp,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
    Call {
        name: String,
        args: Vec<Ast>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn from_token(token: &Token) -> Option<BinaryOp> {
        match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::Caret => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div => 20,
            BinaryOp::Pow => 30,
        }
    }

    fn is_right_associative(self) -> bool {
        self == BinaryOp::Pow
    }
}

/// Unary minus sits between Mul (20) and Pow (30): -2^2 is -(2^2)
const UNARY_PRECEDENCE: u8 = 25;

/// Parse tokens into an AST using Pratt parsing.
///
/// `source` is the original input text, used for error messages.
pub(crate) fn parse_expression(tokens: &[Token], source: &str) -> SolveResult<Ast> {
    let mut parser = Parser { tokens, pos: 0, source };
    let ast = parser.parse_expr(0)?;

    if let Some(token) = parser.current() {
        return Err(parser.error(format!("unexpected '{}'", token)));
    }
    Ok(ast)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, reason: impl Into<String>) -> SolveError {
        SolveError::invalid_syntax("coefficient", self.source, reason)
    }

    fn expect_right_paren(&mut self) -> SolveResult<()> {
        match self.current() {
            Some(Token::RightParen) => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(self.error(format!("expected ')' but found '{}'", token))),
            None => Err(self.error("missing closing parenthesis")),
        }
    }

    fn parse_expr(&mut self, min_precedence: u8) -> SolveResult<Ast> {
        let mut left = self.parse_prefix()?;

        while let Some(op) = self.current().and_then(BinaryOp::from_token) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let next_min = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_expr(next_min)?;
            left = Ast::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> SolveResult<Ast> {
        let token = self
            .current()
            .ok_or_else(|| self.error("unexpected end of input"))?;

        match token {
            Token::Number(text) => {
                self.advance();
                Ok(Ast::Number(text.clone()))
            }

            Token::Identifier(name) => {
                self.advance();
                if let Some(Token::LeftParen) = self.current() {
                    self.advance();
                    // No argument separator: every call takes one argument
                    let args = vec![self.parse_expr(0)?];
                    self.expect_right_paren()?;
                    Ok(Ast::Call {
                        name: name.clone(),
                        args,
                    })
                } else {
                    Ok(Ast::Symbol(name.clone()))
                }
            }

            Token::Minus => {
                self.advance();
                let operand = self.parse_expr(UNARY_PRECEDENCE)?;
                Ok(Ast::Negate(Box::new(operand)))
            }

            Token::Plus => {
                self.advance();
                self.parse_expr(UNARY_PRECEDENCE)
            }

            Token::LeftParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect_right_paren()?;
                Ok(inner)
            }

            other => Err(self.error(format!("unexpected '{}'", other))),
        }
    }
}
