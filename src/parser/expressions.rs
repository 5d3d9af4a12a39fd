//! Expression parsing implementation
//!
//! Operator expressions are parsed by precedence climbing: one operand, then
//! every following binary operator that binds at least as tightly as the
//! caller's minimum. Operands are prefix unary expressions, parenthesized
//! sub-expressions, or leaves.
//!
//! # Precedence
//!
//! Lowest to highest, see [`Operator::precedence`]:
//!
//! ```text
//! = :=   (right)
//! ||
//! &&
//! |
//! ^
//! &
//! == !=
//! > < >= <=
//! << >>
//! + -
//! * / %
//! .
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::error::{Error, ErrorKind};
use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::Parser;

impl Parser<'_> {
    /// Parse an operator expression whose operators all bind at least as
    /// tightly as `min_prec`.
    pub(crate) fn parse_statement(&mut self, min_prec: u8) -> Result<Node, Error> {
        self.nested(|p| {
            let mut chained = 0;
            let result = p.parse_operators(min_prec, &mut chained);
            p.release(chained);
            result
        })
    }

    /// Precedence-climbing loop. Each binary node built here holds one level
    /// of depth until the enclosing [`Parser::parse_statement`] returns, so a
    /// long left-associative chain is bounded like nested parentheses.
    fn parse_operators(&mut self, min_prec: u8, chained: &mut usize) -> Result<Node, Error> {
        let mut left = self.parse_positional()?;

        while let TokenKind::Operator(op) = self.current.kind {
            match op {
                Operator::Assign => {
                    return Err(
                        self.syntax_error("'=' is only allowed in a variable declaration")
                    )
                }
                Operator::Ellipsis => {
                    return Err(self.syntax_error("Illegal varargs '...' operator"))
                }
                _ => {}
            }

            let Some(prec) = op.precedence() else { break };
            if prec < min_prec {
                break;
            }

            let token = self.advance()?;
            let next_prec = match op.assoc() {
                Assoc::Left => prec + 1,
                Assoc::Right => prec,
            };

            self.skip_newlines()?;
            let right = self.parse_statement(next_prec)?;

            self.deepen()?;
            *chained += 1;
            left = Node::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                token,
            };
        }

        Ok(left)
    }

    /// Parse prefix unary, parenthesized expression, or leaf
    pub(crate) fn parse_positional(&mut self) -> Result<Node, Error> {
        if let TokenKind::Operator(op) = self.current.kind {
            if op.is_prefix() {
                let token = self.advance()?;
                let prec = op.precedence().unwrap_or(0);
                let operand = self.parse_statement(prec)?;
                return Ok(Node::Unary {
                    op,
                    operand: Box::new(operand),
                    token,
                });
            }
        }

        let kind = self.current.kind;
        match kind {
            TokenKind::LParen => {
                self.advance()?;
                self.skip_newlines()?;
                let value = self.parse_statement(0)?;
                self.skip_newlines()?;
                self.expect_token(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(value)
            }
            TokenKind::Ident if self.peek()?.is(TokenKind::LParen) => self.parse_call(),
            TokenKind::Ident
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::Keyword(Keyword::Null)
            | TokenKind::Keyword(Keyword::This) => self.parse_constant(),
            TokenKind::Keyword(Keyword::Func) => self.parse_function(false),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(keyword) => Err(self.source.error(
                ErrorKind::Syntax,
                self.current_location(),
                format!("Unexpected keyword '{}'", keyword.as_str()),
            )),
            _ => Err(self.syntax_error("Expected expression")),
        }
    }

    /// Parse a literal, identifier, `null` or `this`
    pub(crate) fn parse_constant(&mut self) -> Result<Node, Error> {
        let token = self.advance()?;

        let value = match token.kind {
            TokenKind::String => Constant::String(token.text.clone()),
            TokenKind::Ident => Constant::Ident(token.text.clone()),
            TokenKind::Keyword(Keyword::Null) => Constant::Null,
            TokenKind::Keyword(Keyword::This) => Constant::This,
            TokenKind::Number if token.text.contains('.') => match token.text.parse() {
                Ok(value) => Constant::Float(value),
                Err(_) => {
                    return Err(self.error_at(
                        ErrorKind::Lex,
                        &token,
                        format!("Invalid float literal {}", token.text),
                    ))
                }
            },
            TokenKind::Number => match token.text.parse() {
                Ok(value) => Constant::Int(value),
                Err(_) => {
                    return Err(self.error_at(
                        ErrorKind::Lex,
                        &token,
                        format!("Invalid integer literal {}", token.text),
                    ))
                }
            },
            _ => {
                return Err(self.error_at(
                    ErrorKind::Syntax,
                    &token,
                    format!("Expected expression, found {}", token),
                ))
            }
        };

        Ok(Node::Constant { value, token })
    }

    /// Parse function call: `name(arg, ...)`
    pub(crate) fn parse_call(&mut self) -> Result<Node, Error> {
        let token = self.expect_identifier("Expected function name")?;
        self.expect_token(TokenKind::LParen, "Expected '(' after function name")?;

        let mut args = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.match_token(TokenKind::RParen)? {
                break;
            }

            args.push(self.parse_statement(0)?);

            self.skip_newlines()?;
            if self.match_token(TokenKind::RParen)? {
                break;
            }
            self.expect_token(TokenKind::Comma, "Expected ',' or ')' in argument list")?;
        }

        Ok(Node::Call {
            name: token.text.clone(),
            args,
            token,
        })
    }
}
