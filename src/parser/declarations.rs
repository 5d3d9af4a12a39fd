//! Declaration parsing implementation
//!
//! This module handles parsing of:
//! - Variable declarations: `let [ref] [const] a, ...rest = value`
//! - Function definitions: `func name(a, ref b, ...rest) -> body` and the
//!   paren-less form `func a, b -> body`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::error::{Error, ErrorKind};
use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::Parser;

impl Parser<'_> {
    /// Parse `let` declaration
    pub(crate) fn parse_assign(&mut self) -> Result<Node, Error> {
        let token = self.expect_keyword(Keyword::Let, "Expected 'let'")?;
        let shared = self.parse_var_flags()?;

        let mut vars = Vec::new();
        loop {
            if self.match_operator(Operator::Assign)? {
                break;
            }

            let variable = self.parse_variable(shared, "Expected variable name")?;
            vars.push(variable);

            if self.match_operator(Operator::Assign)? {
                break;
            }
            self.expect_token(
                TokenKind::Comma,
                "Expected ',' or '=' in variable declaration",
            )?;
        }

        match vars.first() {
            None => {
                return Err(self.error_at(
                    ErrorKind::Declaration,
                    &token,
                    "No variable name provided",
                ))
            }
            Some(first) if first.is_packed() => {
                return Err(self.error_at(
                    ErrorKind::Declaration,
                    &first.token,
                    format!("First declared variable '{}' cannot be packed", first.name),
                ))
            }
            Some(_) => {}
        }

        self.skip_newlines()?;
        let value = self.parse_statement(0)?;

        Ok(Node::Assign {
            vars,
            value: Box::new(value),
            token,
        })
    }

    /// Parse function definition. At statement level an identifier right
    /// after `func` names the function, unless it is already the first
    /// parameter of the paren-less form.
    pub(crate) fn parse_function(&mut self, statement: bool) -> Result<Node, Error> {
        let token = self.expect_keyword(Keyword::Func, "Expected 'func'")?;

        let named = statement
            && self.check(TokenKind::Ident)
            && !matches!(self.peek()?.kind, TokenKind::Comma | TokenKind::Arrow);
        let name = if named {
            Some(self.advance()?.text)
        } else {
            None
        };

        let parenthesized = self.match_token(TokenKind::LParen)?;
        let closing = if parenthesized {
            TokenKind::RParen
        } else {
            TokenKind::Arrow
        };

        let mut params = Vec::new();
        loop {
            if self.match_token(closing)? {
                break;
            }

            params.push(self.parse_variable(VarFlags::empty(), "Expected parameter name")?);

            if self.match_token(closing)? {
                break;
            }
            self.expect_token(TokenKind::Comma, "Expected ',' between parameters")?;
        }

        if parenthesized {
            self.match_token(TokenKind::Arrow)?;
        }
        let body = self.parse_expr()?;

        Ok(Node::Function {
            name,
            params,
            body: Box::new(body),
            token,
        })
    }

    /// Parse one declared name with its own modifiers: `[ref] [const] [...]name`
    fn parse_variable(&mut self, inherited: VarFlags, message: &str) -> Result<Variable, Error> {
        let mut flags = inherited | self.parse_var_flags()?;
        if self.match_operator(Operator::Ellipsis)? {
            flags |= VarFlags::PACKED;
        }

        let name = self.expect_identifier(message)?;
        Ok(Variable::new(name, flags))
    }

    /// Parse any run of `ref` / `const` modifiers, in either order
    fn parse_var_flags(&mut self) -> Result<VarFlags, Error> {
        let mut flags = VarFlags::empty();
        loop {
            if self.match_keyword(Keyword::Ref)? {
                flags |= VarFlags::REF;
            } else if self.match_keyword(Keyword::Const)? {
                flags |= VarFlags::CONST;
            } else {
                return Ok(flags);
            }
        }
    }
}
