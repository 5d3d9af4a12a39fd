//! Statement parsing implementation
//!
//! This module handles the keyword-led forms of rath:
//!
//! - Blocks: `{ ... }`
//! - Conditionals: `if (cond) body else other`, `if cond then body`
//! - Switches: `switch x -> { case 1 case 2 -> a  case y when y > 3 -> b }`
//! - Returns: `return value`
//!
//! # Grammar
//!
//! ```text
//! expr      ::= block | let_decl | func_def | if_expr | switch_expr
//!             | return_stmt | statement
//! if_expr   ::= 'if' ( '(' statement ')' | statement ) [ 'then' | '->' ] expr
//!               [ 'else' expr ]
//! switch    ::= 'switch' statement [ '->' ] '{' case* '}'
//! case      ::= 'case' case_test ( 'case' case_test )* '->' expr
//! case_test ::= statement [ 'when' statement ]
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::error::Error;
use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::Parser;

impl Parser<'_> {
    /// Parse one statement (top-level entry point for a statement slot)
    pub(crate) fn parse_expr(&mut self) -> Result<Node, Error> {
        self.nested(|p| {
            p.skip_newlines()?;

            match p.current.kind {
                TokenKind::LCurly => p.parse_block(),
                TokenKind::Keyword(Keyword::Let) => p.parse_assign(),
                TokenKind::Keyword(Keyword::Func) => p.parse_function(true),
                TokenKind::Keyword(Keyword::If) => p.parse_if(),
                TokenKind::Keyword(Keyword::Switch) => p.parse_switch(),
                TokenKind::Keyword(Keyword::Return) => p.parse_return(),
                _ => p.parse_statement(0),
            }
        })
    }

    /// Parse block: `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Node, Error> {
        let token = self.expect_token(TokenKind::LCurly, "Expected '{'")?;
        let body = self.parse_statements(TokenKind::RCurly)?;
        self.expect_token(TokenKind::RCurly, "Expected '}' to close block")?;

        Ok(Node::Block { body, token })
    }

    /// Parse conditional
    pub(crate) fn parse_if(&mut self) -> Result<Node, Error> {
        let token = self.expect_keyword(Keyword::If, "Expected 'if'")?;

        let parenthesized = self.match_token(TokenKind::LParen)?;
        if parenthesized {
            self.skip_newlines()?;
        }
        let condition = self.parse_statement(0)?;
        if parenthesized {
            self.skip_newlines()?;
            self.expect_token(TokenKind::RParen, "Expected ')' after if condition")?;
        }

        // A bare condition needs an explicit separator before the body.
        if !self.match_keyword(Keyword::Then)? {
            if parenthesized {
                self.match_token(TokenKind::Arrow)?;
            } else {
                self.expect_token(TokenKind::Arrow, "Expected 'then' or '->' after if condition")?;
            }
        }

        let body = self.parse_expr()?;

        if self.check(TokenKind::Newline) && self.peek()?.is_keyword(Keyword::Else) {
            self.advance()?;
        }
        let else_body = if self.match_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        Ok(Node::If {
            condition: Box::new(condition),
            body: Box::new(body),
            else_body,
            token,
        })
    }

    /// Parse switch. The scrutinee is owned here, once; implicit case tests
    /// only store their bound value.
    pub(crate) fn parse_switch(&mut self) -> Result<Node, Error> {
        let token = self.expect_keyword(Keyword::Switch, "Expected 'switch'")?;
        let scrutinee = self.parse_statement(0)?;

        self.match_token(TokenKind::Arrow)?;
        self.skip_newlines()?;
        self.expect_token(TokenKind::LCurly, "Expected '{' to open switch body")?;

        let mut cases = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.match_token(TokenKind::RCurly)? {
                break;
            }
            cases.push(self.parse_case()?);
        }

        Ok(Node::Switch {
            scrutinee: Box::new(scrutinee),
            cases,
            token,
        })
    }

    /// Parse one switch arm. Consecutive `case` clauses before a single `->`
    /// are joined with logical OR.
    pub(crate) fn parse_case(&mut self) -> Result<Case, Error> {
        let token = self.expect_keyword(Keyword::Case, "Expected 'case' in switch body")?;

        let test = self.parse_case_test()?;
        let condition_token = test.token().clone();
        self.skip_newlines()?;

        // Each joined clause nests the test one level deeper.
        let mut chained = 0;
        let joined = self.parse_case_chain(test, &mut chained);
        self.release(chained);
        let test = joined?;

        self.expect_token(TokenKind::Arrow, "Expected '->' after case condition")?;
        let body = self.parse_expr()?;

        Ok(Case {
            condition: CaseCondition {
                test,
                token: condition_token,
            },
            body: Box::new(body),
            token,
        })
    }

    /// Join further `case` clauses onto `test`. The joined node carries the
    /// token of the value it adds.
    fn parse_case_chain(
        &mut self,
        mut test: CaseTest,
        chained: &mut usize,
    ) -> Result<CaseTest, Error> {
        while self.check_keyword(Keyword::Case) {
            self.advance()?;
            let right = self.parse_case_test()?;

            self.deepen()?;
            *chained += 1;
            test = CaseTest::Either {
                token: right.value().token().clone(),
                left: Box::new(test),
                right: Box::new(right),
            };
            self.skip_newlines()?;
        }

        Ok(test)
    }

    /// Parse `value` or `value when guard`
    pub(crate) fn parse_case_test(&mut self) -> Result<CaseTest, Error> {
        let value = self.parse_statement(0)?;

        if self.check_keyword(Keyword::When) {
            let token = self.advance()?;
            let guard = self.parse_statement(0)?;
            Ok(CaseTest::Guard {
                value: Box::new(value),
                guard: Box::new(guard),
                token,
            })
        } else {
            Ok(CaseTest::Equals {
                token: value.token().clone(),
                value: Box::new(value),
            })
        }
    }

    /// Parse return; the value is omitted when the statement ends right away
    pub(crate) fn parse_return(&mut self) -> Result<Node, Error> {
        let token = self.expect_keyword(Keyword::Return, "Expected 'return'")?;

        let ends_here = matches!(
            self.current.kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RCurly | TokenKind::Eof
        );
        let value = if ends_here {
            None
        } else {
            Some(Box::new(self.parse_statement(0)?))
        };

        Ok(Node::Return { value, token })
    }
}
