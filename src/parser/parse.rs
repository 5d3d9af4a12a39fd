//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token navigation helpers, the statement-list loop shared by blocks and the
//! top level, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: blocks, `if`, `switch`/`case`, `return`
//! - `declarations`: `let` declarations and `func` definitions
//! - `expressions`: operator expressions with precedence climbing, leaves, calls
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Tokens are pulled from the lexer on demand. `current` always holds the next
//! unconsumed token; further lookahead goes through the [`TokenStream`].

use crate::error::{Error, ErrorKind};
use crate::parser::ast::*;
use crate::parser::config::ParserConfig;
use crate::parser::lexer::{Keyword, Lexer, Token, TokenKind};
use crate::parser::lookahead::TokenStream;
use crate::source::SourceFile;
use tracing::{debug, trace};

/// Recursive descent parser for rath
pub struct Parser<'src> {
    pub(crate) source: &'src SourceFile,
    tokens: TokenStream<'src>,
    pub(crate) current: Token,
    depth: usize,
    max_depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src SourceFile) -> Result<Self, Error> {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &'src SourceFile, config: ParserConfig) -> Result<Self, Error> {
        let mut tokens = TokenStream::new(Lexer::new(source));
        let current = tokens.next()?;
        Ok(Self {
            source,
            tokens,
            current,
            depth: 0,
            max_depth: config.max_depth,
        })
    }

    /// Parse the whole input.
    ///
    /// Returns `None` when the input holds no statements. A single statement
    /// is returned as-is; several are wrapped in a [`Node::Block`].
    pub fn parse(&mut self) -> Result<Option<Node>, Error> {
        debug!(file = self.source.name(), "parsing");

        let mut body = self.parse_statements(TokenKind::Eof)?;
        let root = match body.len() {
            0 => None,
            1 => body.pop(),
            _ => Some(Node::Block {
                token: body[0].token().clone(),
                body,
            }),
        };

        debug!(
            file = self.source.name(),
            empty = root.is_none(),
            "parse finished"
        );
        Ok(root)
    }

    /// Parse statements until `closing` is the current token. The closing
    /// token itself is left for the caller.
    pub(crate) fn parse_statements(&mut self, closing: TokenKind) -> Result<Vec<Node>, Error> {
        let mut body = Vec::new();

        loop {
            self.skip_newlines()?;
            while self.match_token(TokenKind::Semicolon)? {
                self.skip_newlines()?;
            }

            if self.check(closing) {
                break;
            }
            if self.check(TokenKind::Eof) {
                return Err(self.syntax_error("Expected '}' to close block"));
            }

            let statement = self.parse_expr()?;
            trace!(line = statement.location().line, "parsed statement");

            let expects_end = statement.expects_end();
            body.push(statement);

            if self.check(closing) {
                break;
            }
            if expects_end && !self.check(TokenKind::Eof) {
                self.consume_end()?;
            }
        }

        Ok(body)
    }

    /// Consume the newline or `;` that terminates a statement
    pub(crate) fn consume_end(&mut self) -> Result<(), Error> {
        if self.match_token(TokenKind::Newline)? || self.match_token(TokenKind::Semicolon)? {
            Ok(())
        } else {
            Err(self.syntax_error("Expected newline or ';' after statement"))
        }
    }

    /// Run `parse` one nesting level deeper, failing once the configured
    /// maximum depth is reached.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.deepen()?;
        let result = parse(self);
        self.release(1);
        result
    }

    /// Claim one level of nesting. Every claimed level must be given back
    /// with [`Parser::release`].
    pub(crate) fn deepen(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(self.source.error(
                ErrorKind::Syntax,
                self.current_location(),
                format!(
                    "Expression nesting exceeds maximum depth of {}",
                    self.max_depth
                ),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub(crate) fn release(&mut self, levels: usize) {
        self.depth -= levels;
    }

    // ===== Helper methods =====

    /// Consume the current token and return it
    pub(crate) fn advance(&mut self) -> Result<Token, Error> {
        let next = self.tokens.next()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Look at the token after `current`
    pub(crate) fn peek(&mut self) -> Result<&Token, Error> {
        self.tokens.peek()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.is_keyword(keyword)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> Result<bool, Error> {
        self.match_token(TokenKind::Keyword(keyword))
    }

    pub(crate) fn match_operator(&mut self, op: Operator) -> Result<bool, Error> {
        self.match_token(TokenKind::Operator(op))
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.syntax_error(message))
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        keyword: Keyword,
        message: &str,
    ) -> Result<Token, Error> {
        self.expect_token(TokenKind::Keyword(keyword), message)
    }

    pub(crate) fn expect_identifier(&mut self, message: &str) -> Result<Token, Error> {
        self.expect_token(TokenKind::Ident, message)
    }

    pub(crate) fn skip_newlines(&mut self) -> Result<(), Error> {
        while self.match_token(TokenKind::Newline)? {}
        Ok(())
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Syntax error at the current token; the token is named in the message
    pub(crate) fn syntax_error(&self, message: &str) -> Error {
        self.source.error(
            ErrorKind::Syntax,
            self.current_location(),
            format!("{}, found {}", message, self.current),
        )
    }

    pub(crate) fn error_at(&self, kind: ErrorKind, token: &Token, message: impl Into<String>) -> Error {
        self.source.error(kind, token.location, message)
    }
}
