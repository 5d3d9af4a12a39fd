//! Token lookahead buffer
//!
//! The lexer only moves forward. [`TokenStream`] sits between it and the
//! parser and keeps a FIFO of tokens that were pulled for a peek but not yet
//! consumed, so the parser can look arbitrarily far ahead without rescanning.

use super::lexer::{Lexer, Token};
use crate::error::Error;
use std::collections::VecDeque;

pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    pending: VecDeque<Token>,
}

impl<'src> TokenStream<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            pending: VecDeque::new(),
        }
    }

    /// Consume the next token, draining peeked tokens first.
    pub fn next(&mut self) -> Result<Token, Error> {
        match self.pending.pop_front() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Result<&Token, Error> {
        self.peek_nth(0)
    }

    /// Look `n` tokens past the next one (`peek_nth(0)` is `peek`)
    pub fn peek_nth(&mut self, n: usize) -> Result<&Token, Error> {
        while self.pending.len() <= n {
            let token = self.lexer.next_token()?;
            self.pending.push_back(token);
        }
        Ok(&self.pending[n])
    }
}
