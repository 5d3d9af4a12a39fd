//! Lexer (tokenizer) for rath source code
//!
//! Converts raw source text into [`Token`]s, one at a time, on demand from the
//! parser. The lexer never backtracks; lookahead is the job of
//! [`TokenStream`](super::lookahead::TokenStream).
//!
//! Whitespace is skipped, except that a run of whitespace containing a line
//! break yields a single [`TokenKind::Newline`], which the parser treats as a
//! statement terminator.

use super::ast::{Operator, SourceLocation};
use crate::error::{Error, ErrorKind};
use crate::source::SourceFile;
use std::fmt;

/// Characters that may appear in an operator lexeme
const OPERATOR_CHARS: &[u8] = b"+-*/%.:=<>|&^!";

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Switch,
    Case,
    When,
    If,
    Else,
    Then,
    Let,
    Open,
    Ref,
    Const,
    Return,
    Func,
    Null,
    This,
}

impl Keyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        let keyword = match ident {
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "when" => Keyword::When,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "then" => Keyword::Then,
            "let" => Keyword::Let,
            "open" => Keyword::Open,
            "ref" => Keyword::Ref,
            "const" => Keyword::Const,
            "return" => Keyword::Return,
            "func" => Keyword::Func,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::When => "when",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Then => "then",
            Keyword::Let => "let",
            Keyword::Open => "open",
            Keyword::Ref => "ref",
            Keyword::Const => "const",
            Keyword::Return => "return",
            Keyword::Func => "func",
            Keyword::Null => "null",
            Keyword::This => "this",
        }
    }
}

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Ident,
    String,
    Number,
    Keyword(Keyword),
    Operator(Operator),
    LParen,    // (
    RParen,    // )
    LCurly,    // {
    RCurly,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Arrow,     // ->
    Semicolon, // ;
    Newline,
}

/// A lexeme with its kind and position.
///
/// `text` is the raw lexeme, except for string literals where it holds the
/// contents between the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::String => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Number => write!(f, "number literal {}", self.text),
            TokenKind::Keyword(keyword) => write!(f, "keyword '{}'", keyword.as_str()),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op.symbol()),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LCurly => write!(f, "'{{'"),
            TokenKind::RCurly => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Newline => write!(f, "newline"),
        }
    }
}

/// Lexer for rath source code
pub struct Lexer<'src> {
    source: &'src SourceFile,
    input: &'src [u8],
    position: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer positioned at the start of `source`.
    pub fn new(source: &'src SourceFile) -> Self {
        Self {
            source,
            input: source.text().as_bytes(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input, ending with a single [`TokenKind::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Get next token. Once the input is exhausted every call returns
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(newline) = self.skip_whitespace() {
            return Ok(newline);
        }

        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", self.current_location()));
        };

        match ch {
            b'"' => self.string_literal(),
            b'0'..=b'9' => self.number_literal(),
            c if OPERATOR_CHARS.contains(&c) => self.operator(),
            c if is_ident_start(c) => Ok(self.identifier_or_keyword()),
            b'(' => Ok(self.punctuation(TokenKind::LParen)),
            b')' => Ok(self.punctuation(TokenKind::RParen)),
            b'{' => Ok(self.punctuation(TokenKind::LCurly)),
            b'}' => Ok(self.punctuation(TokenKind::RCurly)),
            b'[' => Ok(self.punctuation(TokenKind::LBracket)),
            b']' => Ok(self.punctuation(TokenKind::RBracket)),
            b',' => Ok(self.punctuation(TokenKind::Comma)),
            b';' => Ok(self.punctuation(TokenKind::Semicolon)),
            _ => {
                let invalid = self.source.text()[self.position..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Err(self.error(
                    self.current_location(),
                    format!("Invalid char: {}", invalid),
                ))
            }
        }
    }

    /// Parse string literal. No escape sequences: everything up to the next
    /// `"` is taken verbatim.
    fn string_literal(&mut self) -> Result<Token, Error> {
        let loc = self.current_location();
        self.position += 1; // opening quote
        let start = self.position;

        while let Some(ch) = self.peek() {
            if ch == b'"' {
                let text = &self.source.text()[start..self.position];
                self.position += 1; // closing quote
                return Ok(Token::new(TokenKind::String, text, loc));
            }
            if ch == b'\n' {
                self.line += 1;
            }
            self.position += 1;
        }

        Err(self.error(loc, "Unterminated string literal"))
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(&mut self) -> Result<Token, Error> {
        let loc = self.current_location();
        let text = self.take_while(|c| c.is_ascii_digit() || c == b'.');

        if text.bytes().filter(|&c| c == b'.').count() > 1 {
            return Err(self.error(loc, format!("Invalid float literal {}", text)));
        }

        Ok(Token::new(TokenKind::Number, text, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let text = self.take_while(is_ident_continue);

        match Keyword::from_ident(text) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), text, loc),
            None => Token::new(TokenKind::Ident, text, loc),
        }
    }

    /// Parse an operator: the longest run of operator characters, which must
    /// then spell a known operator or `->`.
    fn operator(&mut self) -> Result<Token, Error> {
        let loc = self.current_location();
        let text = self.take_while(|c| OPERATOR_CHARS.contains(&c));

        if text == "->" {
            return Ok(Token::new(TokenKind::Arrow, text, loc));
        }

        match Operator::from_symbol(text) {
            Some(op) => Ok(Token::new(TokenKind::Operator(op), text, loc)),
            None => Err(self.error(loc, format!("Invalid operator {}", text))),
        }
    }

    fn punctuation(&mut self, kind: TokenKind) -> Token {
        let loc = self.current_location();
        let text = &self.source.text()[self.position..self.position + 1];
        self.position += 1;
        Token::new(kind, text, loc)
    }

    /// Skip spaces, tabs and line breaks. Returns a newline token if the
    /// skipped run crossed at least one line break.
    fn skip_whitespace(&mut self) -> Option<Token> {
        let mut newline = None;

        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' => self.position += 1,
                b'\n' => {
                    if newline.is_none() {
                        newline = Some(Token::new(
                            TokenKind::Newline,
                            "\n",
                            self.current_location(),
                        ));
                    }
                    self.position += 1;
                    self.line += 1;
                }
                _ => break,
            }
        }

        newline
    }

    /// Consume bytes while `check` holds and return the consumed text
    fn take_while(&mut self, check: impl Fn(u8) -> bool) -> &'src str {
        let start = self.position;
        while self.peek().is_some_and(&check) {
            self.position += 1;
        }
        let text: &'src str = self.source.text();
        &text[start..self.position]
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.position)
    }

    fn error(&self, location: SourceLocation, message: impl Into<String>) -> Error {
        self.source.error(ErrorKind::Lex, location, message)
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
