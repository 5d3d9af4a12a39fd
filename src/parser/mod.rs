//! rath source code parser
//!
//! This module transforms rath source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`lookahead`]: Token buffer giving the parser lookahead
//! - [`parse`]: Parsing (tokens → syntax tree), with the grammar split over
//!   `expressions`, `statements` and `declarations`
//! - [`ast`]: Syntax tree definitions
//! - [`dump`]: Bracketed debug rendering of a tree
//!
//! # Language
//!
//! rath is expression oriented: `let` declarations, `func` definitions,
//! `if` and `switch` expressions, calls, and binary/prefix operators.
//! Statements end at a newline or `;` unless they end in a braced construct.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod config;
mod declarations;
pub mod dump;
mod expressions;
pub mod lexer;
pub mod lookahead;
pub mod parse;
mod statements;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use parse::Parser;
