//! Error type shared by the lexer, parser and constant folder
//!
//! Every failure in the pipeline is reported through [`Error`]. There is no
//! recovery: the first error aborts the current parse or fold and is handed
//! back to the caller, who decides how to present it.

use std::fmt;

/// Which stage rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid character, operator lexeme or literal
    Lex,
    /// Unexpected or missing token
    Syntax,
    /// Malformed `let` variable list
    Declaration,
    /// Operator that cannot apply to the literal operands being folded
    Fold,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Declaration => write!(f, "declaration error"),
            ErrorKind::Fold => write!(f, "constant folding error"),
        }
    }
}

/// A positioned diagnostic.
///
/// The `Display` form quotes the source line:
///
/// ```text
/// Error in test.rath:1:
/// 1.2.3
///   > Invalid float literal 1.2.3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error in {filename}:{line}:\n{line_text}\n  > {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub filename: String,
    pub line: usize,
    pub offset: usize,
    pub line_text: String,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
