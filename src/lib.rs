//! # Introduction
//!
//! rath is the frontend of a compiler for a small expression-oriented
//! language: it tokenizes source text, parses it into a syntax tree and folds
//! constant expressions.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → TokenStream → Parser → Node → ConstantFolder → Node
//! ```
//!
//! 1. [`parser`]: tokenizes the source and builds the tree of [`Node`]s.
//! 2. [`optimizer`]: replaces operators over literal operands with their
//!    value.
//! 3. [`error`]: the single [`Error`] type every stage reports through,
//!    quoting the offending source line.
//!
//! ```
//! let tree = rath::compile("demo.rath", "let x = 2 + 3 * 4").unwrap().unwrap();
//! assert_eq!(tree.to_string(), "[Assign vars={[Var x]} value=[Int 14]]");
//! ```

pub mod error;
pub mod optimizer;
pub mod parser;
pub mod source;

pub use error::{Error, ErrorKind, Result};
pub use parser::ast::Node;
pub use parser::{Parser, ParserConfig};
pub use source::SourceFile;

/// Parse `source` into a syntax tree. Returns `None` for input without any
/// statements.
pub fn parse(filename: impl Into<String>, source: impl Into<String>) -> Result<Option<Node>> {
    let source = SourceFile::new(filename, source);
    Parser::new(&source)?.parse()
}

/// Parse `source` and fold its constant expressions.
pub fn compile(filename: impl Into<String>, source: impl Into<String>) -> Result<Option<Node>> {
    let source = SourceFile::new(filename, source);
    let tree = Parser::new(&source)?.parse()?;
    tree.map(|tree| optimizer::fold(tree, &source)).transpose()
}
