//! Constant folding
//!
//! A bottom-up rewrite of the syntax tree that replaces operator nodes whose
//! operands are literal constants with the computed literal:
//! - [`fold`]: the tree walk ([`ConstantFolder`])
//! - `ops`: the binary and unary combination rules
//!
//! Identifiers are never treated as constants, and operators the folder does
//! not understand (comparisons, logic, `:=`, `.`) are left in place. Applying
//! an arithmetic operator to literal operands of the wrong type is an error.

pub mod fold;
mod ops;

pub use fold::ConstantFolder;

use crate::error::Error;
use crate::parser::ast::Node;
use crate::source::SourceFile;
use tracing::debug;

/// Fold every constant expression in `tree`. `source` is the text the tree
/// was parsed from and is only used for diagnostics.
pub fn fold(tree: Node, source: &SourceFile) -> Result<Node, Error> {
    debug!(file = source.name(), "folding constants");

    let mut folder = ConstantFolder::new(source);
    let tree = folder.fold(tree)?;

    debug!(
        file = source.name(),
        folded = folder.folded(),
        "constant folding finished"
    );
    Ok(tree)
}
