//! Unary operator folding

use crate::error::Error;
use crate::optimizer::fold::ConstantFolder;
use crate::parser::ast::{Constant, Operator, OperatorClass};
use crate::parser::lexer::Token;

impl ConstantFolder<'_> {
    /// Fold a prefix operator applied to a constant as `0 <op> value`.
    pub(crate) fn combine_unary(
        &self,
        op: Operator,
        value: &Constant,
        token: &Token,
    ) -> Result<Option<Constant>, Error> {
        let zero = match value {
            Constant::Int(_) if op.class() == OperatorClass::Arithmetic => Constant::Int(0),
            Constant::Float(_) if op.class() == OperatorClass::Arithmetic => Constant::Float(0.0),
            Constant::Int(_) | Constant::Float(_) | Constant::String(_) => {
                return Err(self.error(
                    token,
                    format!(
                        "Invalid unary operator {} on constant expression",
                        op.symbol()
                    ),
                ))
            }
            Constant::Ident(_) | Constant::Null | Constant::This => return Ok(None),
        };

        self.combine_binary(op, &zero, value, token)
    }
}
