//! Tree walk for constant folding

use crate::error::{Error, ErrorKind};
use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::source::SourceFile;
use tracing::trace;

/// Rewrites a tree bottom-up, consuming it and returning the folded tree.
pub struct ConstantFolder<'src> {
    source: &'src SourceFile,
    folded: usize,
}

impl<'src> ConstantFolder<'src> {
    pub fn new(source: &'src SourceFile) -> Self {
        Self { source, folded: 0 }
    }

    /// Number of operator nodes replaced by constants so far
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Fold `node` and all of its children.
    ///
    /// A folded operator node is dropped together with its operands and
    /// replaced by a constant that keeps the operator's token.
    pub fn fold(&mut self, node: Node) -> Result<Node, Error> {
        match node {
            Node::Unary { op, operand, token } => {
                let operand = self.fold(*operand)?;
                if let Some(value) = operand.as_constant() {
                    if let Some(value) = self.combine_unary(op, value, &token)? {
                        return Ok(self.folded_constant(op, value, token));
                    }
                }

                Ok(Node::Unary {
                    op,
                    operand: Box::new(operand),
                    token,
                })
            }
            Node::Binary {
                op,
                left,
                right,
                token,
            } => {
                let left = self.fold(*left)?;
                let right = self.fold(*right)?;
                if let (Some(lhs), Some(rhs)) = (left.as_constant(), right.as_constant()) {
                    if let Some(value) = self.combine_binary(op, lhs, rhs, &token)? {
                        return Ok(self.folded_constant(op, value, token));
                    }
                }

                Ok(Node::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    token,
                })
            }
            constant @ Node::Constant { .. } => Ok(constant),
            Node::Call { name, args, token } => Ok(Node::Call {
                name,
                args: self.fold_all(args)?,
                token,
            }),
            Node::Function {
                name,
                params,
                body,
                token,
            } => Ok(Node::Function {
                name,
                params,
                body: self.fold_boxed(body)?,
                token,
            }),
            Node::Return { value, token } => Ok(Node::Return {
                value: value.map(|value| self.fold_boxed(value)).transpose()?,
                token,
            }),
            Node::Block { body, token } => Ok(Node::Block {
                body: self.fold_all(body)?,
                token,
            }),
            Node::If {
                condition,
                body,
                else_body,
                token,
            } => Ok(Node::If {
                condition: self.fold_boxed(condition)?,
                body: self.fold_boxed(body)?,
                else_body: else_body
                    .map(|else_body| self.fold_boxed(else_body))
                    .transpose()?,
                token,
            }),
            Node::Switch {
                scrutinee,
                cases,
                token,
            } => Ok(Node::Switch {
                scrutinee: self.fold_boxed(scrutinee)?,
                cases: cases
                    .into_iter()
                    .map(|case| self.fold_case(case))
                    .collect::<Result<_, _>>()?,
                token,
            }),
            Node::Assign { vars, value, token } => Ok(Node::Assign {
                vars,
                value: self.fold_boxed(value)?,
                token,
            }),
        }
    }

    fn fold_boxed(&mut self, node: Box<Node>) -> Result<Box<Node>, Error> {
        self.fold(*node).map(Box::new)
    }

    fn fold_all(&mut self, nodes: Vec<Node>) -> Result<Vec<Node>, Error> {
        nodes.into_iter().map(|node| self.fold(node)).collect()
    }

    fn fold_case(&mut self, case: Case) -> Result<Case, Error> {
        let Case {
            condition,
            body,
            token,
        } = case;

        Ok(Case {
            condition: CaseCondition {
                test: self.fold_test(condition.test)?,
                token: condition.token,
            },
            body: self.fold_boxed(body)?,
            token,
        })
    }

    /// Fold the bound values and guards of a case test. The implicit
    /// `scrutinee == value` comparison itself is never folded.
    fn fold_test(&mut self, test: CaseTest) -> Result<CaseTest, Error> {
        match test {
            CaseTest::Equals { value, token } => Ok(CaseTest::Equals {
                value: self.fold_boxed(value)?,
                token,
            }),
            CaseTest::Guard {
                value,
                guard,
                token,
            } => Ok(CaseTest::Guard {
                value: self.fold_boxed(value)?,
                guard: self.fold_boxed(guard)?,
                token,
            }),
            CaseTest::Either { left, right, token } => Ok(CaseTest::Either {
                left: Box::new(self.fold_test(*left)?),
                right: Box::new(self.fold_test(*right)?),
                token,
            }),
        }
    }

    fn folded_constant(&mut self, op: Operator, value: Constant, token: Token) -> Node {
        trace!(
            line = token.location.line,
            op = op.symbol(),
            result = %value,
            "folded constant expression"
        );
        self.folded += 1;
        Node::Constant { value, token }
    }

    pub(crate) fn error(&self, token: &Token, message: impl Into<String>) -> Error {
        self.source.error(ErrorKind::Fold, token.location, message)
    }
}
