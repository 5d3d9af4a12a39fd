//! Binary operator folding

use crate::error::Error;
use crate::optimizer::fold::ConstantFolder;
use crate::parser::ast::{Constant, Operator, OperatorClass};
use crate::parser::lexer::Token;

impl ConstantFolder<'_> {
    /// Combine two constants under `op`.
    ///
    /// Returns `Ok(None)` when the expression should stay as it is: the
    /// operator is not foldable, or an operand is not a literal of a foldable
    /// type (identifiers, `null`, `this`, strings mixed with numbers).
    pub(crate) fn combine_binary(
        &self,
        op: Operator,
        left: &Constant,
        right: &Constant,
        token: &Token,
    ) -> Result<Option<Constant>, Error> {
        if op.class() == OperatorClass::Opaque {
            return Ok(None);
        }

        let value = match (left, right) {
            (Constant::Int(a), Constant::Int(b)) => self.combine_ints(op, *a, *b, token)?,
            (Constant::Int(a), Constant::Float(b)) => {
                self.combine_floats(op, *a as f64, *b, token)?
            }
            (Constant::Float(a), Constant::Int(b)) => {
                self.combine_floats(op, *a, *b as f64, token)?
            }
            (Constant::Float(a), Constant::Float(b)) => self.combine_floats(op, *a, *b, token)?,
            (Constant::String(a), Constant::String(b)) => match op {
                Operator::Add => Constant::String(format!("{}{}", a, b)),
                _ => return Err(self.invalid_operator(op, token)),
            },
            _ => return Ok(None),
        };

        Ok(Some(value))
    }

    /// Integer arithmetic wraps on overflow, like the 64-bit machine
    /// arithmetic it stands in for.
    fn combine_ints(&self, op: Operator, a: i64, b: i64, token: &Token) -> Result<Constant, Error> {
        let value = match op {
            Operator::Add => a.wrapping_add(b),
            Operator::Sub => a.wrapping_sub(b),
            Operator::Mul => a.wrapping_mul(b),
            Operator::Div | Operator::Rem if b == 0 => {
                return Err(self.error(token, "Division by zero in constant expression"))
            }
            Operator::Div => a.wrapping_div(b),
            Operator::Rem => a.wrapping_rem(b),
            Operator::BitAnd => a & b,
            Operator::BitXor => a ^ b,
            Operator::BitOr => a | b,
            Operator::Shl | Operator::Shr => {
                let shifted = u32::try_from(b).ok().and_then(|amount| {
                    if op == Operator::Shl {
                        a.checked_shl(amount)
                    } else {
                        a.checked_shr(amount)
                    }
                });
                match shifted {
                    Some(value) => value,
                    None => {
                        return Err(self.error(
                            token,
                            format!("Shift amount {} out of range in constant expression", b),
                        ))
                    }
                }
            }
            _ => return Err(self.invalid_operator(op, token)),
        };

        Ok(Constant::Int(value))
    }

    fn combine_floats(&self, op: Operator, a: f64, b: f64, token: &Token) -> Result<Constant, Error> {
        let value = match op {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => a / b,
            _ => return Err(self.invalid_operator(op, token)),
        };

        Ok(Constant::Float(value))
    }

    fn invalid_operator(&self, op: Operator, token: &Token) -> Error {
        self.error(
            token,
            format!("Invalid operator {} on constant expressions", op.symbol()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::optimizer::fold::ConstantFolder;
    use crate::parser::ast::*;
    use crate::parser::lexer::{Token, TokenKind};
    use crate::source::SourceFile;

    fn combine(op: Operator, left: Constant, right: Constant) -> Result<Option<Constant>, crate::error::Error> {
        let source = SourceFile::new("test.rath", "a + b");
        let folder = ConstantFolder::new(&source);
        let token = Token::new(TokenKind::Operator(op), op.symbol(), SourceLocation::new(1, 2));
        folder.combine_binary(op, &left, &right, &token)
    }

    #[test]
    fn test_int_operators() {
        use Constant::Int;
        let cases = [
            (Operator::Add, 7, 2, 9),
            (Operator::Sub, 7, 2, 5),
            (Operator::Mul, 7, 2, 14),
            (Operator::Div, 7, 2, 3),
            (Operator::Rem, 7, 2, 1),
            (Operator::BitAnd, 6, 3, 2),
            (Operator::BitXor, 6, 3, 5),
            (Operator::BitOr, 6, 3, 7),
            (Operator::Shl, 1, 4, 16),
            (Operator::Shr, 16, 2, 4),
        ];

        for (op, a, b, expected) in cases {
            assert_eq!(combine(op, Int(a), Int(b)).unwrap(), Some(Int(expected)), "{op:?}");
        }
    }

    #[test]
    fn test_int_overflow_wraps() {
        assert_eq!(
            combine(Operator::Add, Constant::Int(i64::MAX), Constant::Int(1)).unwrap(),
            Some(Constant::Int(i64::MIN))
        );
    }

    #[test]
    fn test_mixed_numbers_produce_floats() {
        assert_eq!(
            combine(Operator::Mul, Constant::Int(2), Constant::Float(1.5)).unwrap(),
            Some(Constant::Float(3.0))
        );
        assert_eq!(
            combine(Operator::Sub, Constant::Float(2.5), Constant::Int(1)).unwrap(),
            Some(Constant::Float(1.5))
        );

        let err = combine(Operator::Rem, Constant::Float(2.5), Constant::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Fold);
        assert_eq!(err.message, "Invalid operator % on constant expressions");
        assert_eq!(err.line_text, "a + b");
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            combine(
                Operator::Add,
                Constant::String("foo".into()),
                Constant::String("bar".into())
            )
            .unwrap(),
            Some(Constant::String("foobar".into()))
        );

        let err = combine(
            Operator::Mul,
            Constant::String("foo".into()),
            Constant::String("bar".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Fold);

        // Strings mixed with numbers are left alone.
        assert_eq!(
            combine(Operator::Add, Constant::String("a".into()), Constant::Int(1)).unwrap(),
            None
        );
    }

    #[test]
    fn test_division_by_zero() {
        let err = combine(Operator::Div, Constant::Int(1), Constant::Int(0)).unwrap_err();
        assert_eq!(err.message, "Division by zero in constant expression");
        assert!(combine(Operator::Rem, Constant::Int(1), Constant::Int(0)).is_err());
    }

    #[test]
    fn test_shift_out_of_range() {
        let err = combine(Operator::Shl, Constant::Int(1), Constant::Int(64)).unwrap_err();
        assert_eq!(err.message, "Shift amount 64 out of range in constant expression");
        assert!(combine(Operator::Shr, Constant::Int(1), Constant::Int(-1)).is_err());
    }

    #[test]
    fn test_opaque_operators_and_identifiers() {
        assert_eq!(
            combine(Operator::Lt, Constant::Int(1), Constant::Int(2)).unwrap(),
            None
        );
        assert_eq!(
            combine(Operator::Add, Constant::Ident("x".into()), Constant::Int(2)).unwrap(),
            None
        );
    }
}
