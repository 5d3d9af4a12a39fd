//! Bracketed structural dump of a syntax tree
//!
//! The `Display` impls here render trees for inspection and snapshot tests:
//!
//! ```text
//! [Binop(+) left=[Int 1] right=[Call f args={[Ident x]}]]
//! ```
//!
//! The output is not meant to be parsed back.

use crate::parser::ast::*;
use std::fmt;

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(value) => write!(f, "[Int {}]", value),
            Constant::Float(value) => write!(f, "[Float {}]", value),
            Constant::String(value) => write!(f, "[String {}]", value),
            Constant::Ident(name) => write!(f, "[Ident {}]", name),
            Constant::Null => write!(f, "[Null]"),
            Constant::This => write!(f, "[This]"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Var ")?;
        if self.flags.contains(VarFlags::REF) {
            write!(f, "ref ")?;
        }
        if self.flags.contains(VarFlags::CONST) {
            write!(f, "const ")?;
        }
        if self.is_packed() {
            write!(f, "...")?;
        }
        write!(f, "{}]", self.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant { value, .. } => write!(f, "{}", value),
            Node::Unary { op, operand, .. } => write!(f, "[Unop({}) {}]", op.symbol(), operand),
            Node::Binary {
                op, left, right, ..
            } => write_binop(f, *op, left, right),
            Node::Call { name, args, .. } => {
                write!(f, "[Call {} args=", name)?;
                write_list(f, args)?;
                write!(f, "]")
            }
            Node::Function {
                name, params, body, ..
            } => {
                write!(f, "[Func ")?;
                if let Some(name) = name {
                    write!(f, "{} ", name)?;
                }
                write!(f, "args=")?;
                write_list(f, params)?;
                write!(f, " body={}]", body)
            }
            Node::Return { value, .. } => match value {
                Some(value) => write!(f, "[Return {}]", value),
                None => write!(f, "[Return]"),
            },
            Node::Block { body, .. } => {
                write!(f, "[Block body=")?;
                write_list(f, body)?;
                write!(f, "]")
            }
            Node::If {
                condition,
                body,
                else_body,
                ..
            } => {
                write!(f, "[If cond={} body={} else=", condition, body)?;
                match else_body {
                    Some(else_body) => write!(f, "{}]", else_body),
                    None => write!(f, "null]"),
                }
            }
            Node::Switch {
                scrutinee, cases, ..
            } => {
                write!(f, "[Switch value={} cases={{", scrutinee)?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", case.display(scrutinee))?;
                }
                write!(f, "}}]")
            }
            Node::Assign { vars, value, .. } => {
                write!(f, "[Assign vars=")?;
                write_list(f, vars)?;
                write!(f, " value={}]", value)
            }
        }
    }
}

/// A switch arm or case test rendered against its switch's scrutinee
pub struct WithScrutinee<'a, T> {
    item: &'a T,
    scrutinee: &'a Node,
}

impl Case {
    pub fn display<'a>(&'a self, scrutinee: &'a Node) -> WithScrutinee<'a, Case> {
        WithScrutinee {
            item: self,
            scrutinee,
        }
    }
}

impl CaseTest {
    pub fn display<'a>(&'a self, scrutinee: &'a Node) -> WithScrutinee<'a, CaseTest> {
        WithScrutinee {
            item: self,
            scrutinee,
        }
    }
}

impl fmt::Display for WithScrutinee<'_, Case> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Case [Cond {}] body={}]",
            self.item.condition.test.display(self.scrutinee),
            self.item.body
        )
    }
}

impl fmt::Display for WithScrutinee<'_, CaseTest> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((left, right)) = self.item.comparison(self.scrutinee) {
            return write_binop(f, Operator::Eq, left, right);
        }

        match self.item {
            CaseTest::Guard { guard, .. } => write!(f, "{}", guard),
            CaseTest::Either { left, right, .. } => write!(
                f,
                "[Binop(||) left={} right={}]",
                left.display(self.scrutinee),
                right.display(self.scrutinee)
            ),
            CaseTest::Equals { .. } => Ok(()),
        }
    }
}

fn write_binop(f: &mut fmt::Formatter<'_>, op: Operator, left: &Node, right: &Node) -> fmt::Result {
    write!(f, "[Binop({}) left={} right={}]", op.symbol(), left, right)
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::Parser;
    use crate::source::SourceFile;
    use pretty_assertions::assert_eq;

    fn dump(text: &str) -> String {
        let source = SourceFile::new("test.rath", text);
        let mut parser = Parser::new(&source).unwrap();
        parser.parse().unwrap().unwrap().to_string()
    }

    #[test]
    fn test_dump_call() {
        assert_eq!(dump("hi(5, 6);"), "[Call hi args={[Int 5], [Int 6]}]");
    }

    #[test]
    fn test_dump_operators() {
        assert_eq!(
            dump("-a * 2.5"),
            "[Unop(-) [Binop(*) left=[Ident a] right=[Float 2.5]]]"
        );
        assert_eq!(
            dump("-a - b"),
            "[Unop(-) [Binop(-) left=[Ident a] right=[Ident b]]]"
        );
        assert_eq!(
            dump("x :=\"hi\""),
            "[Binop(:=) left=[Ident x] right=[String hi]]"
        );
    }

    #[test]
    fn test_dump_declarations() {
        assert_eq!(
            dump("let ref a, const ...b = null"),
            "[Assign vars={[Var ref a], [Var ref const ...b]} value=[Null]]"
        );
        assert_eq!(
            dump("func f(x) -> { return this }"),
            "[Func f args={[Var x]} body=[Block body={[Return [This]]}]]"
        );
    }

    #[test]
    fn test_dump_if() {
        assert_eq!(
            dump("if (a) b"),
            "[If cond=[Ident a] body=[Ident b] else=null]"
        );
        assert_eq!(
            dump("if a then b else c"),
            "[If cond=[Ident a] body=[Ident b] else=[Ident c]]"
        );
    }

    #[test]
    fn test_dump_switch_shows_scrutinee_in_comparisons() {
        assert_eq!(
            dump("switch x -> { case 5 case 6 -> 10 case y when y > 1 -> 20 }"),
            "[Switch value=[Ident x] cases={\
             [Case [Cond [Binop(||) left=[Binop(==) left=[Ident x] right=[Int 5]] \
             right=[Binop(==) left=[Ident x] right=[Int 6]]]] body=[Int 10]], \
             [Case [Cond [Binop(>) left=[Ident y] right=[Int 1]]] body=[Int 20]]}]"
        );
    }
}
