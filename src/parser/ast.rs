// AST (Abstract Syntax Tree) definitions for rath

use crate::parser::lexer::Token;
use bitflags::bitflags;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// Operators recognised by the lexer.
///
/// The same enum labels [`Node::Unary`] and [`Node::Binary`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Bitwise
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
    // Assignment / access
    Dot,
    Assign, // only valid inside `let`
    Bind,
    Ellipsis,
    // Comparison
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    // Logical
    And,
    Or,
}

/// Operator associativity for precedence climbing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// How the constant folder treats an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `+ - * /`: defined on ints and floats
    Arithmetic,
    /// `% & ^ | << >>`: defined on ints only
    IntegerOnly,
    /// Comparisons, logic, bind and access are never folded
    Opaque,
}

impl Operator {
    pub fn from_symbol(text: &str) -> Option<Self> {
        let op = match text {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Rem,
            "<<" => Operator::Shl,
            ">>" => Operator::Shr,
            "&" => Operator::BitAnd,
            "^" => Operator::BitXor,
            "|" => Operator::BitOr,
            "." => Operator::Dot,
            "=" => Operator::Assign,
            ":=" => Operator::Bind,
            "..." => Operator::Ellipsis,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Ge,
            "<=" => Operator::Le,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "&&" => Operator::And,
            "||" => Operator::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::BitAnd => "&",
            Operator::BitXor => "^",
            Operator::BitOr => "|",
            Operator::Dot => ".",
            Operator::Assign => "=",
            Operator::Bind => ":=",
            Operator::Ellipsis => "...",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    /// Binary binding strength, higher binds tighter. `...` is not a binary
    /// operator and has none.
    pub fn precedence(self) -> Option<u8> {
        let prec = match self {
            Operator::Assign | Operator::Bind => 0,
            Operator::Or => 1,
            Operator::And => 2,
            Operator::BitOr => 3,
            Operator::BitXor => 4,
            Operator::BitAnd => 5,
            Operator::Eq | Operator::Ne => 6,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => 7,
            Operator::Shl | Operator::Shr => 8,
            Operator::Add | Operator::Sub => 9,
            Operator::Mul | Operator::Div | Operator::Rem => 10,
            Operator::Dot => 11,
            Operator::Ellipsis => return None,
        };
        Some(prec)
    }

    pub fn assoc(self) -> Assoc {
        match self {
            Operator::Assign | Operator::Bind => Assoc::Right,
            _ => Assoc::Left,
        }
    }

    /// Operators allowed in prefix position
    pub fn is_prefix(self) -> bool {
        matches!(self, Operator::Sub | Operator::BitAnd)
    }

    pub fn class(self) -> OperatorClass {
        match self {
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div => {
                OperatorClass::Arithmetic
            }
            Operator::Rem
            | Operator::BitAnd
            | Operator::BitXor
            | Operator::BitOr
            | Operator::Shl
            | Operator::Shr => OperatorClass::IntegerOnly,
            _ => OperatorClass::Opaque,
        }
    }
}

bitflags! {
    /// Modifiers on a declared variable or function parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VarFlags: u8 {
        /// `ref name`
        const REF = 1 << 0;
        /// `const name`
        const CONST = 1 << 1;
        /// `...name`, collects the remaining values
        const PACKED = 1 << 2;
    }
}

/// A name introduced by `let` or by a function parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub flags: VarFlags,
    pub token: Token,
}

impl Variable {
    pub fn new(token: Token, flags: VarFlags) -> Self {
        Self {
            name: token.text.clone(),
            flags,
            token,
        }
    }

    pub fn is_packed(&self) -> bool {
        self.flags.contains(VarFlags::PACKED)
    }
}

/// Literal and leaf values
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    String(String),
    Ident(String),
    Null,
    This,
}

impl Constant {
    /// Identifiers are leaves but never literal values
    pub fn is_literal(&self) -> bool {
        !matches!(self, Constant::Ident(_))
    }
}

/// One alternative of a case condition.
///
/// `Equals` is the implicit form `case value`, meaning `scrutinee == value`.
/// It does not store the scrutinee: the enclosing [`Node::Switch`] owns it and
/// lends it out through [`CaseTest::comparison`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaseTest {
    /// `case value`
    Equals { value: Box<Node>, token: Token },
    /// `case value when guard`
    Guard {
        value: Box<Node>,
        guard: Box<Node>,
        token: Token,
    },
    /// `case a case b`, either alternative matches
    Either {
        left: Box<CaseTest>,
        right: Box<CaseTest>,
        token: Token,
    },
}

impl CaseTest {
    /// The last bound value of this (possibly compound) test
    pub fn value(&self) -> &Node {
        match self {
            CaseTest::Equals { value, .. } | CaseTest::Guard { value, .. } => value,
            CaseTest::Either { right, .. } => right.value(),
        }
    }

    /// Operands of the synthesized `scrutinee == value` comparison, for the
    /// implicit form only.
    pub fn comparison<'a>(&'a self, scrutinee: &'a Node) -> Option<(&'a Node, &'a Node)> {
        match self {
            CaseTest::Equals { value, .. } => Some((scrutinee, value)),
            _ => None,
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            CaseTest::Equals { token, .. }
            | CaseTest::Guard { token, .. }
            | CaseTest::Either { token, .. } => token,
        }
    }
}

/// The condition part of a `case` arm
#[derive(Debug, Clone, PartialEq)]
pub struct CaseCondition {
    pub test: CaseTest,
    pub token: Token,
}

impl CaseCondition {
    /// The last-seen bound value
    pub fn value(&self) -> &Node {
        self.test.value()
    }
}

/// Switch arm
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub condition: CaseCondition,
    pub body: Box<Node>,
    pub token: Token,
}

/// AST nodes. Every expression and statement in rath is a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Unary {
        op: Operator,
        operand: Box<Node>,
        token: Token,
    },
    Binary {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
        token: Token,
    },
    Constant {
        value: Constant,
        token: Token,
    },
    Call {
        name: String,
        args: Vec<Node>,
        token: Token,
    },
    Function {
        name: Option<String>,
        params: Vec<Variable>,
        body: Box<Node>,
        token: Token,
    },
    Return {
        value: Option<Box<Node>>,
        token: Token,
    },
    Block {
        body: Vec<Node>,
        token: Token,
    },
    If {
        condition: Box<Node>,
        body: Box<Node>,
        else_body: Option<Box<Node>>,
        token: Token,
    },
    Switch {
        scrutinee: Box<Node>,
        cases: Vec<Case>,
        token: Token,
    },
    /// `let` declaration
    Assign {
        vars: Vec<Variable>,
        value: Box<Node>,
        token: Token,
    },
}

impl Node {
    /// Get the token this node originates from
    pub fn token(&self) -> &Token {
        match self {
            Node::Unary { token, .. }
            | Node::Binary { token, .. }
            | Node::Constant { token, .. }
            | Node::Call { token, .. }
            | Node::Function { token, .. }
            | Node::Return { token, .. }
            | Node::Block { token, .. }
            | Node::If { token, .. }
            | Node::Switch { token, .. }
            | Node::Assign { token, .. } => token,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }

    /// The constant value of a leaf node
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Node::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether a statement made of this node must be followed by a newline or
    /// `;`. Statements ending in a brace-delimited construct need not be.
    pub fn expects_end(&self) -> bool {
        match self {
            Node::Switch { .. } | Node::Block { .. } => false,
            Node::If {
                body, else_body, ..
            } => else_body.as_deref().unwrap_or(&**body).expects_end(),
            Node::Binary { right, .. } => right.expects_end(),
            Node::Unary { operand, .. } => operand.expects_end(),
            Node::Function { body, .. } => body.expects_end(),
            Node::Assign { value, .. } => value.expects_end(),
            Node::Return { value: Some(value), .. } => value.expects_end(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        for symbol in ["+", "<<", ":=", "...", "!=", "||", "."] {
            let op = Operator::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert_eq!(Operator::from_symbol("=>"), None);
        assert_eq!(Operator::from_symbol("->"), None);
    }

    #[test]
    fn test_precedence_ordering() {
        let ladder = [
            Operator::Bind,
            Operator::Or,
            Operator::And,
            Operator::BitOr,
            Operator::BitXor,
            Operator::BitAnd,
            Operator::Eq,
            Operator::Lt,
            Operator::Shl,
            Operator::Add,
            Operator::Mul,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence(), "{:?}", pair);
        }
        assert_eq!(Operator::Ellipsis.precedence(), None);
        assert_eq!(Operator::Assign.assoc(), Assoc::Right);
        assert_eq!(Operator::Sub.assoc(), Assoc::Left);
    }

    #[test]
    fn test_var_flags_combine() {
        let flags = VarFlags::REF | VarFlags::PACKED;
        assert!(flags.contains(VarFlags::REF));
        assert!(!flags.contains(VarFlags::CONST));
        assert!(VarFlags::default().is_empty());
    }
}
