use crate::lexer::tokens::TokenKind;

use super::types::{Inferred, Literal, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub inferred: Inferred,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            inferred: Inferred::Pending,
        }
    }

    /// The identifier when this is a bare variable reference.
    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Variable(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(String),
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Postfix {
        operator: PostfixOperator,
        operand: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        operator: AssignmentOperator,
        value: Box<Expr>,
    },
    Parenthesized(Box<Expr>),
    Cast {
        target_type: Type,
        operand: Box<Expr>,
    },
    Member {
        receiver: Box<Expr>,
        member: String,
    },
    Invocation(Invocation),
    /// `base[args]`, a format string with injected values
    Interpolation {
        base: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// `L"key"`
    Localized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub callee: Box<Expr>,
    pub arguments: Vec<Argument>,
    /// Script named by an `extern` suffix
    pub extern_target: Option<String>,
}

impl Invocation {
    /// The function name when the callee is a bare identifier.
    pub fn callee_name(&self) -> Option<&str> {
        self.callee.as_variable()
    }

    /// Receiver and method name when the callee is a member access.
    pub fn method(&self) -> Option<(&Expr, &str)> {
        match &self.callee.kind {
            ExprKind::Member { receiver, member } => Some((receiver, member)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub value: Expr,
    pub by_ref: bool,
    pub inferred: Inferred,
}

impl Argument {
    pub fn new(value: Expr, by_ref: bool) -> Self {
        Argument {
            value,
            by_ref,
            inferred: Inferred::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Or => BinaryOperator::Or,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Equals => BinaryOperator::Equal,
            TokenKind::NotEquals => BinaryOperator::NotEqual,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEquals => BinaryOperator::LessEqual,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEqual,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// Relational, equality and logical operators always produce `bool`.
    pub fn yields_bool(&self) -> bool {
        !matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Dash => UnaryOperator::Minus,
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::PlusPlus => UnaryOperator::Increment,
            TokenKind::MinusMinus => UnaryOperator::Decrement,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl PostfixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
}

impl AssignmentOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Assignment => AssignmentOperator::Assign,
            TokenKind::PlusEquals => AssignmentOperator::Add,
            TokenKind::MinusEquals => AssignmentOperator::Subtract,
            TokenKind::StarEquals => AssignmentOperator::Multiply,
            TokenKind::SlashEquals => AssignmentOperator::Divide,
            TokenKind::PercentEquals => AssignmentOperator::Modulo,
            TokenKind::AndEquals => AssignmentOperator::And,
            TokenKind::OrEquals => AssignmentOperator::Or,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
            AssignmentOperator::Modulo => "%=",
            AssignmentOperator::And => "&=",
            AssignmentOperator::Or => "|=",
        }
    }
}
