pub use super::{expressions::*, statements::*, types::*};

/// Identifies one declarator within a tree. Assigned by the builder from a
/// per-tree counter, so two declarators never share an id.
pub type DeclId = usize;

/// An ordered list of statements: a program, a block body or a switch section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementList {
    pub statements: Vec<Stmt>,
}

impl StatementList {
    pub fn new(statements: Vec<Stmt>) -> Self {
        StatementList { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Whether the last statement leaves the enclosing section.
    pub fn ends_in_jump(&self) -> bool {
        matches!(
            self.statements.last(),
            Some(Stmt::Break | Stmt::Continue | Stmt::Return(_))
        )
    }
}
