use super::{
    ast::{DeclId, StatementList},
    expressions::Expr,
    types::{Inferred, Type},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    VarDecl(VarDecl),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    For {
        initializer: Option<ForInit>,
        condition: Option<Expr>,
        iterator: Option<Expr>,
        body: Box<Stmt>,
    },
    Switch {
        subject: Expr,
        sections: Vec<SwitchSection>,
    },
    Break,
    Continue,
    Return(Option<Expr>),
    Block(StatementList),
    Function(FunctionDecl),
    /// `;`
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VarDecl),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    pub label: SwitchLabel,
    pub body: StatementList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Case(Expr),
    Default,
}

/// A local variable declaration: one declared type shared by its declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub declared_type: Type,
    pub declarators: Vec<Declarator>,
    pub inferred: Inferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub id: DeclId,
    pub name: String,
    pub initializer: Option<Expr>,
    pub inferred: Inferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: Type,
    pub inferred: Inferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub is_server: bool,
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
    pub body: StatementList,
    pub inferred: Inferred,
}
