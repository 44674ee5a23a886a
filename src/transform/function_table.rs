use std::collections::HashMap;

use crate::ast::ast::{StatementList, Stmt, Type};

/// Parameter and return types of one declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Type>,
}

/// Every function declared in one tree, keyed by name. A name may map to
/// several declarations; lookups take the first with matching arity.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Vec<FunctionSignature>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable::default()
    }

    /// Indexes every function declaration in the tree, nested ones included.
    pub fn collect(list: &StatementList) -> Self {
        let mut table = FunctionTable::new();
        table.collect_list(list);
        table
    }

    fn collect_list(&mut self, list: &StatementList) {
        for statement in &list.statements {
            self.collect_stmt(statement);
        }
    }

    fn collect_stmt(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Function(function) => {
                self.insert(FunctionSignature {
                    name: function.name.clone(),
                    return_type: function.return_type.clone(),
                    parameters: function.parameters.iter().map(|p| p.param_type.clone()).collect(),
                });
                self.collect_list(&function.body);
            }
            Stmt::Block(list) => self.collect_list(list),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.collect_stmt(then_branch);
                if let Some(branch) = else_branch {
                    self.collect_stmt(branch);
                }
            }
            Stmt::While { body, .. } | Stmt::DoWhile { body, .. } | Stmt::For { body, .. } => self.collect_stmt(body),
            Stmt::Switch { sections, .. } => {
                for section in sections {
                    self.collect_list(&section.body);
                }
            }
            _ => {}
        }
    }

    pub fn insert(&mut self, signature: FunctionSignature) {
        self.functions.entry(signature.name.clone()).or_default().push(signature);
    }

    /// First declaration named `name` taking `arity` parameters.
    pub fn lookup(&self, name: &str, arity: usize) -> Option<&FunctionSignature> {
        self.functions
            .get(name)?
            .iter()
            .find(|signature| signature.parameters.len() == arity)
    }

    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Applies `f` to every parameter and return type.
    pub fn rename_types(&mut self, f: &mut dyn FnMut(&mut Type)) {
        for signature in self.functions.values_mut().flatten() {
            f(&mut signature.return_type);
            for parameter in &mut signature.parameters {
                f(parameter);
            }
        }
    }
}
