use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{
            DeclId, Expr, ExprKind, ForInit, FunctionDecl, Inferred, Invocation, StatementList, Stmt, SwitchLabel,
            Type, VarDecl,
        },
        walk::walk_exprs,
    },
    interfaces::interface_table::InterfaceTable,
    transform::function_table::FunctionTable,
};

#[derive(Debug, Clone)]
enum Binding {
    Variable(DeclId),
    Parameter(Type),
}

type Scope = HashMap<String, Binding>;

struct Inference<'a> {
    functions: &'a FunctionTable,
    interfaces: &'a InterfaceTable,
    /// Current type of every declared variable
    declarations: HashMap<DeclId, Inferred>,
}

/// Infers every slot of `list`. Afterwards no slot is pending.
pub fn infer(list: &mut StatementList, functions: &FunctionTable, interfaces: &InterfaceTable) {
    let mut inference = Inference {
        functions,
        interfaces,
        declarations: HashMap::new(),
    };

    let mut scope = Scope::new();
    inference.infer_list(list, &mut scope);

    write_back_list(list, &inference.declarations);
    settle(list);

    debug!("inferred {} variable declarations", inference.declarations.len());
}

impl Inference<'_> {
    fn infer_list(&mut self, list: &mut StatementList, scope: &mut Scope) {
        for statement in &mut list.statements {
            self.infer_stmt(statement, scope);
        }
    }

    fn infer_stmt(&mut self, statement: &mut Stmt, scope: &mut Scope) {
        match statement {
            Stmt::Expression(expression) => self.infer_expr(expression, scope),
            Stmt::VarDecl(declaration) => self.infer_var_decl(declaration, scope),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.infer_expr(condition, scope);
                self.infer_stmt(then_branch, scope);
                if let Some(branch) = else_branch {
                    self.infer_stmt(branch, scope);
                }
            }
            Stmt::While { condition, body } => {
                self.infer_expr(condition, scope);
                self.infer_stmt(body, scope);
            }
            Stmt::DoWhile { body, condition } => {
                self.infer_stmt(body, scope);
                self.infer_expr(condition, scope);
            }
            Stmt::For {
                initializer,
                condition,
                iterator,
                body,
            } => {
                let mut inner = scope.clone();
                match initializer {
                    Some(ForInit::Declaration(declaration)) => self.infer_var_decl(declaration, &mut inner),
                    Some(ForInit::Expression(expression)) => self.infer_expr(expression, &inner),
                    None => {}
                }
                if let Some(condition) = condition {
                    self.infer_expr(condition, &inner);
                }
                if let Some(iterator) = iterator {
                    self.infer_expr(iterator, &inner);
                }
                self.infer_stmt(body, &mut inner);
            }
            Stmt::Switch { subject, sections } => {
                self.infer_expr(subject, scope);

                let mut inner = scope.clone();
                for section in sections {
                    if let SwitchLabel::Case(value) = &mut section.label {
                        self.infer_expr(value, &inner);
                    }
                    self.infer_list(&mut section.body, &mut inner);
                }
            }
            Stmt::Return(Some(value)) => self.infer_expr(value, scope),
            Stmt::Block(list) => {
                let mut inner = scope.clone();
                self.infer_list(list, &mut inner);
            }
            Stmt::Function(function) => self.infer_function(function, scope),
            Stmt::Return(None) | Stmt::Break | Stmt::Continue | Stmt::Null => {}
        }
    }

    fn infer_function(&mut self, function: &mut FunctionDecl, scope: &Scope) {
        let mut inner = scope.clone();

        for parameter in &mut function.parameters {
            parameter.inferred = Inferred::Known(parameter.param_type.clone());
            inner.insert(parameter.name.clone(), Binding::Parameter(parameter.param_type.clone()));
        }
        function.inferred = Inferred::Known(function.return_type.clone());

        self.infer_list(&mut function.body, &mut inner);
    }

    fn infer_var_decl(&mut self, declaration: &mut VarDecl, scope: &mut Scope) {
        let declared = declaration.declared_type.clone();

        for declarator in &mut declaration.declarators {
            let mut slot = Inferred::Known(declared.clone());

            if let Some(initializer) = &mut declarator.initializer {
                self.infer_expr(initializer, scope);

                match initializer.inferred.known().cloned() {
                    None => initializer.inferred = Inferred::Known(declared.clone()),
                    Some(value) if value != declared => match declared.combine(&value) {
                        Ok(resolved) => slot = Inferred::Known(resolved),
                        Err(error) => {
                            trace!("declaration of `{}`: {}", declarator.name, error);
                            override_cast(initializer, &declared);
                        }
                    },
                    Some(_) => {}
                }
            }

            declarator.inferred = slot.clone();
            self.declarations.insert(declarator.id, slot);
            scope.insert(declarator.name.clone(), Binding::Variable(declarator.id));
        }
    }

    fn lookup(&self, name: &str, scope: &Scope) -> Inferred {
        match scope.get(name) {
            Some(Binding::Variable(id)) => self.declarations.get(id).cloned().unwrap_or(Inferred::Unknown),
            Some(Binding::Parameter(t)) => Inferred::Known(t.clone()),
            None => Inferred::Unknown,
        }
    }

    fn infer_expr(&mut self, expression: &mut Expr, scope: &Scope) {
        let inferred = match &mut expression.kind {
            ExprKind::Literal(literal) => Inferred::Known(literal.get_type()),
            ExprKind::Localized(_) => Inferred::Known(Type::string()),
            ExprKind::Variable(name) => self.lookup(name, scope),
            ExprKind::Interpolation { base, arguments } => {
                self.infer_expr(base, scope);
                for argument in arguments {
                    self.infer_expr(argument, scope);
                }
                Inferred::Known(Type::string())
            }
            ExprKind::Parenthesized(operand)
            | ExprKind::Unary { operand, .. }
            | ExprKind::Postfix { operand, .. } => {
                self.infer_expr(operand, scope);
                operand.inferred.clone()
            }
            ExprKind::Cast {
                target_type, operand, ..
            } => {
                self.infer_expr(operand, scope);
                Inferred::Known(target_type.clone())
            }
            ExprKind::Binary { left, operator, right } => {
                self.infer_expr(left, scope);
                self.infer_expr(right, scope);

                if operator.yields_bool() {
                    Inferred::Known(Type::bool())
                } else {
                    left.inferred.combine(&right.inferred).unwrap_or_else(|error| {
                        trace!("binary `{}`: {}", operator.symbol(), error);
                        Inferred::Unknown
                    })
                }
            }
            ExprKind::Member { receiver, .. } => {
                self.infer_expr(receiver, scope);
                Inferred::Unknown
            }
            ExprKind::Assignment { target, value, .. } => {
                self.infer_expr(target, scope);
                self.infer_expr(value, scope);
                self.resolve_assignment(target, value, scope);
                target.inferred.clone()
            }
            ExprKind::Invocation(invocation) => self.infer_invocation(invocation, scope),
        };

        expression.inferred = inferred;
    }

    fn resolve_assignment(&mut self, target: &mut Expr, value: &mut Expr, scope: &Scope) {
        if target.inferred == value.inferred {
            return;
        }

        let resolved = match target.inferred.combine(&value.inferred) {
            Ok(resolved) => resolved,
            Err(error) => {
                trace!("assignment: {}", error);
                if let Some(t) = target.inferred.known().cloned() {
                    override_cast(value, &t);
                }
                return;
            }
        };

        match target.as_variable().and_then(|name| scope.get(name)) {
            Some(Binding::Variable(id)) => {
                self.declarations.insert(*id, resolved.clone());
                target.inferred = resolved;
            }
            Some(Binding::Parameter(_)) => value.inferred = resolved,
            None => {
                target.inferred = resolved.clone();
                value.inferred = resolved;
            }
        }
    }

    fn infer_invocation(&mut self, invocation: &mut Invocation, scope: &Scope) -> Inferred {
        self.infer_expr(&mut invocation.callee, scope);
        for argument in &mut invocation.arguments {
            self.infer_expr(&mut argument.value, scope);
            argument.inferred = argument.value.inferred.clone();
        }

        if invocation.extern_target.is_some() {
            return Inferred::Unknown;
        }

        if let Some(name) = invocation.callee_name() {
            return match self.functions.lookup(name, invocation.arguments.len()) {
                Some(signature) => Inferred::Known(signature.return_type.clone()),
                None => Inferred::Unknown,
            };
        }

        let Some((receiver, member)) = invocation.method() else {
            return Inferred::Unknown;
        };
        let Some(receiver_type) = receiver.inferred.known() else {
            return Inferred::Unknown;
        };

        let arguments: Vec<Inferred> = invocation.arguments.iter().map(|a| a.inferred.clone()).collect();
        let Some(method) = self.interfaces.find_match(&receiver_type.name, member, &arguments) else {
            trace!("no interface match for {}.{}/{}", receiver_type.name, member, arguments.len());
            return Inferred::Unknown;
        };

        for (argument, parameter) in invocation.arguments.iter_mut().zip(&method.parameters) {
            if let (true, Some(t)) = (argument.inferred.is_unknown(), parameter) {
                argument.inferred = Inferred::Known(t.clone());
            }
        }

        Inferred::from(method.return_type.clone())
    }
}

/// Rewrites a cast expression so it casts to `t`.
fn override_cast(expression: &mut Expr, t: &Type) {
    if let ExprKind::Cast { target_type, .. } = &mut expression.kind {
        *target_type = t.clone();
        expression.inferred = Inferred::Known(t.clone());
    }
}

fn write_back_list(list: &mut StatementList, declarations: &HashMap<DeclId, Inferred>) {
    for statement in &mut list.statements {
        write_back_stmt(statement, declarations);
    }
}

fn write_back_var_decl(declaration: &mut VarDecl, declarations: &HashMap<DeclId, Inferred>) {
    for declarator in &mut declaration.declarators {
        if let Some(inferred) = declarations.get(&declarator.id) {
            declarator.inferred = inferred.clone();
        }
    }

    // Single-declarator declarations take their declarator's final type.
    if let [declarator] = declaration.declarators.as_slice() {
        if let Some(t) = declarator.inferred.known() {
            declaration.declared_type = t.clone();
        }
        declaration.inferred = declarator.inferred.clone();
    } else {
        declaration.inferred = Inferred::Known(declaration.declared_type.clone());
    }
}

fn write_back_stmt(statement: &mut Stmt, declarations: &HashMap<DeclId, Inferred>) {
    match statement {
        Stmt::VarDecl(declaration) => write_back_var_decl(declaration, declarations),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            write_back_stmt(then_branch, declarations);
            if let Some(branch) = else_branch {
                write_back_stmt(branch, declarations);
            }
        }
        Stmt::While { body, .. } | Stmt::DoWhile { body, .. } => write_back_stmt(body, declarations),
        Stmt::For { initializer, body, .. } => {
            if let Some(ForInit::Declaration(declaration)) = initializer {
                write_back_var_decl(declaration, declarations);
            }
            write_back_stmt(body, declarations);
        }
        Stmt::Switch { sections, .. } => {
            for section in sections {
                write_back_list(&mut section.body, declarations);
            }
        }
        Stmt::Block(list) => write_back_list(list, declarations),
        Stmt::Function(function) => write_back_list(&mut function.body, declarations),
        Stmt::Expression(_) | Stmt::Return(_) | Stmt::Break | Stmt::Continue | Stmt::Null => {}
    }
}

/// Turns every slot the walk did not reach into unknown.
fn settle(list: &mut StatementList) {
    walk_exprs(list, &mut |expression| {
        if expression.inferred.is_pending() {
            expression.inferred = Inferred::Unknown;
        }
        if let ExprKind::Invocation(invocation) = &mut expression.kind {
            for argument in &mut invocation.arguments {
                if argument.inferred.is_pending() {
                    argument.inferred = Inferred::Unknown;
                }
            }
        }
    });
}
