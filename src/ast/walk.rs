//! Mutable tree walks shared by the transform passes.
//!
//! `walk_exprs` visits every expression node, parents before children.
//! `walk_types` visits every type written in the source: declared variable
//! types, parameter and return types, and cast targets. `visit_expr` is the
//! read-only expression walk used by the synthesizer.

use super::ast::{Expr, ExprKind, ForInit, StatementList, Stmt, SwitchLabel, Type, VarDecl};

pub fn walk_exprs(list: &mut StatementList, f: &mut dyn FnMut(&mut Expr)) {
    for statement in &mut list.statements {
        walk_stmt_exprs(statement, f);
    }
}

fn walk_var_decl_exprs(declaration: &mut VarDecl, f: &mut dyn FnMut(&mut Expr)) {
    for declarator in &mut declaration.declarators {
        if let Some(initializer) = &mut declarator.initializer {
            walk_expr(initializer, f);
        }
    }
}

fn walk_stmt_exprs(statement: &mut Stmt, f: &mut dyn FnMut(&mut Expr)) {
    match statement {
        Stmt::Expression(expression) => walk_expr(expression, f),
        Stmt::VarDecl(declaration) => walk_var_decl_exprs(declaration, f),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            walk_expr(condition, f);
            walk_stmt_exprs(then_branch, f);
            if let Some(branch) = else_branch {
                walk_stmt_exprs(branch, f);
            }
        }
        Stmt::While { condition, body } | Stmt::DoWhile { body, condition } => {
            walk_expr(condition, f);
            walk_stmt_exprs(body, f);
        }
        Stmt::For {
            initializer,
            condition,
            iterator,
            body,
        } => {
            match initializer {
                Some(ForInit::Declaration(declaration)) => walk_var_decl_exprs(declaration, f),
                Some(ForInit::Expression(expression)) => walk_expr(expression, f),
                None => {}
            }
            if let Some(condition) = condition {
                walk_expr(condition, f);
            }
            if let Some(iterator) = iterator {
                walk_expr(iterator, f);
            }
            walk_stmt_exprs(body, f);
        }
        Stmt::Switch { subject, sections } => {
            walk_expr(subject, f);
            for section in sections {
                if let SwitchLabel::Case(value) = &mut section.label {
                    walk_expr(value, f);
                }
                walk_exprs(&mut section.body, f);
            }
        }
        Stmt::Return(Some(value)) => walk_expr(value, f),
        Stmt::Block(list) => walk_exprs(list, f),
        Stmt::Function(function) => walk_exprs(&mut function.body, f),
        Stmt::Return(None) | Stmt::Break | Stmt::Continue | Stmt::Null => {}
    }
}

pub fn walk_expr(expression: &mut Expr, f: &mut dyn FnMut(&mut Expr)) {
    f(expression);

    match &mut expression.kind {
        ExprKind::Literal(_) | ExprKind::Variable(_) | ExprKind::Localized(_) => {}
        ExprKind::Binary { left, right, .. } => {
            walk_expr(left, f);
            walk_expr(right, f);
        }
        ExprKind::Unary { operand, .. }
        | ExprKind::Postfix { operand, .. }
        | ExprKind::Cast { operand, .. }
        | ExprKind::Parenthesized(operand) => walk_expr(operand, f),
        ExprKind::Assignment { target, value, .. } => {
            walk_expr(target, f);
            walk_expr(value, f);
        }
        ExprKind::Member { receiver, .. } => walk_expr(receiver, f),
        ExprKind::Invocation(invocation) => {
            walk_expr(&mut invocation.callee, f);
            for argument in &mut invocation.arguments {
                walk_expr(&mut argument.value, f);
            }
        }
        ExprKind::Interpolation { base, arguments } => {
            walk_expr(base, f);
            for argument in arguments {
                walk_expr(argument, f);
            }
        }
    }
}

pub fn walk_types(list: &mut StatementList, f: &mut dyn FnMut(&mut Type)) {
    for statement in &mut list.statements {
        walk_stmt_types(statement, f);
    }

    walk_exprs(list, &mut |expression| {
        if let ExprKind::Cast { target_type, .. } = &mut expression.kind {
            f(target_type);
        }
    });
}

fn walk_stmt_types(statement: &mut Stmt, f: &mut dyn FnMut(&mut Type)) {
    match statement {
        Stmt::VarDecl(declaration) => f(&mut declaration.declared_type),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            walk_stmt_types(then_branch, f);
            if let Some(branch) = else_branch {
                walk_stmt_types(branch, f);
            }
        }
        Stmt::While { body, .. } | Stmt::DoWhile { body, .. } => walk_stmt_types(body, f),
        Stmt::For { initializer, body, .. } => {
            if let Some(ForInit::Declaration(declaration)) = initializer {
                f(&mut declaration.declared_type);
            }
            walk_stmt_types(body, f);
        }
        Stmt::Switch { sections, .. } => {
            for section in sections {
                for statement in &mut section.body.statements {
                    walk_stmt_types(statement, f);
                }
            }
        }
        Stmt::Block(list) => {
            for statement in &mut list.statements {
                walk_stmt_types(statement, f);
            }
        }
        Stmt::Function(function) => {
            f(&mut function.return_type);
            for parameter in &mut function.parameters {
                f(&mut parameter.param_type);
            }
            for statement in &mut function.body.statements {
                walk_stmt_types(statement, f);
            }
        }
        Stmt::Expression(_) | Stmt::Return(_) | Stmt::Break | Stmt::Continue | Stmt::Null => {}
    }
}

/// Read-only counterpart of `walk_expr`.
pub fn visit_expr(expression: &Expr, f: &mut dyn FnMut(&Expr)) {
    f(expression);

    match &expression.kind {
        ExprKind::Literal(_) | ExprKind::Variable(_) | ExprKind::Localized(_) => {}
        ExprKind::Binary { left, right, .. } => {
            visit_expr(left, f);
            visit_expr(right, f);
        }
        ExprKind::Unary { operand, .. }
        | ExprKind::Postfix { operand, .. }
        | ExprKind::Cast { operand, .. }
        | ExprKind::Parenthesized(operand) => visit_expr(operand, f),
        ExprKind::Assignment { target, value, .. } => {
            visit_expr(target, f);
            visit_expr(value, f);
        }
        ExprKind::Member { receiver, .. } => visit_expr(receiver, f),
        ExprKind::Invocation(invocation) => {
            visit_expr(&invocation.callee, f);
            for argument in &invocation.arguments {
                visit_expr(&argument.value, f);
            }
        }
        ExprKind::Interpolation { base, arguments } => {
            visit_expr(base, f);
            for argument in arguments {
                visit_expr(argument, f);
            }
        }
    }
}
