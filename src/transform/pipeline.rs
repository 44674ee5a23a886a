use std::mem;

use tracing::debug;

use crate::{
    ast::{
        ast::{ExprKind, ForInit, StatementList, Stmt, VarDecl},
        walk::{walk_exprs, walk_types},
    },
    inference::inference::infer,
    interfaces::interface_table::InterfaceTable,
};

use super::{function_table::FunctionTable, type_map::rename_type};

/// Runs every pass over one tree and returns its function table.
pub fn process(list: &mut StatementList, interfaces: &InterfaceTable) -> FunctionTable {
    let mut functions = FunctionTable::collect(list);
    debug!("indexed {} function declarations", functions.len());

    let split = split_declarations(list);
    debug!("split {} multi-declarator declarations", split);

    let marked = propagate_ref_parameters(list, &functions);
    debug!("marked {} arguments by reference", marked);

    rename_builtin_types(list, &mut functions);

    infer(list, &functions, interfaces);

    functions
}

/// Splits every declaration with several declarators into single-declarator
/// declarations in place. Returns the number of declarations split.
pub fn split_declarations(list: &mut StatementList) -> usize {
    let mut split = 0;
    let statements = mem::take(&mut list.statements);

    for mut statement in statements {
        if let Stmt::VarDecl(declaration) = statement {
            if declaration.declarators.len() > 1 {
                split += 1;
            }
            list.statements.extend(split_var_decl(declaration).into_iter().map(Stmt::VarDecl));
            continue;
        }

        split += split_in_statement(&mut statement);
        list.statements.push(statement);
    }

    split
}

fn split_var_decl(declaration: VarDecl) -> Vec<VarDecl> {
    let VarDecl {
        declared_type,
        declarators,
        inferred,
    } = declaration;

    declarators
        .into_iter()
        .map(|declarator| VarDecl {
            declared_type: declared_type.clone(),
            declarators: vec![declarator],
            inferred: inferred.clone(),
        })
        .collect()
}

fn split_in_statement(statement: &mut Stmt) -> usize {
    match statement {
        Stmt::Block(list) => split_declarations(list),
        Stmt::Function(function) => split_declarations(&mut function.body),
        Stmt::Switch { sections, .. } => sections
            .iter_mut()
            .map(|section| split_declarations(&mut section.body))
            .sum(),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            let mut split = split_in_statement(then_branch);
            if let Some(branch) = else_branch {
                split += split_in_statement(branch);
            }
            split
        }
        Stmt::While { body, .. } | Stmt::DoWhile { body, .. } => split_in_statement(body),
        Stmt::For { .. } => hoist_for_initializer(statement),
        _ => 0,
    }
}

/// `for (int a = 0, b = 1; c; s) body` becomes
/// `{ int a = 0; int b = 1; for (; c; s) body }`.
fn hoist_for_initializer(statement: &mut Stmt) -> usize {
    let Stmt::For {
        initializer, body, ..
    } = statement
    else {
        return 0;
    };

    let mut split = split_in_statement(body);

    let is_multi = matches!(initializer, Some(ForInit::Declaration(declaration)) if declaration.declarators.len() > 1);
    if !is_multi {
        return split;
    }

    let Some(ForInit::Declaration(declaration)) = initializer.take() else {
        return split;
    };
    split += 1;

    let mut hoisted: Vec<Stmt> = split_var_decl(declaration).into_iter().map(Stmt::VarDecl).collect();
    let for_statement = mem::replace(statement, Stmt::Null);
    hoisted.push(for_statement);
    *statement = Stmt::Block(StatementList::new(hoisted));

    split
}

/// Copies each parameter's by-reference flag onto the matching argument of
/// every call to a declared function. Returns the number of arguments that
/// end up by reference.
pub fn propagate_ref_parameters(list: &mut StatementList, functions: &FunctionTable) -> usize {
    let mut marked = 0;

    walk_exprs(list, &mut |expression| {
        let ExprKind::Invocation(invocation) = &mut expression.kind else {
            return;
        };
        let Some(name) = invocation.callee_name() else {
            return;
        };
        let Some(signature) = functions.lookup(name, invocation.arguments.len()) else {
            return;
        };

        for (argument, parameter) in invocation.arguments.iter_mut().zip(&signature.parameters) {
            argument.by_ref = parameter.is_ref;
            if argument.by_ref {
                marked += 1;
            }
        }
    });

    marked
}

/// Renames builtin type names in the tree and in the function table.
pub fn rename_builtin_types(list: &mut StatementList, functions: &mut FunctionTable) {
    walk_types(list, &mut rename_type);
    functions.rename_types(&mut rename_type);
}
