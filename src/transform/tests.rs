use crate::{
    ast::ast::{ExprKind, ForInit, StatementList, Stmt, Type},
    interfaces::interface_table::InterfaceTable,
    parse_source,
};

use super::{
    function_table::{FunctionSignature, FunctionTable},
    pipeline::{process, propagate_ref_parameters, rename_builtin_types, split_declarations},
    type_map::{default_value, rename_type},
};

fn parse(source: &str) -> StatementList {
    parse_source(source, "test.mint").unwrap()
}

fn declared_names(list: &StatementList) -> Vec<String> {
    list.statements
        .iter()
        .filter_map(|statement| match statement {
            Stmt::VarDecl(declaration) => Some(
                declaration
                    .declarators
                    .iter()
                    .map(|d| d.name.clone())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        })
        .collect()
}

fn call_arguments_by_ref(statement: &Stmt) -> Vec<bool> {
    let Stmt::Expression(expression) = statement else {
        panic!("expected expression statement, got {:?}", statement);
    };
    let ExprKind::Invocation(invocation) = &expression.kind else {
        panic!("expected invocation, got {:?}", expression.kind);
    };
    invocation.arguments.iter().map(|a| a.by_ref).collect()
}

#[test]
fn test_function_table_collects_nested_declarations() {
    let ast = parse("void A(int x) { int B(string s, ref int t) { return 1; } } void A() { }");
    let table = FunctionTable::collect(&ast);

    assert_eq!(table.len(), 3);
    assert_eq!(table.lookup("A", 1).unwrap().parameters, vec![Type::int()]);
    assert!(table.lookup("A", 0).is_some());
    assert_eq!(
        table.lookup("B", 2).unwrap().parameters,
        vec![Type::string(), Type::by_ref("int")]
    );
    assert!(table.lookup("B", 1).is_none());
    assert!(table.lookup("C", 0).is_none());
}

#[test]
fn test_function_table_first_declaration_wins() {
    let mut table = FunctionTable::new();
    table.insert(FunctionSignature {
        name: String::from("F"),
        return_type: Type::int(),
        parameters: vec![Type::int()],
    });
    table.insert(FunctionSignature {
        name: String::from("F"),
        return_type: Type::string(),
        parameters: vec![Type::by_ref("int")],
    });

    assert_eq!(table.lookup("F", 1).unwrap().return_type, Type::int());
}

#[test]
fn test_split_declarations_in_place() {
    let mut ast = parse("int a = 1, b = 2; string c; x = a;");
    let split = split_declarations(&mut ast);

    assert_eq!(split, 1);
    assert_eq!(ast.statements.len(), 4);
    assert_eq!(declared_names(&ast), vec!["a", "b", "c"]);
    assert!(matches!(ast.statements[3], Stmt::Expression(_)));
}

#[test]
fn test_split_declarations_keeps_declarator_order_and_ids() {
    let mut ast = parse("int a, b = 2, c;");
    split_declarations(&mut ast);

    let ids: Vec<usize> = ast
        .statements
        .iter()
        .map(|statement| match statement {
            Stmt::VarDecl(declaration) => declaration.declarators[0].id,
            other => panic!("expected declaration, got {:?}", other),
        })
        .collect();

    assert_eq!(declared_names(&ast), vec!["a", "b", "c"]);
    assert!(ids[0] != ids[1] && ids[1] != ids[2] && ids[0] != ids[2]);
}

#[test]
fn test_split_declarations_in_nested_lists() {
    let mut ast = parse("void F() { if (x) { int a, b; } switch (y) { case 1: int c, d; break; } }");
    let split = split_declarations(&mut ast);
    assert_eq!(split, 2);

    let Stmt::Function(function) = &ast.statements[0] else {
        panic!("expected function");
    };
    let Stmt::If { then_branch, .. } = &function.body.statements[0] else {
        panic!("expected if");
    };
    let Stmt::Block(block) = then_branch.as_ref() else {
        panic!("expected block");
    };
    assert_eq!(declared_names(block), vec!["a", "b"]);

    let Stmt::Switch { sections, .. } = &function.body.statements[1] else {
        panic!("expected switch");
    };
    assert_eq!(declared_names(&sections[0].body), vec!["c", "d"]);
    assert!(matches!(sections[0].body.statements[2], Stmt::Break));
}

#[test]
fn test_for_initializer_is_hoisted_into_block() {
    let mut ast = parse("for (int i = 0, j = 10; i < j; i++) { }");
    split_declarations(&mut ast);

    let Stmt::Block(block) = &ast.statements[0] else {
        panic!("expected hoisting block, got {:?}", ast.statements[0]);
    };
    assert_eq!(declared_names(block), vec!["i", "j"]);
    assert!(matches!(block.statements[2], Stmt::For { initializer: None, .. }));
}

#[test]
fn test_single_for_initializer_stays() {
    let mut ast = parse("for (int i = 0; i < 3; i++) { }");
    assert_eq!(split_declarations(&mut ast), 0);
    assert!(matches!(
        ast.statements[0],
        Stmt::For {
            initializer: Some(ForInit::Declaration(_)),
            ..
        }
    ));
}

#[test]
fn test_reference_parameters_propagate_to_calls() {
    let mut ast = parse("void Swap(int a, ref int b) { } Swap(x, y); Swap(x); Other(x, y);");
    let functions = FunctionTable::collect(&ast);
    let marked = propagate_ref_parameters(&mut ast, &functions);

    assert_eq!(marked, 1);
    assert_eq!(call_arguments_by_ref(&ast.statements[1]), vec![false, true]);
    assert_eq!(call_arguments_by_ref(&ast.statements[2]), vec![false]);
    assert_eq!(call_arguments_by_ref(&ast.statements[3]), vec![false, false]);
}

#[test]
fn test_reference_parameters_propagate_inside_expressions() {
    let mut ast = parse("int Get(ref int a) { return a; } int v = 1 + Get(w);");
    let functions = FunctionTable::collect(&ast);

    assert_eq!(propagate_ref_parameters(&mut ast, &functions), 1);
}

#[test]
fn test_rename_type() {
    let mut t = Type::new("character");
    rename_type(&mut t);
    assert_eq!(t, Type::new("Creature"));

    let mut t = Type::by_ref("dword");
    rename_type(&mut t);
    assert_eq!(t, Type::by_ref("int"));

    let mut t = Type::new("Unlisted");
    rename_type(&mut t);
    assert_eq!(t, Type::new("Unlisted"));
}

#[test]
fn test_default_values() {
    assert_eq!(default_value(&Type::int()), "0");
    assert_eq!(default_value(&Type::new("byte")), "0");
    assert_eq!(default_value(&Type::float()), "0");
    assert_eq!(default_value(&Type::bool()), "false");
    assert_eq!(default_value(&Type::string()), "null");
    assert_eq!(default_value(&Type::new("Creature")), "null");
}

#[test]
fn test_rename_builtin_types_in_tree_and_table() {
    let mut ast = parse("qword Count(character c, prop p) { item i; return (qword)0; }");
    let mut functions = FunctionTable::collect(&ast);
    rename_builtin_types(&mut ast, &mut functions);

    let Stmt::Function(function) = &ast.statements[0] else {
        panic!("expected function");
    };
    assert_eq!(function.return_type, Type::long());
    assert_eq!(function.parameters[0].param_type, Type::new("Creature"));
    assert_eq!(function.parameters[1].param_type, Type::new("Prop"));

    let Stmt::VarDecl(declaration) = &function.body.statements[0] else {
        panic!("expected declaration");
    };
    assert_eq!(declaration.declared_type, Type::new("Item"));

    let Stmt::Return(Some(value)) = &function.body.statements[1] else {
        panic!("expected return");
    };
    let ExprKind::Cast { target_type, .. } = &value.kind else {
        panic!("expected cast");
    };
    assert_eq!(target_type, &Type::long());

    let signature = functions.lookup("Count", 2).unwrap();
    assert_eq!(signature.return_type, Type::long());
    assert_eq!(signature.parameters, vec![Type::new("Creature"), Type::new("Prop")]);
}

#[test]
fn test_process_runs_every_pass() {
    let mut ast = parse("void Set(ref dword a) { } dword x, y; Set(y);");
    let functions = process(&mut ast, &InterfaceTable::new());

    assert_eq!(functions.lookup("Set", 1).unwrap().parameters, vec![Type::by_ref("int")]);
    assert_eq!(ast.statements.len(), 4);
    assert_eq!(declared_names(&ast), vec!["x", "y"]);
    assert_eq!(call_arguments_by_ref(&ast.statements[3]), vec![true]);

    let Stmt::VarDecl(declaration) = &ast.statements[1] else {
        panic!("expected declaration");
    };
    assert_eq!(declaration.declared_type, Type::int());
}
