use crate::{
    ast::{
        ast::{Expr, ExprKind, Inferred, StatementList, Stmt, Type, VarDecl},
        walk::walk_exprs,
    },
    interfaces::interface_table::InterfaceTable,
    parse_source,
    transform::pipeline::process,
};

fn processed(source: &str) -> StatementList {
    processed_with(source, &InterfaceTable::new())
}

fn processed_with(source: &str, interfaces: &InterfaceTable) -> StatementList {
    let mut ast = parse_source(source, "test.mint").unwrap();
    process(&mut ast, interfaces);
    ast
}

fn declaration(list: &StatementList, index: usize) -> &VarDecl {
    match &list.statements[index] {
        Stmt::VarDecl(declaration) => declaration,
        other => panic!("expected declaration, got {:?}", other),
    }
}

fn initializer(list: &StatementList, index: usize) -> &Expr {
    declaration(list, index).declarators[0].initializer.as_ref().unwrap()
}

fn expression(list: &StatementList, index: usize) -> &Expr {
    match &list.statements[index] {
        Stmt::Expression(expression) => expression,
        other => panic!("expected expression, got {:?}", other),
    }
}

fn known(name: &str) -> Inferred {
    Inferred::Known(Type::new(name))
}

#[test]
fn test_literals() {
    let ast = processed("x = \"a\"; x = 1; x = 3000000000; x = 1.5; x = true; x = L\"key\";");
    let values: Vec<Inferred> = ast
        .statements
        .iter()
        .map(|statement| match statement {
            Stmt::Expression(Expr {
                kind: ExprKind::Assignment { value, .. },
                ..
            }) => value.inferred.clone(),
            other => panic!("expected assignment, got {:?}", other),
        })
        .collect();

    assert_eq!(
        values,
        vec![known("string"), known("int"), known("long"), known("float"), known("bool"), known("string")]
    );
}

#[test]
fn test_binary_takes_wider_numeric_type() {
    let ast = processed("byte b = 1; int i = 2; float f = 1.5; x = b + i; x = i * f; x = i < f; x = \"a\" + 1;");

    // An unbound target takes the value's type.
    assert_eq!(expression(&ast, 3).inferred, known("int"));
    let ExprKind::Assignment { value, .. } = &expression(&ast, 3).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, known("int"));

    let ExprKind::Assignment { value, .. } = &expression(&ast, 4).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, known("float"));

    let ExprKind::Assignment { value, .. } = &expression(&ast, 5).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, known("bool"));

    let ExprKind::Assignment { value, .. } = &expression(&ast, 6).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, Inferred::Unknown);
}

#[test]
fn test_declaration_widens_to_initializer() {
    let ast = processed("byte b = 300000;");
    let declaration = declaration(&ast, 0);

    assert_eq!(declaration.declared_type, Type::int());
    assert_eq!(declaration.inferred, known("int"));
    assert_eq!(declaration.declarators[0].inferred, known("int"));
}

#[test]
fn test_unknown_initializer_is_backfilled() {
    let ast = processed("Creature c = Lookup();");

    assert_eq!(initializer(&ast, 0).inferred, known("Creature"));
    assert_eq!(declaration(&ast, 0).declared_type, Type::new("Creature"));
}

#[test]
fn test_assignment_widens_declaration() {
    let ast = processed("int a = 1; a = 2.5; x = a;");

    assert_eq!(declaration(&ast, 0).declared_type, Type::float());
    assert_eq!(expression(&ast, 1).inferred, known("float"));

    let ExprKind::Assignment { value, .. } = &expression(&ast, 2).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, known("float"));
}

#[test]
fn test_parameter_assignment_widens_value() {
    let ast = processed("void F(long p) { p = 1; }");
    let Stmt::Function(function) = &ast.statements[0] else {
        panic!("expected function");
    };
    assert_eq!(function.inferred, known("void"));
    assert_eq!(function.parameters[0].inferred, known("long"));

    let Stmt::Expression(assignment) = &function.body.statements[0] else {
        panic!("expected expression");
    };
    let ExprKind::Assignment { target, value, .. } = &assignment.kind else {
        panic!("expected assignment");
    };
    assert_eq!(target.inferred, known("long"));
    assert_eq!(value.inferred, known("long"));
}

#[test]
fn test_failed_declaration_overrides_cast() {
    let ast = processed("string s = (int)x;");
    let value = initializer(&ast, 0);

    let ExprKind::Cast { target_type, .. } = &value.kind else {
        panic!("expected cast");
    };
    assert_eq!(target_type, &Type::string());
    assert_eq!(value.inferred, known("string"));
    assert_eq!(declaration(&ast, 0).declared_type, Type::string());
}

#[test]
fn test_failed_assignment_overrides_cast() {
    let ast = processed("bool b = false; b = (int)x; b = 1;");

    let ExprKind::Assignment { value, .. } = &expression(&ast, 1).kind else {
        panic!("expected assignment");
    };
    let ExprKind::Cast { target_type, .. } = &value.kind else {
        panic!("expected cast");
    };
    assert_eq!(target_type, &Type::bool());

    // Without a cast the mismatch is left alone.
    let ExprKind::Assignment { target, value, .. } = &expression(&ast, 2).kind else {
        panic!("expected assignment");
    };
    assert_eq!(target.inferred, known("bool"));
    assert_eq!(value.inferred, known("int"));
    assert_eq!(declaration(&ast, 0).declared_type, Type::bool());
}

#[test]
fn test_scopes_do_not_leak() {
    let ast = processed("{ int a = 1; } x = a; if (y) { string a = \"s\"; a = a; }");

    let ExprKind::Assignment { value, .. } = &expression(&ast, 1).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, Inferred::Unknown);
}

#[test]
fn test_function_return_type() {
    let ast = processed("float Half(int v) { return v / 2; } x = Half(3); y = Half();");

    let ExprKind::Assignment { value, .. } = &expression(&ast, 1).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, known("float"));

    let ExprKind::Assignment { value, .. } = &expression(&ast, 2).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, Inferred::Unknown);
}

#[test]
fn test_method_on_known_receiver_uses_interface() {
    let mut interfaces = InterfaceTable::new();
    interfaces
        .add_source(
            "Creature",
            "server int GetLevel() { } server string Say(string _, unk_type _) { } server bool Say(int _, int _) { }",
        )
        .unwrap();

    let ast = processed_with(
        "character c; x = c.GetLevel(); y = c.Say(\"hi\", z); w = c.Say(1, 2); v = c.Missing();",
        &interfaces,
    );

    let value_of = |index: usize| match &expression(&ast, index).kind {
        ExprKind::Assignment { value, .. } => value.clone(),
        other => panic!("expected assignment, got {:?}", other),
    };

    assert_eq!(value_of(1).inferred, known("int"));
    assert_eq!(value_of(2).inferred, known("string"));
    assert_eq!(value_of(3).inferred, known("bool"));
    assert_eq!(value_of(4).inferred, Inferred::Unknown);
}

#[test]
fn test_interface_match_backfills_unknown_arguments() {
    let mut interfaces = InterfaceTable::new();
    interfaces
        .add_source("Creature", "server void Warp(string _, int _) { }")
        .unwrap();

    let ast = processed_with("character c; c.Warp(region, 5);", &interfaces);
    let ExprKind::Invocation(invocation) = &expression(&ast, 1).kind else {
        panic!("expected invocation");
    };

    assert_eq!(invocation.arguments[0].inferred, known("string"));
    assert_eq!(invocation.arguments[1].inferred, known("int"));
    assert_eq!(expression(&ast, 1).inferred, known("void"));
}

#[test]
fn test_extern_and_member_are_unknown() {
    let ast = processed("character c; x = c.name; y = Run(1) extern `other`;");

    let ExprKind::Assignment { value, .. } = &expression(&ast, 1).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, Inferred::Unknown);

    let ExprKind::Assignment { value, .. } = &expression(&ast, 2).kind else {
        panic!("expected assignment");
    };
    assert_eq!(value.inferred, Inferred::Unknown);
}

#[test]
fn test_no_slot_left_pending() {
    let mut ast = processed(concat!(
        "void F(int a, ref string b) { for (int i = 0; i < a; i++) { b = b + i; } }",
        "switch (q) { case 1: F(1, s); break; default: r = \"x\"[q, (int)w]; }",
        "do { n--; } while (!(n > 0));",
    ));

    let mut pending = 0;
    walk_exprs(&mut ast, &mut |expression| {
        if expression.inferred.is_pending() {
            pending += 1;
        }
        if let ExprKind::Invocation(invocation) = &expression.kind {
            pending += invocation.arguments.iter().filter(|a| a.inferred.is_pending()).count();
        }
    });

    assert_eq!(pending, 0);
}
