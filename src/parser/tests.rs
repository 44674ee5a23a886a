//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable declarations
//! - Function declarations
//! - Expressions, casts and postfix suffixes
//! - Control flow statements
//! - Error cases

use std::sync::Arc;

use super::parser::parse;
use crate::{
    cst::cst::{
        DeclarationNode, EmbeddedNode, ExpressionNode, PostfixSuffix, PrimaryNode, StatementListNode, StatementNode,
        UnaryNode,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<StatementListNode, Error> {
    let tokens = tokenize(source.to_string(), Some("test.mint".to_string())).unwrap();
    let (_, result) = parse(tokens, Arc::new("test.mint".to_string()));
    result
}

fn single_unary(expression: &ExpressionNode) -> UnaryNode {
    match expression {
        ExpressionNode::NonAssignment(chain) => chain.clone().into_unary().unwrap(),
        other => panic!("expected non-assignment, got {:?}", other),
    }
}

fn first_expression(list: &StatementListNode) -> &ExpressionNode {
    match &list.statements[0] {
        StatementNode::Embedded(EmbeddedNode::Expression(expression)) => expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let result = parse_source("int a = 1, b;").unwrap();

    match &result.statements[0] {
        StatementNode::Declaration(DeclarationNode::LocalVariable(declaration)) => {
            assert_eq!(declaration.declared_type.name.value, "int");
            assert_eq!(declaration.declarators.len(), 2);
            assert!(declaration.declarators[0].initializer.is_some());
            assert!(declaration.declarators[1].initializer.is_none());
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_host_type_declaration() {
    let result = parse_source("dungeonbuilder db;").unwrap();

    assert!(matches!(
        &result.statements[0],
        StatementNode::Declaration(DeclarationNode::LocalVariable(_))
    ));
}

#[test]
fn test_parse_function_declaration() {
    let result = parse_source("server int add(int a, ref character c) { return a; }").unwrap();

    match &result.statements[0] {
        StatementNode::Declaration(DeclarationNode::Function(function)) => {
            assert!(function.server.is_some());
            assert_eq!(function.name.value, "add");
            assert_eq!(function.parameters.len(), 2);
            assert!(function.parameters[1].parameter_type.ref_token.is_some());
            assert_eq!(function.body.statements.statements.len(), 1);
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_parse_function_without_server_specifier() {
    let result = parse_source("void OnTalk() { }").unwrap();

    match &result.statements[0] {
        StatementNode::Declaration(DeclarationNode::Function(function)) => {
            assert!(function.server.is_none());
            assert!(function.parameters.is_empty());
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_parse_control_flow() {
    let source = "
        if (a > 0) { b = 1; } else b = 2;
        while (a < 10) a++;
        do { a--; } while (a);
        for (int i = 0, j = 1; i < 10; i++) ;
        for (;;) break;
        switch (a) { case 1: b = 1; break; case 2: default: b = 3; }
        return;
    ";
    let result = parse_source(source).unwrap();

    assert_eq!(result.statements.len(), 7);
    assert!(matches!(
        &result.statements[0],
        StatementNode::Embedded(EmbeddedNode::If { else_branch: Some(_), .. })
    ));
    assert!(matches!(&result.statements[2], StatementNode::Embedded(EmbeddedNode::DoWhile { .. })));

    match &result.statements[5] {
        StatementNode::Embedded(EmbeddedNode::Switch { sections, .. }) => {
            assert_eq!(sections.len(), 3);
            assert_eq!(sections[0].statements.len(), 2);
            assert!(sections[1].statements.is_empty());
        }
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn test_parse_left_associative_chain() {
    let result = parse_source("1 - 2 - 3;").unwrap();

    match first_expression(&result) {
        ExpressionNode::NonAssignment(chain) => {
            let additive = &chain.first.first.first.first;
            assert_eq!(additive.rest.len(), 2);
            assert_eq!(additive.rest[0].0.value, "-");
        }
        other => panic!("expected chain, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let result = parse_source("a = b += 2;").unwrap();

    match first_expression(&result) {
        ExpressionNode::Assignment { operator, value, .. } => {
            assert_eq!(operator.value, "=");
            assert!(matches!(value.as_ref(), ExpressionNode::Assignment { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_to_binary_fails() {
    let error = parse_source("a + b = 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_casts() {
    let result = parse_source("(int)x; (dword)y; (a) - b;").unwrap();

    let StatementNode::Embedded(EmbeddedNode::Expression(first)) = &result.statements[0] else {
        panic!("expected expression");
    };
    assert!(matches!(single_unary(first), UnaryNode::Cast { .. }));

    let StatementNode::Embedded(EmbeddedNode::Expression(second)) = &result.statements[1] else {
        panic!("expected expression");
    };
    assert!(matches!(single_unary(second), UnaryNode::Cast { .. }));

    let StatementNode::Embedded(EmbeddedNode::Expression(ExpressionNode::NonAssignment(third))) =
        &result.statements[2]
    else {
        panic!("expected expression");
    };
    assert_eq!(third.first.first.first.first.rest.len(), 1);
}

#[test]
fn test_parse_postfix_suffixes() {
    let result = parse_source(r#"npc.Say("hi") extern `talk.mint`; "{0}"[name]; a.b(c).d;"#).unwrap();

    match single_unary(first_expression(&result)) {
        UnaryNode::Postfix(postfix) => {
            assert!(matches!(postfix.primary, PrimaryNode::Identifier(_)));
            assert!(matches!(postfix.suffixes[0], PostfixSuffix::Member(_)));
            match &postfix.suffixes[1] {
                PostfixSuffix::Invocation {
                    arguments,
                    extern_target,
                    ..
                } => {
                    assert_eq!(arguments.len(), 1);
                    assert_eq!(extern_target.as_ref().unwrap().value, "talk.mint");
                }
                other => panic!("expected invocation, got {:?}", other),
            }
        }
        other => panic!("expected postfix, got {:?}", other),
    }

    let StatementNode::Embedded(EmbeddedNode::Expression(inject)) = &result.statements[1] else {
        panic!("expected expression");
    };
    match single_unary(inject) {
        UnaryNode::Postfix(postfix) => {
            assert!(matches!(postfix.suffixes[0], PostfixSuffix::Inject { .. }));
        }
        other => panic!("expected postfix, got {:?}", other),
    }

    let StatementNode::Embedded(EmbeddedNode::Expression(chain)) = &result.statements[2] else {
        panic!("expected expression");
    };
    match single_unary(chain) {
        UnaryNode::Postfix(postfix) => assert_eq!(postfix.suffixes.len(), 3),
        other => panic!("expected postfix, got {:?}", other),
    }
}

#[test]
fn test_parse_adjacent_strings_in_one_literal() {
    let result = parse_source(r#"s = "a" "b" `c`;"#).unwrap();

    match first_expression(&result) {
        ExpressionNode::Assignment { value, .. } => match single_unary(value) {
            UnaryNode::Postfix(postfix) => match postfix.primary {
                PrimaryNode::Literal(literal) => assert_eq!(literal.tokens.len(), 3),
                other => panic!("expected literal, got {:?}", other),
            },
            other => panic!("expected postfix, got {:?}", other),
        },
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_ref_argument() {
    let result = parse_source("Swap(ref a, b);").unwrap();

    match single_unary(first_expression(&result)) {
        UnaryNode::Postfix(postfix) => match &postfix.suffixes[0] {
            PostfixSuffix::Invocation { arguments, .. } => {
                assert!(arguments[0].ref_token.is_some());
                assert!(arguments[1].ref_token.is_none());
            }
            other => panic!("expected invocation, got {:?}", other),
        },
        other => panic!("expected postfix, got {:?}", other),
    }
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("int a = 1").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_unclosed_block() {
    assert!(parse_source("{ a = 1;").is_err());
}

#[test]
fn test_parse_empty_source() {
    let result = parse_source("").unwrap();
    assert!(result.statements.is_empty());
}
