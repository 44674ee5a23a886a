//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::sync::Arc;

fn position(offset: u32) -> Position {
    Position(offset, Arc::new("test.mint".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.mint");
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert!(error.get_tip().to_string().contains("99999999999999999999"));
}

#[test]
fn test_malformed_tree_error() {
    let error = Error::new(
        ErrorImpl::MalformedTree {
            production: "literal".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "MalformedTree");
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::MalformedTree {
            production: "literal".to_string()
        }
    );
}

#[test]
fn test_invalid_interface_error() {
    let error = Error::new(
        ErrorImpl::InvalidInterface {
            type_name: "Prop".to_string(),
            message: "expected only function declarations".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "InvalidInterface");
    assert_eq!(
        error.get_tip().to_string(),
        "Interface definition for `Prop` is invalid: expected only function declarations"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: ")".to_string(),
            message: "expected expression".to_string(),
        },
        position(7),
    );

    assert_eq!(
        error.to_string(),
        "unexpected token (\"expected expression\"): \")\" (test.mint@7)"
    );
}
