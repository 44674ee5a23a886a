//! Type parsing.
//!
//! A type is an optional `ref` marker followed by either a primitive type
//! keyword or an identifier naming a host type. Because types and
//! expressions can both start with an identifier, this module also holds
//! the lookahead that decides which one the parser is looking at.

use crate::{cst::cst::TypeNode, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let ref_token = if parser.current_token_kind() == TokenKind::Ref {
        Some(parser.advance().clone())
    } else {
        None
    };

    let kind = parser.current_token_kind();
    if kind.is_primitive_type() || kind == TokenKind::Identifier {
        let name = parser.advance().clone();
        return Ok(TypeNode { ref_token, name });
    }

    Err(parser.unexpected("expected type name"))
}

/// Length of the type starting `offset` tokens ahead, if one starts there.
fn type_length_at(parser: &Parser, offset: usize) -> Option<usize> {
    let mut length = 0;
    if parser.peek_kind(offset) == TokenKind::Ref {
        length += 1;
    }

    let kind = parser.peek_kind(offset + length);
    if kind.is_primitive_type() || kind == TokenKind::Identifier {
        Some(length + 1)
    } else {
        None
    }
}

/// Whether the current tokens start a declaration (`type IDENT`).
pub fn at_declaration(parser: &Parser) -> bool {
    match parser.current_token_kind() {
        TokenKind::Server => true,
        kind if kind == TokenKind::Ref || kind.is_primitive_type() => true,
        TokenKind::Identifier => parser.peek_kind(1) == TokenKind::Identifier,
        _ => false,
    }
}

/// Whether the current tokens start a declaration that turns out to be a
/// function (`server`? type IDENT '(').
pub fn at_function_declaration(parser: &Parser) -> bool {
    if parser.current_token_kind() == TokenKind::Server {
        return true;
    }

    match type_length_at(parser, 0) {
        Some(length) => {
            parser.peek_kind(length) == TokenKind::Identifier && parser.peek_kind(length + 1) == TokenKind::OpenParen
        }
        None => false,
    }
}

/// Whether the current `(` opens a cast.
///
/// A primitive type between parentheses is always a cast. A parenthesized
/// identifier is a cast only when the token after `)` can start a unary
/// operand on its own, so `(a) - b` stays a subtraction.
pub fn at_cast(parser: &Parser) -> bool {
    if parser.current_token_kind() != TokenKind::OpenParen {
        return false;
    }

    let Some(length) = type_length_at(parser, 1) else {
        return false;
    };
    if parser.peek_kind(1 + length) != TokenKind::CloseParen {
        return false;
    }

    let inner = parser.peek_kind(length);
    if inner.is_primitive_type() || parser.peek_kind(1) == TokenKind::Ref {
        return true;
    }

    matches!(
        parser.peek_kind(2 + length),
        TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::HexNumber
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::BackString
            | TokenKind::LocalizedString
            | TokenKind::True
            | TokenKind::False
            | TokenKind::OpenParen
            | TokenKind::Not
    )
}
