use std::collections::HashMap;

use crate::{cst::cst::EmbeddedNode, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

/// Binary operator precedence levels, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

pub type StmtHandler = fn(&mut Parser) -> Result<EmbeddedNode, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.binary(TokenKind::Or, BindingPower::LogicalOr);
    parser.binary(TokenKind::And, BindingPower::LogicalAnd);

    // Equality and relational
    parser.binary(TokenKind::Equals, BindingPower::Equality);
    parser.binary(TokenKind::NotEquals, BindingPower::Equality);
    parser.binary(TokenKind::Less, BindingPower::Relational);
    parser.binary(TokenKind::LessEquals, BindingPower::Relational);
    parser.binary(TokenKind::Greater, BindingPower::Relational);
    parser.binary(TokenKind::GreaterEquals, BindingPower::Relational);

    // Additive and multiplicative
    parser.binary(TokenKind::Plus, BindingPower::Additive);
    parser.binary(TokenKind::Dash, BindingPower::Additive);
    parser.binary(TokenKind::Star, BindingPower::Multiplicative);
    parser.binary(TokenKind::Slash, BindingPower::Multiplicative);
    parser.binary(TokenKind::Percent, BindingPower::Multiplicative);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Semicolon, parse_null_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Switch, parse_switch_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Do, parse_do_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
