//! Parser module for building the concrete parse tree.
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a `cst` tree. It handles:
//!
//! - Statement parsing (declarations, functions, control flow)
//! - Expression parsing, one function per precedence level
//! - Type parsing and the declaration/cast lookahead
//! - Error reporting with source positions

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
