//! Error types and error handling for the translator.
//!
//! This module defines the fatal errors raised while turning source text
//! into an AST. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and tree building
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Recoverable anomalies (type-combination failures, unmatched calls) are
//! not errors: the inference engine absorbs them as unknown types.

pub mod errors;

#[cfg(test)]
mod tests;
