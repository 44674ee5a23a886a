//! AST builder.
//!
//! Turns the concrete parse tree into the AST by matching on production
//! kinds. Operator chains fold left to right, adjacent string tokens merge
//! into one literal, numeric literals are range checked and every
//! declarator receives a fresh `DeclId`.

pub mod builder;
