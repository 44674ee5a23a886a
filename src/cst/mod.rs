//! Concrete parse tree produced by the parser.
//!
//! One type per grammar production. The tree keeps every operator token and
//! every operand level the grammar defines, so `1 - 2 - 3` is an additive
//! chain of three multiplicative operands rather than a nested binary tree.
//! Folding into the AST happens in the builder.

pub mod cst;
