//! Whole-tree transform passes.
//!
//! `pipeline::process` runs, in order: function indexing, declaration
//! splitting, reference-parameter propagation, builtin type renaming and
//! finally type inference.

pub mod function_table;
pub mod pipeline;
pub mod type_map;

#[cfg(test)]
mod tests;
