/// AST (Abstract Syntax Tree) module
/// Contains the tree every later stage reads and rewrites
///
/// Submodules:
/// - ast: The root statement list and declaration ids
/// - expressions: Expression nodes and operators
/// - statements: Statement and declaration nodes
/// - types: Types, inferred-type slots and literals
/// - walk: Mutable walks over expressions and written types
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod walk;
