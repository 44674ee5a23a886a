//! Target-language printer.
//!
//! This module renders a processed AST as C#. It includes:
//!
//! - `printer`: statement and expression rendering with 4-space indentation
//! - `rewrites`: the open table of call rewrites keyed by method name
//! - `template`: the class file wrapped around a printed body

pub mod printer;
pub mod rewrites;
pub mod template;
