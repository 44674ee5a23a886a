//! Type inference engine.
//!
//! Assigns a best-effort type to every expression and declaration slot of
//! one tree. Bindings are scoped by copying the binding map on entry to a
//! block, function, `for` or `switch`. Variable types live in a side table
//! keyed by `DeclId` so that widening through an assignment is seen by every
//! later reference, and are written back onto the declarations at the end.
//!
//! Nothing here fails: combination failures and unmatched calls leave the
//! slot unknown.

pub mod inference;

#[cfg(test)]
mod tests;
