//! Opaque host type interfaces.
//!
//! - `interface_table`: method signatures of host types, read by inference
//! - `synthesizer`: derives those signatures from call sites across a corpus
//!   and renders them as interface text that `interface_table` parses back

pub mod interface_table;
pub mod synthesizer;
