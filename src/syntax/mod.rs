//! Parse tree interface.
//!
//! The grammar and the parser live outside this crate. What they hand over
//! is a generic tree: every node names the grammar rule it was built from,
//! terminals carry their token text and location, and inner nodes carry an
//! ordered list of children. This module describes that tree and gives the
//! lowering pass a few checked accessors over it.

pub mod builder;
pub mod rules;
pub mod tree;

#[cfg(test)]
mod tests;
