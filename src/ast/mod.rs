//! Program model.
//!
//! The model is built once from the parser's tree and is never mutated by the
//! semantic checks.
//!
//! Submodules:
//! - ast: classes, identifiers and the program itself
//! - members: fields, methods and operators
//! - statements: the statement variants and block reachability
//! - expressions: the expression variants
//! - lower: construction of the model from a parse tree
//! - outline: a read-only label tree for viewers
pub mod ast;
pub mod expressions;
pub mod lower;
pub mod members;
pub mod outline;
pub mod statements;

#[cfg(test)]
mod tests;
