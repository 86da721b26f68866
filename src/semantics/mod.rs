//! Semantic analysis.
//!
//! Submodules:
//! - types: the type model and type-name resolution
//! - scope: the lexical scope stack
//! - classes: the class table and base-chain walks
//! - builtins: synthesized backend classes
//! - context: diagnostics and shared state of one run
//! - checker: program and class checks
//! - members, statements, expressions: checks below the class level
pub mod builtins;
pub mod checker;
pub mod classes;
pub mod context;
pub mod expressions;
pub mod members;
pub mod scope;
pub mod statements;
pub mod types;
