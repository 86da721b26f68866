//! Error types and error handling for the semantic analyser.
//!
//! This module defines:
//!
//! - `CompilerError`, one located diagnostic produced by a semantic check
//! - `ErrorType`, the taxonomy of semantic errors and their messages
//! - `LowerError`, returned when the parse tree handed over by the parser
//!   does not have the expected shape

pub mod errors;

#[cfg(test)]
mod tests;
