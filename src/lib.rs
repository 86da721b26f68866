#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{CompilerError, LowerError},
    semantics::{classes::ClassTable, context::CheckContext},
    syntax::tree::ParseNode,
};

pub mod ast;
pub mod errors;
pub mod semantics;
pub mod syntax;

extern crate regex;

/// A point in the source text.
///
/// Line and column are zero based, exactly as the parser hands them over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub position: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32, position: u32) -> Self {
        SourceLocation {
            line,
            column,
            position,
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{})", self.line + 1, self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl Span {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Span { start, end }
    }
}

/// Result of a whole-program semantic pass.
#[derive(Debug)]
pub struct Analysis {
    pub program: Program,
    pub classes: ClassTable,
    pub errors: Vec<CompilerError>,
}

impl Analysis {
    /// True when nothing was reported. A backend must not run otherwise.
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Lowers `tree` into the program model and runs every semantic check on it.
///
/// Only a malformed tree is an `Err`; semantic problems end up in
/// `Analysis::errors`.
pub fn analyze(tree: &ParseNode, file: &str) -> Result<Analysis, LowerError> {
    let program = Program::from_parse_tree(tree)?;
    let mut context = CheckContext::new(file);

    semantics::checker::check_program(&program, &mut context);

    let (classes, errors) = context.finish();
    Ok(Analysis {
        program,
        classes,
        errors,
    })
}
