//! Unit tests for error handling.
//!
//! This module contains tests for error types and error rendering.

use std::rc::Rc;

use crate::errors::errors::{CompilerError, ErrorType, LowerError};
use crate::syntax::rules::Rule;
use crate::{SourceLocation, Span};

fn span(line: u32, start_column: u32, end_column: u32) -> Span {
    Span::new(
        SourceLocation::new(line, start_column, 0),
        SourceLocation::new(line, end_column, 0),
    )
}

#[test]
fn test_error_creation() {
    let error = CompilerError::new(
        ErrorType::TypeNotFound {
            type_name: "Foo".to_string(),
        },
        span(0, 0, 3),
        Rc::from("Main.lang"),
    );

    assert_eq!(error.get_error_name(), "TypeNotFound");
    assert_eq!(error.file(), "Main.lang");
}

#[test]
fn test_error_rendering() {
    let error = CompilerError::new(
        ErrorType::UnreachableCodeDetected,
        span(2, 4, 10),
        Rc::from("Main.lang"),
    );

    assert_eq!(
        error.to_string(),
        "Error : From (3:5) to (3:11): unreachable code detected."
    );
}

#[test]
fn test_error_rendering_with_arguments() {
    let error = CompilerError::new(
        ErrorType::AbstractMethodNotImplemented {
            method: "Speak".to_string(),
        },
        span(0, 0, 0),
        Rc::from("Dog.lang"),
    );

    assert_eq!(
        error.to_string(),
        "Error : From (1:1) to (1:1): abstract method `Speak` is not implemented."
    );
}

#[test]
fn test_error_locations() {
    let error = CompilerError::new(
        ErrorType::CannotAssignRHSToLHS,
        Span::new(SourceLocation::new(1, 2, 14), SourceLocation::new(1, 9, 21)),
        Rc::from("Main.lang"),
    );

    assert_eq!(error.start().position, 14);
    assert_eq!(error.end().position, 21);
}

#[test]
fn test_message_matches_display_of_kind() {
    let kind = ErrorType::ConcreteBase {
        class: "B".to_string(),
        base: "A".to_string(),
    };
    let error = CompilerError::new(kind.clone(), span(0, 0, 1), Rc::from("B.lang"));

    assert_eq!(error.message(), kind.to_string());
    assert_eq!(error.message(), "class `B` can not inherit from concrete class `A`");
}

#[test]
fn test_error_names() {
    assert_eq!(
        ErrorType::CyclicInheritence {
            class: "A".to_string()
        }
        .get_error_name(),
        "CyclicInheritence"
    );
    assert_eq!(
        ErrorType::AbstractImplementationMethodModifierMustBeOverride {
            method: "Speak".to_string()
        }
        .get_error_name(),
        "AbstractImplementationMethodModifierMustBeOverride"
    );
    assert_eq!(
        ErrorType::StatementMustAppearInLoop {
            statement: "break".to_string()
        }
        .get_error_name(),
        "StatementMustAppearInLoop"
    );
}

#[test]
fn test_lower_error_display() {
    let error = LowerError::MissingChild {
        rule: Rule::ClassDefinition,
        index: 4,
    };

    assert_eq!(error.to_string(), "`ClassDefinition` node is missing child 4");
}
