use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{syntax::rules::Rule, SourceLocation, Span};

/// A semantic error together with where it was found.
///
/// The file name is stamped from the check context at construction time and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerError {
    kind: ErrorType,
    span: Span,
    file: Rc<str>,
}

impl CompilerError {
    pub fn new(kind: ErrorType, span: Span, file: Rc<str>) -> Self {
        CompilerError { kind, span, file }
    }

    pub fn kind(&self) -> &ErrorType {
        &self.kind
    }

    pub fn start(&self) -> SourceLocation {
        self.span.start
    }

    pub fn end(&self) -> SourceLocation {
        self.span.end
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        self.kind.get_error_name()
    }
}

impl Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error : From {} to {}: {}.",
            self.span.start, self.span.end, self.kind
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorType {
    #[error("type `{type_name}` not found")]
    TypeNotFound { type_name: String },
    #[error("`{name}` does not exist in the current context")]
    IdentifierNotFound { name: String },
    #[error("`{name}` is already defined")]
    ItemAlreadyDefined { name: String },
    #[error("expression of type `{found}` does not match type `{expected}`")]
    ExpressionDoesnotMatchType { expected: String, found: String },
    #[error("right hand side can not be assigned to the left hand side")]
    CannotAssignRHSToLHS,
    #[error("left hand side of an assignment must be a variable or a field")]
    LeftHandSideNotAssignable,
    #[error("fields can not be virtual, abstract or override")]
    FieldInvalidModifier,
    #[error("`{statement}` statement must appear inside a loop")]
    StatementMustAppearInLoop { statement: String },
    #[error("unreachable code detected")]
    UnreachableCodeDetected,
    #[error("class `{class}` has a cyclic inheritence chain")]
    CyclicInheritence { class: String },
    #[error("class `{class}` can not inherit from concrete class `{base}`")]
    ConcreteBase { class: String, base: String },
    #[error("screen `{class}` can not inherit from another class")]
    ScreenCannotInherit { class: String },
    #[error("screen `{class}` can not be abstract or concrete")]
    ScreenModifierNotNormal { class: String },
    #[error("class `{class}` is not a known backend class")]
    UserDefinedBackendClass { class: String },
    #[error("abstract method `{method}` is not implemented")]
    AbstractMethodNotImplemented { method: String },
    #[error("method `{method}` implements an abstract method and must be marked override")]
    AbstractImplementationMethodModifierMustBeOverride { method: String },
    #[error("abstract method `{method}` can only be declared in an abstract class, `{class}` is not abstract")]
    AbstractMethodInNonAbstractClass { method: String, class: String },
    #[error("abstract method `{method}` can not have a body")]
    AbstractMethodHasBody { method: String },
    #[error("method `{method}` must have a body")]
    MethodMustHaveBody { method: String },
    #[error("method `{method}` is marked override but no suitable method was found to override")]
    NoSuitableMethodToOverride { method: String },
    #[error("static member `{member}` can not be virtual, abstract or override")]
    StaticMemberInvalidModifier { member: String },
    #[error("operator `{operator}` can not be virtual, abstract or override")]
    OperatorInvalidModifier { operator: String },
    #[error("operator `{operator}` can not take {count} parameters")]
    OperatorInvalidParameterCount { operator: String, count: usize },
    #[error("not all code paths of `{method}` return a value")]
    NotAllCodePathsReturnAValue { method: String },
    #[error("return statement must appear inside a method")]
    ReturnOutsideFunction,
    #[error("can not return `{found}` from a method returning `{expected}`")]
    ReturnTypeMismatch { expected: String, found: String },
    #[error("a value of type `{expected}` must be returned")]
    MissingReturnValue { expected: String },
    #[error("condition must be of type `bool`, found `{found}`")]
    ConditionMustBeBoolean { found: String },
    #[error("`void` can only be used as a method return type")]
    InvalidVoidUsage,
    #[error("`{type_name}` does not contain a member named `{member}`")]
    MemberNotFound { member: String, type_name: String },
    #[error("`{member}` is inaccessible due to its protection level")]
    MemberNotAccessible { member: String },
    #[error("member `{member}` can not be accessed this way, check its static modifier")]
    StaticMemberMismatch { member: String },
    #[error("expression is not a method")]
    NotAMethod,
    #[error("arguments do not match the parameters of `{method}`")]
    ArgumentsDoNotMatch { method: String },
    #[error("operator `{operator}` is not defined for `{operands}`")]
    OperatorNotDefined { operator: String, operands: String },
    #[error("can not create an instance of `{type_name}`")]
    CannotInstantiate { type_name: String },
}

impl ErrorType {
    pub fn get_error_name(&self) -> &'static str {
        match self {
            ErrorType::TypeNotFound { .. } => "TypeNotFound",
            ErrorType::IdentifierNotFound { .. } => "IdentifierNotFound",
            ErrorType::ItemAlreadyDefined { .. } => "ItemAlreadyDefined",
            ErrorType::ExpressionDoesnotMatchType { .. } => "ExpressionDoesnotMatchType",
            ErrorType::CannotAssignRHSToLHS => "CannotAssignRHSToLHS",
            ErrorType::LeftHandSideNotAssignable => "LeftHandSideNotAssignable",
            ErrorType::FieldInvalidModifier => "FieldInvalidModifier",
            ErrorType::StatementMustAppearInLoop { .. } => "StatementMustAppearInLoop",
            ErrorType::UnreachableCodeDetected => "UnreachableCodeDetected",
            ErrorType::CyclicInheritence { .. } => "CyclicInheritence",
            ErrorType::ConcreteBase { .. } => "ConcreteBase",
            ErrorType::ScreenCannotInherit { .. } => "ScreenCannotInherit",
            ErrorType::ScreenModifierNotNormal { .. } => "ScreenModifierNotNormal",
            ErrorType::UserDefinedBackendClass { .. } => "UserDefinedBackendClass",
            ErrorType::AbstractMethodNotImplemented { .. } => "AbstractMethodNotImplemented",
            ErrorType::AbstractImplementationMethodModifierMustBeOverride { .. } => {
                "AbstractImplementationMethodModifierMustBeOverride"
            }
            ErrorType::AbstractMethodInNonAbstractClass { .. } => {
                "AbstractMethodInNonAbstractClass"
            }
            ErrorType::AbstractMethodHasBody { .. } => "AbstractMethodHasBody",
            ErrorType::MethodMustHaveBody { .. } => "MethodMustHaveBody",
            ErrorType::NoSuitableMethodToOverride { .. } => "NoSuitableMethodToOverride",
            ErrorType::StaticMemberInvalidModifier { .. } => "StaticMemberInvalidModifier",
            ErrorType::OperatorInvalidModifier { .. } => "OperatorInvalidModifier",
            ErrorType::OperatorInvalidParameterCount { .. } => "OperatorInvalidParameterCount",
            ErrorType::NotAllCodePathsReturnAValue { .. } => "NotAllCodePathsReturnAValue",
            ErrorType::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorType::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorType::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorType::ConditionMustBeBoolean { .. } => "ConditionMustBeBoolean",
            ErrorType::InvalidVoidUsage => "InvalidVoidUsage",
            ErrorType::MemberNotFound { .. } => "MemberNotFound",
            ErrorType::MemberNotAccessible { .. } => "MemberNotAccessible",
            ErrorType::StaticMemberMismatch { .. } => "StaticMemberMismatch",
            ErrorType::NotAMethod => "NotAMethod",
            ErrorType::ArgumentsDoNotMatch { .. } => "ArgumentsDoNotMatch",
            ErrorType::OperatorNotDefined { .. } => "OperatorNotDefined",
            ErrorType::CannotInstantiate { .. } => "CannotInstantiate",
        }
    }
}

/// Raised while turning the parser's tree into the program model.
///
/// These are not semantic errors: they mean the tree itself is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("expected a `{expected:?}` node, found `{found:?}`")]
    UnexpectedRule { expected: Rule, found: Rule },
    #[error("`{rule:?}` node is missing child {index}")]
    MissingChild { rule: Rule, index: usize },
    #[error("`{rule:?}` node carries no token")]
    MissingToken { rule: Rule },
    #[error("unknown keyword `{text}` in a `{rule:?}` node")]
    UnknownKeyword { rule: Rule, text: String },
    #[error("`{found:?}` node can not be used as {context}")]
    InvalidNode { found: Rule, context: &'static str },
}
