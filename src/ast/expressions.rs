use crate::Span;

use super::ast::Identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Real,
    String,
    Char,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal {
        kind: LiteralKind,
        text: String,
        span: Span,
    },
    /// A variable, a type name, a method of the current class, or `this`.
    Identifier(Identifier),
    MemberAccess {
        target: Box<Expression>,
        member: Identifier,
        span: Span,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        span: Span,
    },
    New {
        class_name: Identifier,
        arguments: Vec<Expression>,
        span: Span,
    },
    Unary {
        operator: String,
        operand: Box<Expression>,
        span: Span,
    },
    Binary {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
        span: Span,
    },
    Assignment {
        target: Box<Expression>,
        operator: String,
        value: Box<Expression>,
        span: Span,
    },
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(identifier) => identifier.span,
            Expression::Literal { span, .. }
            | Expression::MemberAccess { span, .. }
            | Expression::Call { span, .. }
            | Expression::New { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Assignment { span, .. } => *span,
        }
    }

    /// Expressions never end a block.
    pub fn returns_a_value(&self) -> bool {
        false
    }
}
