use std::slice::Iter;

use crate::Span;

use super::{ast::Identifier, expressions::Expression, members::FieldAtom};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn returns_a_value(&self) -> bool {
        self.statements.iter().any(Statement::returns_a_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    Continue(Span),
    Break(Span),
    Return(ReturnStatement),
    Declaration(DeclarationStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    If(IfStatement),
    For(ForStatement),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(block) => block.span,
            Statement::Continue(span) | Statement::Break(span) => *span,
            Statement::Return(stmt) => stmt.span,
            Statement::Declaration(stmt) => stmt.span,
            Statement::While(stmt) => stmt.span,
            Statement::DoWhile(stmt) => stmt.span,
            Statement::If(stmt) => stmt.span,
            Statement::For(stmt) => stmt.span,
            Statement::Expression(stmt) => stmt.span,
        }
    }

    /// Whether control can not fall through this statement because every
    /// path through it returns.
    pub fn returns_a_value(&self) -> bool {
        match self {
            Statement::Return(_) => true,
            Statement::Block(block) => block.returns_a_value(),
            Statement::If(stmt) => {
                stmt.then_branch.returns_a_value()
                    && stmt
                        .else_branch
                        .as_ref()
                        .is_some_and(|branch| branch.returns_a_value())
            }
            Statement::DoWhile(stmt) => stmt.body.returns_a_value(),
            Statement::Continue(_)
            | Statement::Break(_)
            | Statement::Declaration(_)
            | Statement::While(_)
            | Statement::For(_)
            | Statement::Expression(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// A local variable declaration; like a field it may declare several names.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStatement {
    pub type_name: Identifier,
    pub atoms: Vec<FieldAtom>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub condition: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(DeclarationStatement),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub condition: Option<Expression>,
    pub step: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}
