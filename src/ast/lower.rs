//! Lowering of the parser's tree into the program model.
//!
//! Each grammar rule instance becomes exactly one model node. The child
//! layout every function expects is the one documented on [`Rule`].

use std::rc::Rc;

use crate::{
    errors::errors::LowerError,
    syntax::{rules::Rule, tree::ParseNode},
};

use super::{
    ast::{ClassDefinition, ClassLabel, ClassModifier, Identifier, Program},
    expressions::{Expression, LiteralKind},
    members::{
        Accessor, FieldAtom, FieldDefinition, MemberDefinition, MemberKind, MemberModifier,
        MethodDefinition, OperatorDefinition, Parameter,
    },
    statements::{
        Block, DeclarationStatement, DoWhileStatement, ExpressionStatement, ForInit,
        ForStatement, IfStatement, ReturnStatement, Statement, WhileStatement,
    },
};

impl Program {
    pub fn from_parse_tree(node: &ParseNode) -> Result<Program, LowerError> {
        let node = node.expect(Rule::Program)?;
        let mut classes = Vec::with_capacity(node.children.len());
        for child in node.children.iter() {
            classes.push(Rc::new(lower_class(child)?));
        }

        Ok(Program { classes })
    }
}

fn lower_identifier(node: &ParseNode) -> Result<Identifier, LowerError> {
    let node = node.expect(Rule::Identifier)?;
    Ok(Identifier::new(node.text()?, node.span()))
}

fn keyword_of(node: &ParseNode) -> Result<Option<&str>, LowerError> {
    match node.optional() {
        Some(keyword) => Ok(Some(keyword.text()?)),
        None => Ok(None),
    }
}

fn lower_class(node: &ParseNode) -> Result<ClassDefinition, LowerError> {
    let node = node.expect(Rule::ClassDefinition)?;

    let modifier = match keyword_of(node.child(0)?.expect(Rule::ClassModifier)?)? {
        None => ClassModifier::Normal,
        Some("abstract") => ClassModifier::Abstract,
        Some("concrete") => ClassModifier::Concrete,
        Some(other) => {
            return Err(LowerError::UnknownKeyword {
                rule: Rule::ClassModifier,
                text: other.to_string(),
            })
        }
    };
    let is_primitive = node.child(1)?.expect(Rule::PrimitiveMarker)?.optional().is_some();
    let is_backend = node.child(2)?.expect(Rule::BackendMarker)?.optional().is_some();
    let label = match node.child(3)?.text()? {
        "class" => ClassLabel::Class,
        "screen" => ClassLabel::Screen,
        other => {
            return Err(LowerError::UnknownKeyword {
                rule: Rule::ClassDefinition,
                text: other.to_string(),
            })
        }
    };
    let name = lower_identifier(node.child(4)?)?;

    let base_clause = node.child(5)?.expect(Rule::BaseClause)?;
    let base = if base_clause.children.is_empty() {
        None
    } else {
        Some(lower_identifier(base_clause.child(1)?)?)
    };

    let mut members = vec![];
    for member in node.child(7)?.expect(Rule::MemberList)?.children.iter() {
        members.push(lower_member(member, &name.text)?);
    }

    Ok(ClassDefinition {
        name,
        base,
        modifier,
        label,
        is_backend,
        is_primitive,
        members,
        span: node.span(),
    })
}

fn lower_member(node: &ParseNode, owner: &str) -> Result<MemberDefinition, LowerError> {
    let accessor = match keyword_of(node.child(0)?.expect(Rule::Accessor)?)? {
        None | Some("private") => Accessor::Private,
        Some("public") => Accessor::Public,
        Some("protected") => Accessor::Protected,
        Some(other) => {
            return Err(LowerError::UnknownKeyword {
                rule: Rule::Accessor,
                text: other.to_string(),
            })
        }
    };
    let modifier = match keyword_of(node.child(1)?.expect(Rule::MemberModifier)?)? {
        None => MemberModifier::Normal,
        Some("override") => MemberModifier::Override,
        Some("abstract") => MemberModifier::Abstract,
        Some("virtual") => MemberModifier::Virtual,
        Some(other) => {
            return Err(LowerError::UnknownKeyword {
                rule: Rule::MemberModifier,
                text: other.to_string(),
            })
        }
    };
    let is_static = node.child(2)?.expect(Rule::StaticMarker)?.optional().is_some();
    let declared_type = lower_identifier(node.child(3)?)?;

    let kind = match node.rule {
        Rule::FieldDefinition => MemberKind::Field(FieldDefinition {
            atoms: lower_atoms(node.child(4)?)?,
        }),
        Rule::MethodDefinition => MemberKind::Method(MethodDefinition {
            name: lower_identifier(node.child(4)?)?,
            parameters: lower_parameters(node.child(6)?)?,
            body: lower_optional_body(node.child(8)?)?,
        }),
        Rule::OperatorDefinition => MemberKind::Operator(OperatorDefinition {
            operator: Identifier::new(node.child(5)?.text()?, node.child(5)?.span()),
            parameters: lower_parameters(node.child(7)?)?,
            body: lower_optional_body(node.child(9)?)?,
        }),
        other => {
            return Err(LowerError::InvalidNode {
                found: other,
                context: "a class member",
            })
        }
    };

    Ok(MemberDefinition {
        accessor,
        modifier,
        is_static,
        declared_type,
        owner: owner.to_string(),
        span: node.span(),
        kind,
    })
}

fn lower_atoms(node: &ParseNode) -> Result<Vec<FieldAtom>, LowerError> {
    let node = node.expect(Rule::FieldAtomList)?;
    let mut atoms = Vec::with_capacity(node.children.len());
    for atom in node.children.iter() {
        let atom = atom.expect(Rule::FieldAtom)?;
        let value = match atom.children.len() {
            1 => None,
            _ => Some(lower_expression(atom.child(2)?)?),
        };
        atoms.push(FieldAtom {
            name: lower_identifier(atom.child(0)?)?,
            value,
            span: atom.span(),
        });
    }

    Ok(atoms)
}

fn lower_parameters(node: &ParseNode) -> Result<Vec<Parameter>, LowerError> {
    let node = node.expect(Rule::ParameterList)?;
    let mut parameters = Vec::with_capacity(node.children.len());
    for parameter in node.children.iter() {
        let parameter = parameter.expect(Rule::Parameter)?;
        parameters.push(Parameter {
            type_name: lower_identifier(parameter.child(0)?)?,
            name: lower_identifier(parameter.child(1)?)?,
        });
    }

    Ok(parameters)
}

/// A method ends either in a block or in a bare `;`.
fn lower_optional_body(node: &ParseNode) -> Result<Option<Block>, LowerError> {
    match node.rule {
        Rule::Block => Ok(Some(lower_block(node)?)),
        _ => Ok(None),
    }
}

fn lower_block(node: &ParseNode) -> Result<Block, LowerError> {
    let node = node.expect(Rule::Block)?;
    let mut statements = vec![];
    for statement in node.child(1)?.expect(Rule::StatementList)?.children.iter() {
        statements.push(lower_statement(statement)?);
    }

    Ok(Block {
        statements,
        span: node.span(),
    })
}

fn lower_declaration(node: &ParseNode) -> Result<DeclarationStatement, LowerError> {
    let node = node.expect(Rule::DeclarationStatement)?;
    Ok(DeclarationStatement {
        type_name: lower_identifier(node.child(0)?)?,
        atoms: lower_atoms(node.child(1)?)?,
        span: node.span(),
    })
}

fn lower_statement(node: &ParseNode) -> Result<Statement, LowerError> {
    let span = node.span();
    let statement = match node.rule {
        Rule::Block => Statement::Block(lower_block(node)?),
        Rule::ContinueStatement => Statement::Continue(span),
        Rule::BreakStatement => Statement::Break(span),
        Rule::ReturnStatement => Statement::Return(ReturnStatement {
            value: match node.children.len() {
                3 => Some(lower_expression(node.child(1)?)?),
                _ => None,
            },
            span,
        }),
        Rule::DeclarationStatement => Statement::Declaration(lower_declaration(node)?),
        Rule::WhileStatement => Statement::While(WhileStatement {
            condition: lower_expression(node.child(2)?)?,
            body: Box::new(lower_statement(node.child(4)?)?),
            span,
        }),
        Rule::DoWhileStatement => Statement::DoWhile(DoWhileStatement {
            body: Box::new(lower_statement(node.child(1)?)?),
            condition: lower_expression(node.child(4)?)?,
            span,
        }),
        Rule::IfStatement => {
            let else_clause = node.child(5)?.expect(Rule::ElseClause)?;
            let else_branch = if else_clause.children.is_empty() {
                None
            } else {
                Some(Box::new(lower_statement(else_clause.child(1)?)?))
            };
            Statement::If(IfStatement {
                condition: lower_expression(node.child(2)?)?,
                then_branch: Box::new(lower_statement(node.child(4)?)?),
                else_branch,
                span,
            })
        }
        Rule::ForStatement => {
            let init = match node.child(2)?.expect(Rule::ForInit)?.optional() {
                Some(init) if init.rule == Rule::DeclarationStatement => {
                    Some(ForInit::Declaration(lower_declaration(init)?))
                }
                Some(init) => Some(ForInit::Expression(lower_expression(init)?)),
                None => None,
            };
            let condition = match node.child(4)?.expect(Rule::ForCondition)?.optional() {
                Some(condition) => Some(lower_expression(condition)?),
                None => None,
            };
            let step = match node.child(6)?.expect(Rule::ForStep)?.optional() {
                Some(step) => Some(lower_expression(step)?),
                None => None,
            };
            Statement::For(ForStatement {
                init,
                condition,
                step,
                body: Box::new(lower_statement(node.child(8)?)?),
                span,
            })
        }
        Rule::ExpressionStatement => Statement::Expression(ExpressionStatement {
            expression: lower_expression(node.child(0)?)?,
            span,
        }),
        other => {
            return Err(LowerError::InvalidNode {
                found: other,
                context: "a statement",
            })
        }
    };

    Ok(statement)
}

fn lower_arguments(node: &ParseNode) -> Result<Vec<Expression>, LowerError> {
    let node = node.expect(Rule::ArgumentList)?;
    node.children.iter().map(lower_expression).collect()
}

fn lower_expression(node: &ParseNode) -> Result<Expression, LowerError> {
    let span = node.span();
    let literal = |kind: LiteralKind| -> Result<Expression, LowerError> {
        Ok(Expression::Literal {
            kind,
            text: node.text()?.to_string(),
            span,
        })
    };

    match node.rule {
        Rule::Identifier => Ok(Expression::Identifier(lower_identifier(node)?)),
        Rule::IntegerLiteral => literal(LiteralKind::Integer),
        Rule::RealLiteral => literal(LiteralKind::Real),
        Rule::StringLiteral => literal(LiteralKind::String),
        Rule::CharLiteral => literal(LiteralKind::Char),
        Rule::BooleanLiteral => literal(LiteralKind::Boolean),
        Rule::ParenthesizedExpression => lower_expression(node.child(1)?),
        Rule::MemberAccess => Ok(Expression::MemberAccess {
            target: Box::new(lower_expression(node.child(0)?)?),
            member: lower_identifier(node.child(2)?)?,
            span,
        }),
        Rule::MethodCall => Ok(Expression::Call {
            callee: Box::new(lower_expression(node.child(0)?)?),
            arguments: lower_arguments(node.child(2)?)?,
            span,
        }),
        Rule::NewExpression => Ok(Expression::New {
            class_name: lower_identifier(node.child(1)?)?,
            arguments: lower_arguments(node.child(3)?)?,
            span,
        }),
        Rule::UnaryExpression => Ok(Expression::Unary {
            operator: node.child(0)?.text()?.to_string(),
            operand: Box::new(lower_expression(node.child(1)?)?),
            span,
        }),
        Rule::BinaryExpression => Ok(Expression::Binary {
            left: Box::new(lower_expression(node.child(0)?)?),
            operator: node.child(1)?.text()?.to_string(),
            right: Box::new(lower_expression(node.child(2)?)?),
            span,
        }),
        Rule::AssignmentExpression => Ok(Expression::Assignment {
            target: Box::new(lower_expression(node.child(0)?)?),
            operator: node.child(1)?.text()?.to_string(),
            value: Box::new(lower_expression(node.child(2)?)?),
            span,
        }),
        other => Err(LowerError::InvalidNode {
            found: other,
            context: "an expression",
        }),
    }
}
