//! Read-only outline of the program model.
//!
//! Produces a plain label tree that a viewer can display. Nothing here is
//! consulted by the semantic checks.

use super::{
    ast::{ClassDefinition, Program},
    expressions::Expression,
    members::{FieldAtom, MemberDefinition, MemberKind, Parameter},
    statements::{Block, ForInit, Statement},
};

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub label: String,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn leaf(label: impl Into<String>) -> Self {
        OutlineNode {
            label: label.into(),
            children: vec![],
        }
    }

    fn with(label: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        OutlineNode {
            label: label.into(),
            children,
        }
    }
}

pub fn outline_program(program: &Program) -> OutlineNode {
    OutlineNode::with(
        format!("Program: Count = {}", program.classes.len()),
        program.classes.iter().map(|class| outline_class(class)).collect(),
    )
}

pub fn outline_class(class: &ClassDefinition) -> OutlineNode {
    let mut words = vec![format!("{:?}", class.modifier)];
    if class.is_primitive {
        words.push("Primitive".to_string());
    }
    if class.is_backend {
        words.push("Backend".to_string());
    }
    words.push(format!("{:?}", class.label));
    words.push(class.name.text.clone());
    let mut label = words.join(" ");
    if let Some(base) = &class.base {
        label.push_str(" extends ");
        label.push_str(&base.text);
    }

    let members = OutlineNode::with(
        format!("Members: Count = {}", class.members.len()),
        class.members.iter().map(outline_member).collect(),
    );
    OutlineNode::with(label, vec![members])
}

fn outline_member(member: &MemberDefinition) -> OutlineNode {
    let mut children = vec![
        OutlineNode::leaf(format!("Accessor = {:?}", member.accessor)),
        OutlineNode::leaf(format!("Modifier = {:?}", member.modifier)),
        OutlineNode::leaf(format!("Static = {}", member.is_static)),
        OutlineNode::leaf(format!("Type = {}", member.declared_type.text)),
    ];

    let label = match &member.kind {
        MemberKind::Field(field) => {
            children.push(OutlineNode::with(
                format!("Atoms: Count = {}", field.atoms.len()),
                field.atoms.iter().map(outline_atom).collect(),
            ));
            "Field Declaration".to_string()
        }
        MemberKind::Method(method) => {
            children.push(outline_parameters(&method.parameters));
            if let Some(body) = &method.body {
                children.push(outline_block(body));
            }
            format!("Method: {}", method.name.text)
        }
        MemberKind::Operator(operator) => {
            children.push(outline_parameters(&operator.parameters));
            if let Some(body) = &operator.body {
                children.push(outline_block(body));
            }
            format!("Operator: {}", operator.operator.text)
        }
    };

    OutlineNode::with(label, children)
}

fn outline_parameters(parameters: &[Parameter]) -> OutlineNode {
    OutlineNode::with(
        format!("Parameters: Count = {}", parameters.len()),
        parameters
            .iter()
            .map(|p| OutlineNode::leaf(format!("{} {}", p.type_name.text, p.name.text)))
            .collect(),
    )
}

fn outline_atom(atom: &FieldAtom) -> OutlineNode {
    match &atom.value {
        Some(value) => OutlineNode::with(
            format!("{} =", atom.name.text),
            vec![outline_expression(value)],
        ),
        None => OutlineNode::leaf(atom.name.text.clone()),
    }
}

fn outline_block(block: &Block) -> OutlineNode {
    OutlineNode::with(
        format!("Block: Count = {}", block.statements.len()),
        block.iter().map(outline_statement).collect(),
    )
}

fn outline_statement(statement: &Statement) -> OutlineNode {
    match statement {
        Statement::Block(block) => outline_block(block),
        Statement::Continue(_) => OutlineNode::leaf("Continue Statement"),
        Statement::Break(_) => OutlineNode::leaf("Break Statement"),
        Statement::Return(stmt) => OutlineNode::with(
            "Return Statement",
            stmt.value.iter().map(outline_expression).collect(),
        ),
        Statement::Declaration(stmt) => OutlineNode::with(
            format!("Declaration: {}", stmt.type_name.text),
            stmt.atoms.iter().map(outline_atom).collect(),
        ),
        Statement::While(stmt) => OutlineNode::with(
            "While Statement",
            vec![outline_expression(&stmt.condition), outline_statement(&stmt.body)],
        ),
        Statement::DoWhile(stmt) => OutlineNode::with(
            "Do While Statement",
            vec![outline_statement(&stmt.body), outline_expression(&stmt.condition)],
        ),
        Statement::If(stmt) => {
            let mut children = vec![
                outline_expression(&stmt.condition),
                outline_statement(&stmt.then_branch),
            ];
            if let Some(branch) = &stmt.else_branch {
                children.push(OutlineNode::with("Else", vec![outline_statement(branch)]));
            }
            OutlineNode::with("If Statement", children)
        }
        Statement::For(stmt) => {
            let mut children = vec![];
            match &stmt.init {
                Some(ForInit::Declaration(declaration)) => children.push(OutlineNode::with(
                    format!("Declaration: {}", declaration.type_name.text),
                    declaration.atoms.iter().map(outline_atom).collect(),
                )),
                Some(ForInit::Expression(expression)) => {
                    children.push(outline_expression(expression))
                }
                None => {}
            }
            children.extend(stmt.condition.iter().map(outline_expression));
            children.extend(stmt.step.iter().map(outline_expression));
            children.push(outline_statement(&stmt.body));
            OutlineNode::with("For Statement", children)
        }
        Statement::Expression(stmt) => OutlineNode::with(
            "Expression Statement",
            vec![outline_expression(&stmt.expression)],
        ),
    }
}

fn outline_expression(expression: &Expression) -> OutlineNode {
    match expression {
        Expression::Literal { kind, text, .. } => {
            OutlineNode::leaf(format!("{:?} Literal: {}", kind, text))
        }
        Expression::Identifier(identifier) => {
            OutlineNode::leaf(format!("Identifier: {}", identifier.text))
        }
        Expression::MemberAccess { target, member, .. } => OutlineNode::with(
            format!("Member Access: .{}", member.text),
            vec![outline_expression(target)],
        ),
        Expression::Call {
            callee, arguments, ..
        } => {
            let mut children = vec![outline_expression(callee)];
            children.extend(arguments.iter().map(outline_expression));
            OutlineNode::with("Method Call", children)
        }
        Expression::New {
            class_name,
            arguments,
            ..
        } => OutlineNode::with(
            format!("New: {}", class_name.text),
            arguments.iter().map(outline_expression).collect(),
        ),
        Expression::Unary {
            operator, operand, ..
        } => OutlineNode::with(format!("Unary: {}", operator), vec![outline_expression(operand)]),
        Expression::Binary {
            left,
            operator,
            right,
            ..
        } => OutlineNode::with(
            format!("Binary: {}", operator),
            vec![outline_expression(left), outline_expression(right)],
        ),
        Expression::Assignment {
            target,
            operator,
            value,
            ..
        } => OutlineNode::with(
            format!("Assignment: {}", operator),
            vec![outline_expression(target), outline_expression(value)],
        ),
    }
}
