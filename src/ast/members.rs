//! Class members: fields, methods and operators.

use crate::Span;

use super::{ast::Identifier, expressions::Expression, statements::Block};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberModifier {
    Normal,
    Virtual,
    Abstract,
    Override,
}

/// Data shared by every kind of member.
///
/// `owner` is the owning class by name; members never point back at their
/// class directly.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDefinition {
    pub accessor: Accessor,
    pub modifier: MemberModifier,
    pub is_static: bool,
    pub declared_type: Identifier,
    pub owner: String,
    pub span: Span,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Field(FieldDefinition),
    Method(MethodDefinition),
    Operator(OperatorDefinition),
}

/// One field declaration, possibly naming several fields of the same type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub atoms: Vec<FieldAtom>,
}

/// One declared name and its optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAtom {
    pub name: Identifier,
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub type_name: Identifier,
    pub name: Identifier,
}

impl Parameter {
    pub fn new(type_name: &str, name: &str) -> Self {
        Parameter {
            type_name: Identifier::synthetic(type_name),
            name: Identifier::synthetic(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDefinition {
    pub operator: Identifier,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
}

impl MemberDefinition {
    /// Creates a bodiless public method, the shape of every builtin member.
    pub fn builtin_method(
        owner: &str,
        name: &str,
        return_type: &str,
        parameters: Vec<Parameter>,
    ) -> Self {
        MemberDefinition {
            accessor: Accessor::Public,
            modifier: MemberModifier::Normal,
            is_static: false,
            declared_type: Identifier::synthetic(return_type),
            owner: owner.to_string(),
            span: Span::default(),
            kind: MemberKind::Method(MethodDefinition {
                name: Identifier::synthetic(name),
                parameters,
                body: None,
            }),
        }
    }

    /// The member's name; for operators, the operator symbol.
    ///
    /// A field declaration is named after its first atom.
    pub fn name(&self) -> &str {
        match &self.kind {
            MemberKind::Field(field) => field
                .atoms
                .first()
                .map(|atom| atom.name.text.as_str())
                .unwrap_or(""),
            MemberKind::Method(method) => &method.name.text,
            MemberKind::Operator(operator) => &operator.operator.text,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Field(_) => &[],
            MemberKind::Method(method) => &method.parameters,
            MemberKind::Operator(operator) => &operator.parameters,
        }
    }

    pub fn body(&self) -> Option<&Block> {
        match &self.kind {
            MemberKind::Field(_) => None,
            MemberKind::Method(method) => method.body.as_ref(),
            MemberKind::Operator(operator) => operator.body.as_ref(),
        }
    }

    /// Same name, same parameter types in the same order, same return type.
    pub fn does_match_signature(&self, other: &MemberDefinition) -> bool {
        self.name() == other.name()
            && self.declared_type.text == other.declared_type.text
            && self.parameters().len() == other.parameters().len()
            && self
                .parameters()
                .iter()
                .zip(other.parameters())
                .all(|(mine, theirs)| mine.type_name.text == theirs.type_name.text)
    }

    /// Key under which operators must be unique inside one class.
    pub fn operator_key(&self) -> Option<String> {
        match &self.kind {
            MemberKind::Operator(operator) => {
                let mut key = format!("{}_{}", operator.operator.text, operator.parameters.len());
                for parameter in &operator.parameters {
                    key.push('_');
                    key.push_str(&parameter.type_name.text);
                }
                Some(key)
            }
            _ => None,
        }
    }

    /// Members never produce a value.
    pub fn returns_a_value(&self) -> bool {
        false
    }
}
